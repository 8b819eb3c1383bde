//! `authx` — a worked example of dispatching commands through `summon`.
//!
//! The demo registers a small auth API under `Api::AppName::V1` plus one
//! custom callable, then dispatches into it three ways:
//!
//! - `authx auth --email sam@example.com --password secret1` — named args
//! - `authx route /api/app_name/v1/authenticate -p email=sam@example.com \
//!   -p password=secret1` — a camelized route, the way a web front end
//!   would address the same command
//! - `authx ping` — a custom command returning a raw value

mod commands;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use summon::{Args, Config, Dispatched, Dispatcher, Options};

#[derive(Parser)]
#[command(name = "authx", about = "Dispatch demo commands through summon", version)]
struct Cli {
    /// Log the dispatch flow, including the resolved command name
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Authenticate against the demo API
    Auth {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Register a new account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        password_confirmation: String,
    },
    /// Dispatch a raw route with `key=value` parameters
    Route {
        /// Route to camelize and dispatch, e.g. `/api/app_name/v1/authenticate`
        path: String,
        /// Named parameter, repeatable
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
    /// Ping the demo service (a custom command; prints the raw value)
    Ping,
}

fn build_dispatcher() -> Result<Dispatcher, summon::DispatchError> {
    let mut config = Config::new();
    config.allow_custom_commands = true;

    Dispatcher::builder()
        .command::<commands::Authenticate>("Authenticate", ["Api", "AppName", "V1"])
        .command::<commands::RegisterUser>("RegisterUser", ["Api", "AppName", "V1"])
        .callable("Ping", ["Api", "AppName", "V1"], |_args| Ok(json!("pong")))
        .config(config)
        .build()
}

fn parse_params(params: &[String]) -> anyhow::Result<Args> {
    if params.is_empty() {
        return Ok(Args::None);
    }
    let mut fields = Vec::with_capacity(params.len());
    for param in params {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("parameter {param:?} is not of the form KEY=VALUE"))?;
        fields.push((key.to_string(), Value::from(value)));
    }
    Ok(Args::named(fields))
}

fn report(dispatched: Dispatched) -> anyhow::Result<()> {
    match dispatched {
        Dispatched::Command(result) => {
            if result.is_success() {
                let value = result.into_result().unwrap_or(Value::Null);
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                for message in result.errors().full_messages() {
                    eprintln!("error: {message}");
                }
                std::process::exit(1);
            }
        }
        Dispatched::Raw(value) => println!("{}", serde_json::to_string_pretty(&value)?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let dispatcher = build_dispatcher()?;

    let mut options = Options::default();
    options.debug = cli.debug;

    let dispatched = match &cli.command {
        Cmd::Auth { email, password } => dispatcher.dispatch(
            "Authenticate",
            ["Api", "AppName", "V1"],
            Args::named([("email", email.as_str()), ("password", password.as_str())]),
            options,
        )?,
        Cmd::Register {
            email,
            password,
            password_confirmation,
        } => dispatcher.dispatch(
            "RegisterUser",
            ["Api", "AppName", "V1"],
            Args::named([
                ("email", email.as_str()),
                ("password", password.as_str()),
                ("password_confirmation", password_confirmation.as_str()),
            ]),
            options,
        )?,
        Cmd::Route { path, params } => {
            dispatcher.dispatch(path, (), parse_params(params)?, options.camelize())?
        }
        Cmd::Ping => dispatcher.dispatch("Ping", ["Api", "AppName", "V1"], Args::None, options)?,
    };

    report(dispatched)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_builds() {
        let dispatcher = build_dispatcher().unwrap();
        assert!(dispatcher.registry().contains("Api::AppName::V1::Authenticate"));
        assert!(dispatcher.registry().contains("Api::AppName::V1::Ping"));
    }

    #[test]
    fn test_route_dispatch_reaches_commands() {
        let dispatcher = build_dispatcher().unwrap();
        let args = Args::named([("email", "sam@example.com"), ("password", "secret1")]);
        let result = dispatcher
            .dispatch(
                "/api/app_name/v1/authenticate",
                (),
                args,
                Options::new().camelize(),
            )
            .unwrap();
        assert!(result.as_command().unwrap().is_success());
    }

    #[test]
    fn test_parse_params() {
        let args = parse_params(&["email=a@b.com".into(), "password=x".into()]).unwrap();
        assert_eq!(args.get("email").and_then(Value::as_str), Some("a@b.com"));

        assert!(parse_params(&["broken".into()]).is_err());
        assert!(parse_params(&[]).unwrap().is_none());
    }
}
