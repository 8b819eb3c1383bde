//! Shared fixture commands for the integration suites.
//!
//! These mirror a small versioned API surface: a couple of well-behaved
//! commands under `Api::AppName::V1`/`V2`, a custom callable, a reserved
//! name, and one command with no namespace at all.

use serde_json::{json, Value};
use summon::{Args, Command, Config, Dispatcher, Errors};

/// Succeeds iff the named `param1` equals `"param1"`.
pub struct GoodCommandA {
    param1: Option<String>,
}

impl Command for GoodCommandA {
    type Output = bool;

    fn from_args(args: &Args) -> anyhow::Result<Self> {
        let param1 = args
            .get("param1")
            .and_then(Value::as_str)
            .map(str::to_string);
        Ok(Self { param1 })
    }

    fn execute(&mut self, errors: &mut Errors) -> Option<bool> {
        if self.param1.as_deref() == Some("param1") {
            Some(true)
        } else {
            errors.add("param1", "is invalid");
            None
        }
    }
}

/// Takes three parameters, named or positional, and records an error when
/// they do not match the expected fixture values.
pub struct TestCommand {
    param1: Option<String>,
    param2: Option<String>,
    param3: Option<String>,
}

impl TestCommand {
    fn field(args: &Args, name: &str, index: usize) -> Option<String> {
        args.get(name)
            .or_else(|| args.position(index))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

impl Command for TestCommand {
    type Output = bool;

    fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            param1: Self::field(args, "param1", 0),
            param2: Self::field(args, "param2", 1),
            param3: Self::field(args, "param3", 2),
        })
    }

    fn execute(&mut self, errors: &mut Errors) -> Option<bool> {
        let expected = (
            self.param1.as_deref(),
            self.param2.as_deref(),
            self.param3.as_deref(),
        );
        if expected == (Some("param1"), Some("param2"), Some("param3")) {
            Some(true)
        } else {
            errors.add("invalid_parameters", "Parameters are invalid");
            None
        }
    }
}

/// Authenticates with an email and password, named or positional.
pub struct Authenticate {
    email: String,
    password: String,
}

impl Command for Authenticate {
    type Output = Value;

    fn from_args(args: &Args) -> anyhow::Result<Self> {
        let email = args
            .get("email")
            .or_else(|| args.position(0))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("missing required argument \"email\""))?;
        let password = args
            .get("password")
            .or_else(|| args.position(1))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("missing required argument \"password\""))?;
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    fn execute(&mut self, errors: &mut Errors) -> Option<Value> {
        if self.password.is_empty() {
            errors.add("password", "is required");
            return None;
        }
        Some(json!({ "email": self.email, "authenticated": true }))
    }
}

/// Builds a dispatcher with the fixture API registered.
pub fn build_dispatcher(allow_custom_commands: bool) -> Dispatcher {
    let mut config = Config::new();
    config.allow_custom_commands = allow_custom_commands;

    Dispatcher::builder()
        .command::<GoodCommandA>("GoodCommandA", ["Api", "AppName", "V1"])
        .command::<TestCommand>("TestCommand", ["Api", "AppName", "V1"])
        .command::<TestCommand>("TestCommand", ["Api", "AppName", "V2"])
        .command::<Authenticate>("Authenticate", ["Api", "AppName", "V1"])
        .command::<Authenticate>("Authenticate", "Api::Carz4Rent::V2")
        .command::<TestCommand>("NoQualifiersCommand", ())
        .callable("CustomCommand", ["Api", "AppName", "V1"], |args| {
            Ok(json!(args.get("param1").and_then(Value::as_str) == Some("param1")))
        })
        .reserve("InvalidCustomCommand", ["Api", "AppName", "V2"])
        .config(config)
        .build()
        .expect("fixture dispatcher builds")
}
