//! Namespaced command registry and dispatcher.
//!
//! `summon` resolves a *command* from a bare name plus a namespace path,
//! invokes it with shape-tagged arguments, and wraps the outcome with
//! success/failure semantics and an error collection. Commands live in a
//! registration table keyed by fully-qualified name
//! (`Api::AppName::V1::Authenticate`), populated at process start — there is
//! no reflection and no implicit registry scan.
//!
//! # Features
//!
//! - **Namespace formatting**: strings, ordered segment lists, or labeled
//!   mappings all produce the same canonical `A::B::C::` qualifier
//! - **Casing transforms**: opt-in camelize/titleize of the namespace and
//!   the command name, so route-like input (`/api/app_name/v1`) can address
//!   constant-like registrations (`Api::AppName::V1`)
//! - **Two invocation models**: conforming commands ([`Command`]) come back
//!   wrapped in a [`CommandResult`]; custom callables return their raw value
//! - **Typed errors**: every core-detected failure is a distinct
//!   [`DispatchError`] variant; command-raised failures propagate verbatim
//! - **Process-wide or injected**: a default global dispatcher with free
//!   functions, or build your own [`Dispatcher`] and inject a [`Config`]
//!
//! # Quick start
//!
//! ```rust
//! use summon::{Args, Command, Dispatched, Dispatcher, Errors, Options};
//!
//! struct Authenticate {
//!     email: String,
//!     password: String,
//! }
//!
//! impl Command for Authenticate {
//!     type Output = String;
//!
//!     fn from_args(args: &Args) -> anyhow::Result<Self> {
//!         Ok(Self {
//!             email: args.required("email")?.as_str().unwrap_or_default().to_string(),
//!             password: args.required("password")?.as_str().unwrap_or_default().to_string(),
//!         })
//!     }
//!
//!     fn execute(&mut self, errors: &mut Errors) -> Option<String> {
//!         if self.password.is_empty() {
//!             errors.add("password", "is required");
//!             return None;
//!         }
//!         Some(format!("session for {}", self.email))
//!     }
//! }
//!
//! let dispatcher = Dispatcher::builder()
//!     .command::<Authenticate>("Authenticate", ["Api", "AppName", "V1"])
//!     .build()
//!     .unwrap();
//!
//! let result = dispatcher
//!     .dispatch(
//!         "Authenticate",
//!         ["Api", "AppName", "V1"],
//!         Args::named([("email", "sam@example.com"), ("password", "AskM3!")]),
//!         Options::default(),
//!     )
//!     .unwrap();
//!
//! match result {
//!     Dispatched::Command(result) => assert!(result.is_success()),
//!     Dispatched::Raw(_) => unreachable!("conforming commands come back wrapped"),
//! }
//! ```
//!
//! # Custom commands
//!
//! A registration without the [`Command`] contract is a *custom command*: a
//! bare callable whose return value is handed back unwrapped. Dispatching
//! one requires `allow_custom_commands` in the configuration:
//!
//! ```rust
//! use summon::{Args, Config, Dispatcher, Options};
//! use serde_json::json;
//!
//! let mut config = Config::new();
//! config.allow_custom_commands = true;
//!
//! let dispatcher = Dispatcher::builder()
//!     .callable("Ping", ["Api", "V1"], |_args| Ok(json!("pong")))
//!     .config(config)
//!     .build()
//!     .unwrap();
//!
//! let result = dispatcher
//!     .dispatch("Ping", ["Api", "V1"], Args::None, Options::default())
//!     .unwrap();
//! assert_eq!(result.into_raw(), Some(json!("pong")));
//! ```

mod args;
mod casing;
mod command;
mod config;
mod dispatch;
mod error;
mod namespace;
mod options;
mod registry;

pub use args::Args;

pub use casing::{camelize, titleize, trim_all};

pub use command::{run, Command, CommandResult, Errors, MessageSet};

pub use config::{config, configure, reset, Config, FacadeSink, LogSink, StdSink};

pub use dispatch::{
    dispatch, dispatch_value, register, register_callable, reserve, Dispatched, Dispatcher,
    DispatcherBuilder,
};

pub use error::DispatchError;

pub use namespace::Namespace;

pub use options::Options;

pub use registry::{CallableInvoker, CommandInvoker, Registration, Registry};

/// The crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
