//! Command dispatch.
//!
//! [`Dispatcher`] ties the pieces together: it owns a [`Registry`], resolves
//! a command name plus [`Namespace`] into a fully-qualified name, gates the
//! resolved registration against the configured custom-command policy, and
//! invokes it with the caller's [`Args`].
//!
//! # Pipeline
//!
//! ```text
//! command name + namespace + options
//!   → validate (non-empty name, supported namespace shape)
//!   → qualify  (casing transforms, canonical `A::B::C::Name`)
//!   → resolve  (registry lookup)
//!   → gate     (conformance policy from Config)
//!   → invoke   (fresh command instance, or bare callable)
//! ```
//!
//! # The process-wide dispatcher
//!
//! Most applications register commands once at startup and dispatch from
//! anywhere; the free functions ([`register`], [`dispatch`], ...) operate on
//! a process-wide default [`Dispatcher`] for that. Register before serving
//! concurrent traffic: dispatch takes a read lock, registration a write
//! lock, and nothing else is synchronized.

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

use crate::args::Args;
use crate::command::{Command, CommandResult};
use crate::config::{self, Config};
use crate::error::DispatchError;
use crate::namespace::Namespace;
use crate::options::Options;
use crate::registry::{self, Registration, Registry};

/// What a dispatch produced.
///
/// Conforming commands come back wrapped in a [`CommandResult`]; custom
/// callables hand their raw value back with no success/failure inference.
#[derive(Debug)]
pub enum Dispatched {
    /// Wrapped outcome of a conforming command.
    Command(CommandResult),
    /// Raw value returned by a custom callable.
    Raw(Value),
}

impl Dispatched {
    /// True if this is a wrapped conforming outcome.
    pub fn is_command(&self) -> bool {
        matches!(self, Dispatched::Command(_))
    }

    /// True if this is a raw custom value.
    pub fn is_raw(&self) -> bool {
        matches!(self, Dispatched::Raw(_))
    }

    /// The wrapped outcome, if this is one.
    pub fn as_command(&self) -> Option<&CommandResult> {
        match self {
            Dispatched::Command(result) => Some(result),
            _ => None,
        }
    }

    /// The raw value, if this is one.
    pub fn as_raw(&self) -> Option<&Value> {
        match self {
            Dispatched::Raw(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the dispatch result, returning the wrapped outcome.
    pub fn into_command(self) -> Option<CommandResult> {
        match self {
            Dispatched::Command(result) => Some(result),
            _ => None,
        }
    }

    /// Consumes the dispatch result, returning the raw value.
    pub fn into_raw(self) -> Option<Value> {
        match self {
            Dispatched::Raw(value) => Some(value),
            _ => None,
        }
    }
}

/// Resolves and invokes registered commands.
///
/// A `Dispatcher` reads the process-wide [`Config`] unless one was injected
/// at construction time (see [`DispatcherBuilder::config`]).
///
/// # Example
///
/// ```rust
/// use summon::{Args, Command, Dispatcher, Errors, Options};
///
/// struct Widget {
///     count: u32,
/// }
///
/// impl Command for Widget {
///     type Output = u32;
///
///     fn from_args(args: &Args) -> anyhow::Result<Self> {
///         let count = args.get("count").and_then(|v| v.as_u64()).unwrap_or(0);
///         Ok(Self { count: count as u32 })
///     }
///
///     fn execute(&mut self, _errors: &mut Errors) -> Option<u32> {
///         Some(self.count + 1)
///     }
/// }
///
/// let dispatcher = Dispatcher::builder()
///     .command::<Widget>("Widget", ["Api", "V1"])
///     .build()
///     .unwrap();
///
/// let result = dispatcher
///     .dispatch("Widget", ["Api", "V1"], Args::named([("count", 41)]), Options::default())
///     .unwrap();
/// assert_eq!(
///     result.as_command().and_then(|r| r.result()).and_then(|v| v.as_u64()),
///     Some(42)
/// );
/// ```
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: Registry,
    config: Option<Config>,
}

impl Dispatcher {
    /// Creates a dispatcher with an empty registry, reading the
    /// process-wide configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a dispatcher.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::default()
    }

    /// The registration table.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registration table, for registration at
    /// startup.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Injects a dispatcher-local configuration, overriding the
    /// process-wide one.
    pub fn set_config(&mut self, config: Config) {
        self.config = Some(config);
    }

    fn effective_config(&self) -> Config {
        self.config.clone().unwrap_or_else(config::config)
    }

    /// Dispatches `command` inside `namespace` with the given arguments.
    ///
    /// Returns [`Dispatched::Command`] for conforming commands and
    /// [`Dispatched::Raw`] for custom callables (which require
    /// `allow_custom_commands` in the configuration).
    ///
    /// # Errors
    ///
    /// - [`DispatchError::BlankCommand`] before any lookup, if the name is
    ///   empty after trimming;
    /// - [`DispatchError::UnregisteredCommand`] if the fully-qualified name
    ///   resolves to nothing, carrying the attempted name;
    /// - [`DispatchError::NotConforming`] / [`DispatchError::MissingCallHandler`]
    ///   when the registration fails the conformance policy;
    /// - [`DispatchError::Invocation`] when the command's own construction
    ///   or execution logic fails; the source error is preserved verbatim.
    pub fn dispatch(
        &self,
        command: &str,
        namespace: impl Into<Namespace>,
        args: Args,
        options: Options,
    ) -> Result<Dispatched, DispatchError> {
        let namespace = namespace.into();
        let config = self.effective_config();
        let options = options.normalized();

        if options.debug {
            config.logger.debug(&format!(
                "begin dispatching command {command:?} (namespace {namespace:?})"
            ));
        }

        let name = registry::qualified_name(command, &namespace, &options)?;

        if options.debug {
            config.logger.debug(&format!("command to execute: {name:?}"));
        }

        let registration = self.registry.resolve(&name)?;
        let dispatched = match registration {
            Registration::Command(invoke) => Dispatched::Command(invoke(&args)?),
            Registration::Callable(invoke) => {
                if !config.allow_custom_commands {
                    return Err(DispatchError::NotConforming { name });
                }
                Dispatched::Raw(invoke(&args).map_err(DispatchError::Invocation)?)
            }
            Registration::Reserved => {
                return Err(if config.allow_custom_commands {
                    DispatchError::MissingCallHandler { name }
                } else {
                    DispatchError::NotConforming { name }
                });
            }
        };

        if options.debug {
            config.logger.debug("end dispatching command");
        }

        Ok(dispatched)
    }

    /// Dispatches from deserialized values, e.g. a routed request body.
    ///
    /// Performs the runtime shape validation the typed surface gets for
    /// free: the command must be a string
    /// ([`DispatchError::InvalidCommandType`]), the namespace a string,
    /// array, or object ([`DispatchError::InvalidNamespaceType`]); option
    /// keys that are not recognized are ignored.
    pub fn dispatch_value(
        &self,
        command: &Value,
        namespace: &Value,
        args: &Value,
        options: &Value,
    ) -> Result<Dispatched, DispatchError> {
        let Value::String(command) = command else {
            return Err(DispatchError::InvalidCommandType);
        };
        let namespace = Namespace::from_value(namespace)?;
        let args = Args::from_value(args.clone());
        let options = Options::from_value(options);
        self.dispatch(command, namespace, args, options)
    }
}

/// Builder for [`Dispatcher`].
///
/// Registration errors (e.g. a blank command name) are deferred and
/// reported by [`build`](DispatcherBuilder::build).
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    registry: Registry,
    config: Option<Config>,
    error: Option<DispatchError>,
}

impl DispatcherBuilder {
    /// Registers a conforming command.
    pub fn command<C>(mut self, command: &str, namespace: impl Into<Namespace>) -> Self
    where
        C: Command + 'static,
    {
        if self.error.is_none() {
            if let Err(err) = self.registry.register::<C>(command, namespace) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Registers a custom callable.
    pub fn callable<F>(
        mut self,
        command: &str,
        namespace: impl Into<Namespace>,
        callable: F,
    ) -> Self
    where
        F: Fn(&Args) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        if self.error.is_none() {
            if let Err(err) = self.registry.register_callable(command, namespace, callable) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Reserves a name without an entry point.
    pub fn reserve(mut self, command: &str, namespace: impl Into<Namespace>) -> Self {
        if self.error.is_none() {
            if let Err(err) = self.registry.reserve(command, namespace) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Injects a dispatcher-local configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Finishes the build, reporting the first registration error if any.
    pub fn build(self) -> Result<Dispatcher, DispatchError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        Ok(Dispatcher {
            registry: self.registry,
            config: self.config,
        })
    }
}

static GLOBAL: Lazy<RwLock<Dispatcher>> = Lazy::new(|| RwLock::new(Dispatcher::new()));

/// Registers a conforming command on the process-wide dispatcher.
pub fn register<C>(command: &str, namespace: impl Into<Namespace>) -> Result<(), DispatchError>
where
    C: Command + 'static,
{
    GLOBAL
        .write()
        .unwrap()
        .registry_mut()
        .register::<C>(command, namespace)
}

/// Registers a custom callable on the process-wide dispatcher.
pub fn register_callable<F>(
    command: &str,
    namespace: impl Into<Namespace>,
    callable: F,
) -> Result<(), DispatchError>
where
    F: Fn(&Args) -> anyhow::Result<Value> + Send + Sync + 'static,
{
    GLOBAL
        .write()
        .unwrap()
        .registry_mut()
        .register_callable(command, namespace, callable)
}

/// Reserves a name on the process-wide dispatcher.
pub fn reserve(command: &str, namespace: impl Into<Namespace>) -> Result<(), DispatchError> {
    GLOBAL.write().unwrap().registry_mut().reserve(command, namespace)
}

/// Dispatches a command through the process-wide dispatcher.
///
/// # Example
///
/// ```rust
/// use summon::{Args, Command, Errors, Options};
///
/// struct Echo;
///
/// impl Command for Echo {
///     type Output = String;
///
///     fn from_args(_args: &Args) -> anyhow::Result<Self> {
///         Ok(Self)
///     }
///
///     fn execute(&mut self, _errors: &mut Errors) -> Option<String> {
///         Some("echo".into())
///     }
/// }
///
/// summon::register::<Echo>("Echo", ["Docs", "V1"]).unwrap();
/// let result = summon::dispatch("Echo", ["Docs", "V1"], Args::None, Options::default()).unwrap();
/// assert!(result.as_command().unwrap().is_success());
/// ```
pub fn dispatch(
    command: &str,
    namespace: impl Into<Namespace>,
    args: Args,
    options: Options,
) -> Result<Dispatched, DispatchError> {
    GLOBAL.read().unwrap().dispatch(command, namespace, args, options)
}

/// Dispatches deserialized values through the process-wide dispatcher.
pub fn dispatch_value(
    command: &Value,
    namespace: &Value,
    args: &Value,
    options: &Value,
) -> Result<Dispatched, DispatchError> {
    GLOBAL
        .read()
        .unwrap()
        .dispatch_value(command, namespace, args, options)
}
