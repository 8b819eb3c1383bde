//! The command registration table.
//!
//! Constant lookup in an open class system has no systems-language
//! equivalent, so resolution here is an explicit table: fully-qualified name
//! (`Api::AppName::V1::Authenticate`) to [`Registration`]. The table is
//! populated at process start (builder or registration calls) and read-only
//! at dispatch time.
//!
//! Three kinds of registration exist:
//!
//! - **conforming** — a [`Command`] implementation; dispatch wraps its
//!   outcome in a [`CommandResult`];
//! - **callable** — a bare function returning a raw value, handed back to
//!   the caller unwrapped ("custom commands");
//! - **reserved** — a name with no entry point, e.g. a command compiled out
//!   of this build. Resolvable, never invokable.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::args::Args;
use crate::casing::{camelize, titleize, trim_all};
use crate::command::{self, Command, CommandResult};
use crate::error::DispatchError;
use crate::namespace::Namespace;
use crate::options::Options;

/// Invoker for a conforming registration.
pub type CommandInvoker = Box<dyn Fn(&Args) -> Result<CommandResult, DispatchError> + Send + Sync>;

/// Invoker for a custom (bare callable) registration.
pub type CallableInvoker = Box<dyn Fn(&Args) -> anyhow::Result<Value> + Send + Sync>;

/// One entry in the registration table.
pub enum Registration {
    /// A conforming command; carries the conformance marker implicitly.
    Command(CommandInvoker),
    /// A bare callable with no result wrapping.
    Callable(CallableInvoker),
    /// A name registered without an entry point.
    Reserved,
}

impl Registration {
    /// True if this registration conforms to the [`Command`] contract.
    pub fn is_command(&self) -> bool {
        matches!(self, Registration::Command(_))
    }

    /// True if this registration is a bare callable.
    pub fn is_callable(&self) -> bool {
        matches!(self, Registration::Callable(_))
    }

    /// True if this registration has no entry point.
    pub fn is_reserved(&self) -> bool {
        matches!(self, Registration::Reserved)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registration::Command(_) => f.write_str("Registration::Command"),
            Registration::Callable(_) => f.write_str("Registration::Callable"),
            Registration::Reserved => f.write_str("Registration::Reserved"),
        }
    }
}

/// The registration table: fully-qualified name to [`Registration`].
///
/// Keys are canonicalized with the default (no-casing) qualifier rules, so a
/// command registered under `["Api", "AppName", "V1"]` is found by any
/// dispatch whose namespace and options produce
/// `Api::AppName::V1::<name>`.
#[derive(Debug, Default)]
pub struct Registry {
    entries: HashMap<String, Registration>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a conforming command under `namespace`.
    ///
    /// Re-registering the same fully-qualified name replaces the previous
    /// entry.
    ///
    /// # Errors
    ///
    /// Fails with [`DispatchError::BlankCommand`] if `command` is empty
    /// after trimming.
    pub fn register<C>(
        &mut self,
        command: &str,
        namespace: impl Into<Namespace>,
    ) -> Result<(), DispatchError>
    where
        C: Command + 'static,
    {
        let name = qualified_name(command, &namespace.into(), &Options::default())?;
        self.entries.insert(
            name,
            Registration::Command(Box::new(|args| command::run::<C>(args))),
        );
        Ok(())
    }

    /// Registers a bare callable under `namespace`.
    ///
    /// The callable's raw return value is handed back to dispatch callers
    /// unwrapped; no success/failure inference is applied.
    pub fn register_callable<F>(
        &mut self,
        command: &str,
        namespace: impl Into<Namespace>,
        callable: F,
    ) -> Result<(), DispatchError>
    where
        F: Fn(&Args) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        let name = qualified_name(command, &namespace.into(), &Options::default())?;
        self.entries
            .insert(name, Registration::Callable(Box::new(callable)));
        Ok(())
    }

    /// Reserves a name without attaching an entry point.
    pub fn reserve(
        &mut self,
        command: &str,
        namespace: impl Into<Namespace>,
    ) -> Result<(), DispatchError> {
        let name = qualified_name(command, &namespace.into(), &Options::default())?;
        self.entries.insert(name, Registration::Reserved);
        Ok(())
    }

    /// Looks up a registration by fully-qualified name.
    pub fn get(&self, name: &str) -> Option<&Registration> {
        self.entries.get(name)
    }

    /// True if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Resolves a fully-qualified name, failing with the attempted name and
    /// a lookup diagnostic when nothing is registered under it.
    pub fn resolve(&self, name: &str) -> Result<&Registration, DispatchError> {
        self.get(name)
            .ok_or_else(|| DispatchError::UnregisteredCommand {
                name: name.to_string(),
                reason: "nothing is registered under this name".to_string(),
            })
    }

    /// Removes a registration, returning it if it existed.
    pub fn unregister(&mut self, name: &str) -> Option<Registration> {
        self.entries.remove(name)
    }

    /// All registered fully-qualified names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Validates a command name: trimmed, non-empty.
pub(crate) fn validate_command(command: &str) -> Result<String, DispatchError> {
    let trimmed = command.trim();
    if trimmed.is_empty() {
        return Err(DispatchError::BlankCommand);
    }
    Ok(trimmed.to_string())
}

/// Builds the fully-qualified name for a dispatch or registration:
/// qualifier plus the (optionally case-transformed) command name, with all
/// whitespace removed.
pub(crate) fn qualified_name(
    command: &str,
    namespace: &Namespace,
    options: &Options,
) -> Result<String, DispatchError> {
    let options = options.normalized();

    let mut name = validate_command(command)?;
    if options.class_titleize {
        name = titleize(&name);
    }
    if options.class_camelize {
        // a camelized command may itself be a route (`/api/v1/authenticate`),
        // in which case it carries its own qualifier
        name = camelize(&name);
    }
    let name = trim_all(&name);
    if name.is_empty() {
        return Err(DispatchError::BlankCommand);
    }

    Ok(format!("{}{}", namespace.qualifier(&options), name))
}
