//! Error types for command dispatch.
//!
//! Every failure the dispatcher itself can detect is a distinct
//! [`DispatchError`] variant, so callers can discriminate programmatically
//! instead of matching on message text. Failures raised by a command's own
//! logic are never reinterpreted: they travel through
//! [`DispatchError::Invocation`] with their source chain intact.

use thiserror::Error;

/// Error type for all dispatch operations.
///
/// Malformed-input variants are reported synchronously, before any registry
/// lookup happens; resolution and conformance failures carry the attempted
/// fully-qualified name.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The dynamic surface received a command value that is not a string.
    #[error("command is not a string; it must name the command to dispatch")]
    InvalidCommandType,

    /// The command name was empty after trimming whitespace.
    #[error("command is empty")]
    BlankCommand,

    /// The dynamic surface received a namespace value of an unsupported
    /// shape (only strings, arrays, and objects describe namespaces).
    #[error("Argument command_namespace is not a String, Hash or Array.")]
    InvalidNamespaceType,

    /// No registration exists under the attempted fully-qualified name.
    #[error("\"{name}\" is not a registered command: {reason}")]
    UnregisteredCommand {
        /// The fully-qualified name the dispatcher looked up.
        name: String,
        /// Diagnostic text from the registry lookup.
        reason: String,
    },

    /// The registration exists but does not implement the [`Command`]
    /// contract, and custom commands are disabled.
    ///
    /// [`Command`]: crate::Command
    #[error("command \"{name}\" does not conform to the Command contract (custom commands are disabled)")]
    NotConforming {
        /// The fully-qualified name of the offending registration.
        name: String,
    },

    /// Custom commands are allowed, but the registration has no call
    /// handler to invoke (a reserved name).
    #[error("command \"{name}\" does not provide a call handler")]
    MissingCallHandler {
        /// The fully-qualified name of the offending registration.
        name: String,
    },

    /// The command's own construction or execution logic failed.
    ///
    /// The underlying error is propagated verbatim; dispatch never folds
    /// invocation failures into a command's error collection.
    #[error("command invocation failed: {0}")]
    Invocation(#[source] anyhow::Error),
}

impl DispatchError {
    /// Returns the fully-qualified command name this error refers to, when
    /// the variant carries one.
    pub fn command_name(&self) -> Option<&str> {
        match self {
            DispatchError::UnregisteredCommand { name, .. }
            | DispatchError::NotConforming { name }
            | DispatchError::MissingCallHandler { name } => Some(name),
            _ => None,
        }
    }
}
