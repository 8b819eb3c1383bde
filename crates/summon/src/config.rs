//! Process-wide configuration.
//!
//! Configuration covers the two policy knobs dispatch consults on every
//! call: whether custom (non-conforming) commands may be invoked, and where
//! diagnostic output goes. Set it once at process start:
//!
//! ```rust
//! summon::configure(|config| {
//!     config.allow_custom_commands = true;
//! });
//! summon::reset();
//! ```
//!
//! Reads are concurrent ([`config`] takes a snapshot); writes during live
//! dispatch are not synchronized beyond the lock and are documented as
//! caller responsibility — configure before serving concurrent traffic.
//!
//! A [`Dispatcher`](crate::Dispatcher) can also carry its own [`Config`],
//! injected at construction time, in which case the process-wide one is
//! ignored for that instance.

use once_cell::sync::Lazy;
use std::fmt;
use std::sync::{Arc, RwLock};

/// A sink for dispatch diagnostics.
///
/// The default sink writes debug lines to stdout and errors to stderr;
/// [`FacadeSink`] forwards to the `log` crate macros instead, for
/// applications that already carry a logging backend.
pub trait LogSink: Send + Sync {
    /// Writes a debug-level line.
    fn debug(&self, message: &str);

    /// Writes an error-level line.
    fn error(&self, message: &str);
}

/// The default sink: debug to stdout, errors to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdSink;

impl LogSink for StdSink {
    fn debug(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// A sink forwarding to the [`log`] crate macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn debug(&self, message: &str) {
        log::debug!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Dispatch configuration.
#[derive(Clone)]
pub struct Config {
    /// Whether registrations that do not conform to the
    /// [`Command`](crate::Command) contract may be dispatched.
    pub allow_custom_commands: bool,

    /// Where dispatch diagnostics go when the `debug` option is set.
    pub logger: Arc<dyn LogSink>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allow_custom_commands: false,
            logger: Arc::new(StdSink),
        }
    }
}

impl Config {
    /// Creates a configuration with defaults: custom commands disallowed,
    /// logging to stdout/stderr.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the logger sink.
    pub fn set_logger(&mut self, sink: impl LogSink + 'static) {
        self.logger = Arc::new(sink);
    }

    /// Restores every setting to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("allow_custom_commands", &self.allow_custom_commands)
            .finish_non_exhaustive()
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Mutates the process-wide configuration.
pub fn configure<F: FnOnce(&mut Config)>(f: F) {
    f(&mut CONFIG.write().unwrap());
}

/// Takes a snapshot of the process-wide configuration.
pub fn config() -> Config {
    CONFIG.read().unwrap().clone()
}

/// Restores the process-wide configuration to its defaults.
pub fn reset() {
    CONFIG.write().unwrap().reset();
}
