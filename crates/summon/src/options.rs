//! Per-dispatch options.
//!
//! Options control how the namespace and the command name are case-transformed
//! before lookup, plus diagnostic logging. All flags default to off; casing is
//! strictly opt-in.

use serde_json::Value;

/// Flags controlling a single dispatch.
///
/// `camelize` and `titleize` are shorthands that fan out to both the class
/// and module variants; the class/module flags target the command name and
/// the namespace independently.
///
/// # Example
///
/// ```rust
/// use summon::Options;
///
/// let options = Options::new().camelize().debug();
/// assert!(options.camelize);
/// assert!(options.debug);
/// assert!(!options.titleize);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Camelize both the command name and the namespace.
    pub camelize: bool,
    /// Titleize both the command name and the namespace.
    pub titleize: bool,
    /// Camelize only the command name.
    pub class_camelize: bool,
    /// Titleize only the command name.
    pub class_titleize: bool,
    /// Camelize only the namespace.
    pub module_camelize: bool,
    /// Titleize only the namespace.
    pub module_titleize: bool,
    /// Log the dispatch flow (including the resolved fully-qualified name)
    /// through the configured logger.
    pub debug: bool,
}

impl Options {
    /// Creates options with every flag off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables camelization of both the command name and the namespace.
    pub fn camelize(mut self) -> Self {
        self.camelize = true;
        self
    }

    /// Enables titleization of both the command name and the namespace.
    pub fn titleize(mut self) -> Self {
        self.titleize = true;
        self
    }

    /// Enables camelization of the command name only.
    pub fn class_camelize(mut self) -> Self {
        self.class_camelize = true;
        self
    }

    /// Enables titleization of the command name only.
    pub fn class_titleize(mut self) -> Self {
        self.class_titleize = true;
        self
    }

    /// Enables camelization of the namespace only.
    pub fn module_camelize(mut self) -> Self {
        self.module_camelize = true;
        self
    }

    /// Enables titleization of the namespace only.
    pub fn module_titleize(mut self) -> Self {
        self.module_titleize = true;
        self
    }

    /// Enables dispatch-flow logging.
    pub fn debug(mut self) -> Self {
        self.debug = true;
        self
    }

    /// Reads options from a deserialized value.
    ///
    /// Recognized keys are the field names plus `pretend` (an alias for
    /// `debug`). Unrecognized keys and non-boolean values are ignored, never
    /// errors. A non-object value yields default options.
    pub fn from_value(value: &Value) -> Self {
        let mut options = Options::default();
        let Value::Object(map) = value else {
            return options;
        };
        for (key, value) in map {
            let on = value.as_bool().unwrap_or(false);
            match key.as_str() {
                "camelize" => options.camelize = on,
                "titleize" => options.titleize = on,
                "class_camelize" => options.class_camelize = on,
                "class_titleize" => options.class_titleize = on,
                "module_camelize" => options.module_camelize = on,
                "module_titleize" => options.module_titleize = on,
                "debug" | "pretend" => options.debug = options.debug || on,
                _ => {}
            }
        }
        options
    }

    /// Fans the shorthand flags out to their class/module variants.
    pub(crate) fn normalized(self) -> Self {
        let mut options = self;
        if options.camelize {
            options.class_camelize = true;
            options.module_camelize = true;
        }
        if options.titleize {
            options.class_titleize = true;
            options.module_titleize = true;
        }
        options
    }
}
