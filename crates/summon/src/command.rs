//! The conforming command model.
//!
//! A conforming command implements [`Command`]: the dispatcher constructs a
//! fresh instance from the dispatch arguments, executes it exactly once with
//! a fresh [`Errors`] collection, and wraps the outcome in a
//! [`CommandResult`] carrying the result value, the called flag, and the
//! recorded errors.
//!
//! # Execution state
//!
//! A [`CommandResult`] moves one way, NotCalled → Called, and never back.
//! Dispatching the same command again builds a new instance with fresh state
//! rather than mutating a prior one. Before being called, both
//! [`CommandResult::is_success`] and [`CommandResult::is_failure`] answer
//! false; afterwards exactly one of them is true.
//!
//! # Recorded failures vs. raised failures
//!
//! A command signals a *domain* failure by adding to its [`Errors`] and
//! returning `None` from [`Command::execute`]; the dispatch still succeeds
//! and the wrapper reports `is_failure()`. A failure in
//! [`Command::from_args`] (bad arguments, broken invariants) is *raised*:
//! it propagates out of dispatch as
//! [`DispatchError::Invocation`](crate::DispatchError::Invocation) and is
//! never folded into the error collection.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::args::Args;
use crate::error::DispatchError;

/// A command conforming to the standard call/result/error contract.
///
/// # Example
///
/// ```rust
/// use summon::{run, Args, Command, Errors};
///
/// struct Greet {
///     name: String,
/// }
///
/// impl Command for Greet {
///     type Output = String;
///
///     fn from_args(args: &Args) -> anyhow::Result<Self> {
///         let name = args.required("name")?.as_str().unwrap_or_default().to_string();
///         Ok(Self { name })
///     }
///
///     fn execute(&mut self, errors: &mut Errors) -> Option<String> {
///         if self.name.is_empty() {
///             errors.add("name", "is required");
///             return None;
///         }
///         Some(format!("hello, {}", self.name))
///     }
/// }
///
/// let result = run::<Greet>(&Args::named([("name", "sam")])).unwrap();
/// assert!(result.is_success());
/// assert_eq!(result.result().and_then(|v| v.as_str()), Some("hello, sam"));
/// ```
pub trait Command: Sized {
    /// The value produced by a successful execution.
    type Output: Serialize;

    /// Constructs the command from the dispatch arguments.
    ///
    /// Failures here are invocation failures: they propagate out of dispatch
    /// unwrapped instead of becoming recorded errors.
    fn from_args(args: &Args) -> anyhow::Result<Self>;

    /// Executes the command once.
    ///
    /// Domain failures are recorded in `errors`; returning `None` with
    /// recorded errors marks the dispatch as failed without raising.
    fn execute(&mut self, errors: &mut Errors) -> Option<Self::Output>;
}

/// Builds a fresh `C` from `args`, executes it once, and wraps the outcome.
///
/// This is the invoker behind conforming registrations; it is public so
/// commands can also be run directly, without a registry.
pub fn run<C: Command>(args: &Args) -> Result<CommandResult, DispatchError> {
    let mut command = C::from_args(args).map_err(DispatchError::Invocation)?;
    let mut errors = Errors::new();
    let output = command.execute(&mut errors);
    let result = output
        .map(|value| serde_json::to_value(value))
        .transpose()
        .map_err(|err| DispatchError::Invocation(err.into()))?;
    Ok(CommandResult {
        result,
        called: true,
        errors,
    })
}

/// The wrapped outcome of a conforming command dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommandResult {
    result: Option<Value>,
    called: bool,
    errors: Errors,
}

impl CommandResult {
    /// The value the command produced, if any.
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// True once the command has been executed.
    pub fn called(&self) -> bool {
        self.called
    }

    /// True if the command was called and recorded no errors.
    pub fn is_success(&self) -> bool {
        self.called && self.errors.is_empty()
    }

    /// True if the command was called and recorded errors.
    pub fn is_failure(&self) -> bool {
        self.called && !self.errors.is_empty()
    }

    /// The errors the command recorded.
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Consumes the wrapper, returning the produced value.
    pub fn into_result(self) -> Option<Value> {
        self.result
    }
}

/// A set of messages for one field, used by [`Errors::add_multiple`].
///
/// `From` impls cover the natural spellings: one message, a list of
/// messages, or no message at all (which contributes nothing and does not
/// create the field's key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSet {
    /// No messages.
    None,
    /// A single message.
    One(String),
    /// Several messages, added in order.
    Many(Vec<String>),
}

impl From<&str> for MessageSet {
    fn from(message: &str) -> Self {
        MessageSet::One(message.to_string())
    }
}

impl From<String> for MessageSet {
    fn from(message: String) -> Self {
        MessageSet::One(message)
    }
}

impl From<Vec<String>> for MessageSet {
    fn from(messages: Vec<String>) -> Self {
        MessageSet::Many(messages)
    }
}

impl From<Vec<&str>> for MessageSet {
    fn from(messages: Vec<&str>) -> Self {
        MessageSet::Many(messages.into_iter().map(str::to_string).collect())
    }
}

impl<T: Into<MessageSet>> From<Option<T>> for MessageSet {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(MessageSet::None)
    }
}

/// An insertion-ordered error collection keyed by field name.
///
/// Each field holds an ordered, duplicate-suppressing list of messages.
/// The sentinel field `base` holds errors about the command as a whole;
/// [`Errors::full_messages`] leaves it unprefixed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: Vec<(String, Vec<String>)>,
}

impl Errors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `message` to `field`, suppressing exact duplicates.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => {
                if !messages.contains(&message) {
                    messages.push(message);
                }
            }
            None => self.entries.push((field, vec![message])),
        }
    }

    /// Adds messages for several fields at once.
    ///
    /// Each entry's message set may be a single message, a list, or absent;
    /// absent sets contribute nothing and do not create the field's key.
    ///
    /// # Example
    ///
    /// ```rust
    /// use summon::Errors;
    ///
    /// let mut errors = Errors::new();
    /// errors.add_multiple([
    ///     ("email", vec!["is required", "is invalid"]),
    ///     ("password", vec!["is too short"]),
    /// ]);
    /// assert_eq!(errors.get("email").unwrap().len(), 2);
    /// ```
    pub fn add_multiple<K, M>(&mut self, entries: impl IntoIterator<Item = (K, M)>)
    where
        K: Into<String>,
        M: Into<MessageSet>,
    {
        for (field, messages) in entries {
            let field = field.into();
            match messages.into() {
                MessageSet::None => {}
                MessageSet::One(message) => self.add(field, message),
                MessageSet::Many(messages) => {
                    for message in messages {
                        self.add(field.clone(), message);
                    }
                }
            }
        }
    }

    /// The messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    /// Iterates `(field, message)` pairs in insertion order, yielding once
    /// per stored message.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(field, messages)| {
            messages
                .iter()
                .map(move |message| (field.as_str(), message.as_str()))
        })
    }

    /// Formats every recorded error as `"<Field> <message>"`.
    ///
    /// The field prefix is capitalized (first letter up, the rest lowered)
    /// with dots replaced by underscores; the `base` field passes its
    /// messages through unprefixed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use summon::Errors;
    ///
    /// let mut errors = Errors::new();
    /// errors.add("email", "is required");
    /// errors.add("base", "something went wrong");
    /// assert_eq!(
    ///     errors.full_messages(),
    ///     vec!["Email is required", "something went wrong"]
    /// );
    /// ```
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .map(|(field, message)| {
                if field == "base" {
                    message.to_string()
                } else {
                    format!("{} {}", field_prefix(field), message)
                }
            })
            .collect()
    }

    /// Total number of recorded messages across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, messages)| messages.len()).sum()
    }

    /// True if no messages are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every recorded message.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// `user.name` -> `User_name`: dots become underscores, then the first
/// letter is upcased and the rest lowered.
fn field_prefix(field: &str) -> String {
    let underscored = field.replace('.', "_");
    let mut chars = underscored.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl Serialize for Errors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, messages) in &self.entries {
            map.serialize_entry(field, messages)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Doubler {
        input: i64,
    }

    impl Command for Doubler {
        type Output = i64;

        fn from_args(args: &Args) -> anyhow::Result<Self> {
            let input = args
                .value()
                .and_then(Value::as_i64)
                .ok_or_else(|| anyhow::anyhow!("expected a single integer argument"))?;
            Ok(Self { input })
        }

        fn execute(&mut self, errors: &mut Errors) -> Option<i64> {
            if self.input < 0 {
                errors.add("input", "must not be negative");
                return None;
            }
            Some(self.input * 2)
        }
    }

    #[test]
    fn test_run_success() {
        let result = run::<Doubler>(&Args::single(21)).unwrap();
        assert!(result.called());
        assert!(result.is_success());
        assert!(!result.is_failure());
        assert_eq!(result.result(), Some(&json!(42)));
    }

    #[test]
    fn test_run_recorded_failure() {
        let result = run::<Doubler>(&Args::single(-1)).unwrap();
        assert!(result.called());
        assert!(result.is_failure());
        assert!(!result.is_success());
        assert_eq!(result.result(), None);
        assert_eq!(
            result.errors().get("input"),
            Some(&["must not be negative".to_string()][..])
        );
    }

    #[test]
    fn test_run_construction_failure_propagates() {
        let err = run::<Doubler>(&Args::None).unwrap_err();
        assert!(matches!(err, DispatchError::Invocation(_)));
        assert!(err.to_string().contains("expected a single integer"));
    }

    #[test]
    fn test_fresh_state_per_run() {
        let first = run::<Doubler>(&Args::single(-1)).unwrap();
        assert!(first.is_failure());
        // a failed run leaves no state behind for the next one
        let second = run::<Doubler>(&Args::single(1)).unwrap();
        assert!(second.is_success());
    }

    #[test]
    fn test_not_called_result_is_neither_success_nor_failure() {
        let result = CommandResult::default();
        assert!(!result.called());
        assert!(!result.is_success());
        assert!(!result.is_failure());
    }

    #[test]
    fn test_errors_add_and_get() {
        let mut errors = Errors::new();
        errors.add("name", "is required");
        assert_eq!(errors.get("name"), Some(&["is required".to_string()][..]));
        assert_eq!(errors.get("missing"), None);
    }

    #[test]
    fn test_errors_add_suppresses_duplicates() {
        let mut errors = Errors::new();
        errors.add("name", "is required");
        errors.add("name", "is required");
        errors.add("name", "is invalid");
        assert_eq!(
            errors.get("name").unwrap(),
            &["is required".to_string(), "is invalid".to_string()][..]
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_errors_fields_are_independent() {
        let mut errors = Errors::new();
        errors.add("name", "is required");
        errors.add("email", "is invalid");
        assert_eq!(errors.get("name").unwrap().len(), 1);
        assert_eq!(errors.get("email").unwrap().len(), 1);
    }

    #[test]
    fn test_add_multiple_scalars_and_lists() {
        let mut errors = Errors::new();
        errors.add_multiple([("name", MessageSet::from("is required"))]);
        errors.add_multiple([
            ("email", MessageSet::from(vec!["is required", "is invalid"])),
            ("password", MessageSet::from(vec!["is too short", "is too weak"])),
        ]);
        assert_eq!(errors.get("email").unwrap().len(), 2);
        assert_eq!(errors.get("password").unwrap().len(), 2);
        assert_eq!(errors.get("name").unwrap().len(), 1);
    }

    #[test]
    fn test_add_multiple_absent_creates_no_key() {
        let mut errors = Errors::new();
        errors.add_multiple([("name", MessageSet::from(None::<&str>))]);
        assert!(errors.is_empty());
        assert_eq!(errors.get("name"), None);
    }

    #[test]
    fn test_iter_yields_pairs_in_insertion_order() {
        let mut errors = Errors::new();
        errors.add("b", "one");
        errors.add("a", "two");
        errors.add("b", "three");
        let pairs: Vec<(&str, &str)> = errors.iter().collect();
        assert_eq!(pairs, vec![("b", "one"), ("b", "three"), ("a", "two")]);
    }

    #[test]
    fn test_full_messages_prefixes_fields() {
        let mut errors = Errors::new();
        errors.add("email", "is required");
        assert_eq!(errors.full_messages(), vec!["Email is required"]);
    }

    #[test]
    fn test_full_messages_base_is_unprefixed() {
        let mut errors = Errors::new();
        errors.add("base", "Something went wrong");
        errors.add("email", "is invalid");
        assert_eq!(
            errors.full_messages(),
            vec!["Something went wrong", "Email is invalid"]
        );
    }

    #[test]
    fn test_full_messages_dotted_fields() {
        let mut errors = Errors::new();
        errors.add("user.name", "is taken");
        assert_eq!(errors.full_messages(), vec!["User_name is taken"]);
    }

    #[test]
    fn test_full_messages_capitalization_lowers_the_rest() {
        let mut errors = Errors::new();
        errors.add("fullName", "is required");
        assert_eq!(errors.full_messages(), vec!["Fullname is required"]);
    }

    #[test]
    fn test_clear() {
        let mut errors = Errors::new();
        errors.add("name", "is required");
        errors.clear();
        assert!(errors.is_empty());
        assert_eq!(errors.len(), 0);
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let mut errors = Errors::new();
        errors.add("email", "is required");
        errors.add("email", "is invalid");
        errors.add("base", "broken");
        let value = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            value,
            json!({"email": ["is required", "is invalid"], "base": ["broken"]})
        );
    }

    #[test]
    fn test_command_result_serializes() {
        let result = run::<Doubler>(&Args::single(2)).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["result"], json!(4));
        assert_eq!(value["called"], json!(true));
    }
}
