use std::fmt::{Debug, Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use time::OffsetDateTime;

use crate::manager::LocaleManager;
use crate::types::LocaleId;

/// A deferred, locale-aware argument.
///
/// Substitutions are resolved by the manager that owns the matched pattern,
/// right before formatting, so they can perform their own nested lookups.
/// Implementations must be free of side effects. No cycle detection is done:
/// a substitution that re-enters the same key will recurse forever.
pub trait Substitution: Send + Sync + Debug {
    /// Produce the concrete value for `locale`.
    fn resolve(&self, locale: &LocaleId, manager: &LocaleManager) -> Value;
}

/// A formatting argument.
///
/// The kind of every argument is decided once, when it is converted into a
/// `Value` at the call boundary; formatting dispatches on that kind.
///
/// # Example
///
/// ```
/// use tformat::Value;
///
/// let count: Value = 42.into();
/// let name: Value = "Alice".into();
/// let missing: Value = Option::<&str>::None.into();
///
/// assert_eq!(count.as_integer(), Some(42));
/// assert_eq!(name.as_text(), Some("Alice"));
/// assert!(missing.is_null());
/// ```
#[derive(Clone)]
pub enum Value {
    /// An absent argument; renders as `null`.
    Null,

    /// Text emitted verbatim.
    Text(String),

    /// An integer, formatted with the locale's number conventions.
    Integer(i64),

    /// A floating-point number, formatted with the locale's number conventions.
    Float(f64),

    /// A point in time, formatted as a locale short date and time.
    DateTime(OffsetDateTime),

    /// A list of values, consumed by `range` placeholders.
    Sequence(Vec<Value>),

    /// Anything else that knows how to display itself.
    Opaque(Arc<dyn Display + Send + Sync>),

    /// A value resolved against the active manager before formatting.
    Substitution(Arc<dyn Substitution>),
}

impl Value {
    /// Wrap any displayable value.
    pub fn opaque(value: impl Display + Send + Sync + 'static) -> Value {
        Value::Opaque(Arc::new(value))
    }

    /// Wrap a substitution.
    pub fn substitution(value: impl Substitution + 'static) -> Value {
        Value::Substitution(Arc::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a float; integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&OffsetDateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value, or anything nested in it, is a substitution.
    pub fn needs_resolution(&self) -> bool {
        match self {
            Value::Substitution(_) => true,
            Value::Sequence(items) => items.iter().any(Value::needs_resolution),
            _ => false,
        }
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::DateTime(_) => "date-time",
            Value::Sequence(_) => "sequence",
            Value::Opaque(_) => "opaque",
            Value::Substitution(_) => "substitution",
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
            Value::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            Value::Opaque(value) => f.debug_tuple("Opaque").field(&value.to_string()).finish(),
            Value::Substitution(value) => f.debug_tuple("Substitution").field(value).finish(),
        }
    }
}

/// The locale-independent textual representation.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Null => f.write_str("null"),
            Value::Text(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::DateTime(dt) => write!(f, "{dt}"),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Opaque(value) => write!(f, "{value}"),
            Value::Substitution(value) => write!(f, "{value:?}"),
        }
    }
}

// From implementations for common types

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Integer)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        i64::try_from(n).map_or(Value::Float(n as f64), Value::Integer)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<OffsetDateTime> for Value {
    fn from(dt: OffsetDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
