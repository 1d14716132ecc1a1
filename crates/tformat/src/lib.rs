//! Message formatting with locale fallback.
//!
//! Patterns such as `"{0} scored {1,number,integer} points on {2,date,short}"`
//! are compiled once per locale and formatted with positional [`Value`]
//! arguments. A [`LocaleManager`] maps a locale and a key to a compiled
//! pattern, falling back to a default locale and then to a parent manager.

pub mod format;
pub mod loader;
pub mod manager;
pub mod types;

pub use format::{
    ChoiceFormat, CompiledPattern, DatePattern, DateStyle, DecimalPattern, FormatError,
    NumberStyle, PatternError, Placeholder, RangePattern, RangeSyntaxError, Segment, SubFormat,
};
pub use manager::{
    ChainError, LoadError, LoadMode, LoadReport, LoadWarning, LocaleManager, LocaleTable,
    ManagerConfig, RawTranslations, Strict, TranslateError, compute_suggestions,
};
pub use types::{LocaleId, LocaleIdError, Substitution, Value};

/// Creates a `Vec<Value>` of positional arguments.
///
/// Each element is converted via `Into<Value>`, so integers, floats, strings,
/// date-times, options and vectors can be mixed freely.
///
/// # Example
///
/// ```
/// use tformat::{args, Value};
///
/// let a = args!["Alice", 3, 2.5, Option::<i32>::None];
/// assert_eq!(a.len(), 4);
/// assert_eq!(a[0].as_text(), Some("Alice"));
/// assert_eq!(a[1].as_integer(), Some(3));
/// assert!(a[3].is_null());
/// ```
#[macro_export]
macro_rules! args {
    [] => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    [ $($value:expr),+ $(,)? ] => {
        ::std::vec![ $( ::std::convert::Into::<$crate::Value>::into($value) ),+ ]
    };
}
