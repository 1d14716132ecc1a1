//! The message format engine: pattern compilation and formatting.

mod choice;
mod cldr;
mod date;
mod error;
mod number;
mod pattern;
mod range;
mod sub_format;

pub use choice::ChoiceFormat;
pub use date::{DatePattern, DateStyle};
pub use error::{FormatError, PatternError, RangeSyntaxError};
pub use number::{DecimalPattern, NumberStyle};
pub use pattern::{CompiledPattern, Placeholder, Segment};
pub use range::RangePattern;
pub use sub_format::SubFormat;

use std::fmt::Write as _;

use crate::types::{LocaleId, Value};

/// Write `value` the way an untyped placeholder does, dispatching on its kind.
pub(crate) fn write_untyped(out: &mut String, value: &Value, locale: &LocaleId) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Text(text) => out.push_str(text),
        Value::Integer(n) => out.push_str(&number::format_default(number::Numeric::Integer(*n), locale)),
        Value::Float(f) => out.push_str(&number::format_default(number::Numeric::Float(*f), locale)),
        Value::DateTime(moment) => out.push_str(&date::format_default(moment, locale)),
        Value::Sequence(_) | Value::Opaque(_) | Value::Substitution(_) => {
            let _ = write!(out, "{value}");
        }
    }
}
