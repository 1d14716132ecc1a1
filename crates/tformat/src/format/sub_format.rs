use crate::format::choice::ChoiceFormat;
use crate::format::date::DateStyle;
use crate::format::error::{FormatError, PatternError};
use crate::format::number::{Numeric, NumberStyle};
use crate::format::range::RangePattern;
use crate::format::write_untyped;
use crate::types::{LocaleId, Value};

const TYPE_KEYWORDS: &[&str] = &["", "number", "date", "time", "choice", "range"];

/// The formatting strategy declared by a placeholder.
///
/// Built once at compile time from the placeholder's type and modifier and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum SubFormat {
    /// No type given; the argument's own kind decides.
    None,
    Number(NumberStyle),
    Date(DateStyle),
    Time(DateStyle),
    Choice(ChoiceFormat),
    Range(RangePattern),
}

impl SubFormat {
    /// Resolve a placeholder's type keyword and modifier.
    pub fn from_parts(type_keyword: &str, modifier: &str) -> Result<SubFormat, PatternError> {
        match find_keyword(type_keyword, TYPE_KEYWORDS) {
            Some("") => Ok(SubFormat::None),
            Some("number") => NumberStyle::from_modifier(modifier).map(SubFormat::Number),
            Some("date") => DateStyle::from_modifier(modifier).map(SubFormat::Date),
            Some("time") => DateStyle::from_modifier(modifier).map(SubFormat::Time),
            Some("choice") => ChoiceFormat::parse(modifier).map(SubFormat::Choice),
            Some("range") => RangePattern::compile(modifier)
                .map(SubFormat::Range)
                .map_err(|source| PatternError::InvalidRangePattern {
                    pattern: modifier.to_string(),
                    source,
                }),
            _ => Err(PatternError::UnknownFormatType {
                keyword: type_keyword.to_string(),
            }),
        }
    }

    /// Format one non-null argument into `out`.
    pub(crate) fn format(&self, value: &Value, locale: &LocaleId, out: &mut String) -> Result<(), FormatError> {
        match self {
            SubFormat::None => write_untyped(out, value, locale),
            SubFormat::Number(style) => {
                out.push_str(&style.format(numeric(value)?, locale));
            }
            SubFormat::Date(style) => out.push_str(&style.format_date(value, locale)?),
            SubFormat::Time(style) => out.push_str(&style.format_time(value, locale)?),
            SubFormat::Choice(choice) => {
                out.push_str(choice.select(numeric(value)?.as_f64()));
            }
            SubFormat::Range(range) => {
                range.format_into(value.as_sequence().unwrap_or_default(), locale, out)?;
            }
        }
        Ok(())
    }
}

fn numeric(value: &Value) -> Result<Numeric, FormatError> {
    Numeric::from_value(value).ok_or(FormatError::TypeMismatch {
        expected: "number",
        found: value.kind_name(),
    })
}

/// Match `text` against `keywords`, first exactly, then trimmed and lowercased.
pub(crate) fn find_keyword<'a>(text: &str, keywords: &[&'a str]) -> Option<&'a str> {
    if let Some(keyword) = keywords.iter().copied().find(|keyword| *keyword == text) {
        return Some(keyword);
    }
    let normalized = text.trim().to_lowercase();
    keywords.iter().copied().find(|keyword| *keyword == normalized)
}
