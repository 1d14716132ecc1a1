//! Date and time sub-formats.
//!
//! Named styles and custom patterns both go through ICU4X datetime data.
//! Custom patterns use `SimpleDateFormat` letters and are translated to UTS 35
//! patterns at compile time, so month, weekday and day-period names come from
//! the locale. Formatters and loaded names are cached per thread.

use std::cell::RefCell;
use std::iter::{self, Peekable};
use std::str::Chars;

use icu_calendar::{Date, Gregorian, Iso};
use icu_datetime::fieldsets::enums::{
    CompositeFieldSet, DateAndTimeFieldSet, DateFieldSet, TimeFieldSet,
};
use icu_datetime::fieldsets::{T, YMD, YMDE};
use icu_datetime::input::{DateTime, Time, TimeZone, UtcOffset, ZonedDateTime};
use icu_datetime::options::Length;
use icu_datetime::pattern::{DateTimePattern, FixedCalendarDateTimeNames, PatternLoadError};
use icu_datetime::DateTimeFormatter;
use icu_locale_core::Locale;
use time::OffsetDateTime;
use writeable::TryWriteable;

use crate::format::error::{FormatError, PatternError};
use crate::format::sub_format::find_keyword;
use crate::types::{LocaleId, Value};

thread_local! {
    /// Per-thread cache of named-style formatters keyed by locale and layout.
    static FORMATTER_CACHE: RefCell<Vec<(LocaleId, Layout, StyleFormatter)>> = const { RefCell::new(Vec::new()) };

    /// Per-thread cache of locale names loaded for one custom pattern.
    static NAMES_CACHE: RefCell<Vec<(LocaleId, String, PatternNames)>> = const { RefCell::new(Vec::new()) };
}

const DATE_MODIFIERS: &[&str] = &["", "short", "medium", "long", "full"];

/// A date or time sub-format.
#[derive(Debug, Clone, PartialEq)]
pub enum DateStyle {
    Default,
    Short,
    Medium,
    Long,
    Full,
    /// A custom pattern such as `dd. MMMM yyyy HH:mm`.
    Pattern(DatePattern),
}

impl DateStyle {
    pub(crate) fn from_modifier(modifier: &str) -> Result<DateStyle, PatternError> {
        match find_keyword(modifier, DATE_MODIFIERS) {
            Some("") => Ok(DateStyle::Default),
            Some("short") => Ok(DateStyle::Short),
            Some("medium") => Ok(DateStyle::Medium),
            Some("long") => Ok(DateStyle::Long),
            Some("full") => Ok(DateStyle::Full),
            _ => DatePattern::parse(modifier).map(DateStyle::Pattern),
        }
    }

    /// Format `value` as a calendar date.
    pub(crate) fn format_date(&self, value: &Value, locale: &LocaleId) -> Result<String, FormatError> {
        let moment = moment_of(value, "date")?;
        let layout = match self {
            DateStyle::Pattern(pattern) => return Ok(pattern.render(&moment, locale)),
            DateStyle::Short => Layout::Date(Length::Short),
            DateStyle::Default | DateStyle::Medium => Layout::Date(Length::Medium),
            DateStyle::Long => Layout::Date(Length::Long),
            DateStyle::Full => Layout::DateWithWeekday,
        };
        Ok(render_icu(layout, &moment, locale))
    }

    /// Format `value` as a time of day.
    pub(crate) fn format_time(&self, value: &Value, locale: &LocaleId) -> Result<String, FormatError> {
        let moment = moment_of(value, "time")?;
        let layout = match self {
            DateStyle::Pattern(pattern) => return Ok(pattern.render(&moment, locale)),
            DateStyle::Short => Layout::Time(Length::Short),
            DateStyle::Default | DateStyle::Medium => Layout::Time(Length::Medium),
            DateStyle::Long | DateStyle::Full => Layout::Time(Length::Long),
        };
        Ok(render_icu(layout, &moment, locale))
    }
}

/// Format a date-time the way untyped placeholders do: short date and time.
pub(crate) fn format_default(moment: &OffsetDateTime, locale: &LocaleId) -> String {
    render_icu(Layout::ShortDateTime, moment, locale)
}

/// Accept a date-time, or an integer read as milliseconds since the epoch.
fn moment_of(value: &Value, expected: &'static str) -> Result<OffsetDateTime, FormatError> {
    let mismatch = || FormatError::TypeMismatch {
        expected,
        found: value.kind_name(),
    };
    match value {
        Value::DateTime(moment) => Ok(*moment),
        Value::Integer(millis) => {
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(*millis) * 1_000_000)
                .map_err(|_| mismatch())
        }
        _ => Err(mismatch()),
    }
}

fn to_icu(moment: &OffsetDateTime) -> Option<DateTime<Iso>> {
    let date = Date::try_new_iso(moment.year(), u8::from(moment.month()), moment.day()).ok()?;
    let time = Time::try_new(
        moment.hour(),
        moment.minute(),
        moment.second(),
        moment.nanosecond(),
    )
    .ok()?;
    Some(DateTime { date, time })
}

/// The named layouts this module renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Date(Length),
    DateWithWeekday,
    Time(Length),
    ShortDateTime,
}

enum StyleFormatter {
    Date(DateTimeFormatter<DateFieldSet>),
    Time(DateTimeFormatter<TimeFieldSet>),
    DateAndTime(DateTimeFormatter<DateAndTimeFieldSet>),
}

impl StyleFormatter {
    fn try_new(layout: Layout, locale: &LocaleId) -> Option<StyleFormatter> {
        let prefs = locale.to_icu().into();
        let formatter = match layout {
            Layout::Date(length) => {
                let set = DateFieldSet::YMD(YMD::for_length(length));
                StyleFormatter::Date(DateTimeFormatter::try_new(prefs, set).ok()?)
            }
            Layout::DateWithWeekday => {
                let set = DateFieldSet::YMDE(YMDE::long());
                StyleFormatter::Date(DateTimeFormatter::try_new(prefs, set).ok()?)
            }
            Layout::Time(Length::Short) => {
                let set = TimeFieldSet::T(T::hm().with_length(Length::Short));
                StyleFormatter::Time(DateTimeFormatter::try_new(prefs, set).ok()?)
            }
            Layout::Time(length) => {
                let set = TimeFieldSet::T(T::hms().with_length(length));
                StyleFormatter::Time(DateTimeFormatter::try_new(prefs, set).ok()?)
            }
            Layout::ShortDateTime => {
                let set = DateAndTimeFieldSet::YMDT(YMD::short().with_time_hm());
                StyleFormatter::DateAndTime(DateTimeFormatter::try_new(prefs, set).ok()?)
            }
        };
        Some(formatter)
    }

    fn format(&self, input: &DateTime<Iso>) -> String {
        match self {
            StyleFormatter::Date(formatter) => formatter.format(input).to_string(),
            StyleFormatter::Time(formatter) => formatter.format(input).to_string(),
            StyleFormatter::DateAndTime(formatter) => formatter.format(input).to_string(),
        }
    }
}

/// Render a named layout, falling back to ISO-8601 when data or conversion fails.
fn render_icu(layout: Layout, moment: &OffsetDateTime, locale: &LocaleId) -> String {
    let formatted = to_icu(moment).and_then(|input| {
        FORMATTER_CACHE.with(|cache| {
            let mut cache = cache.borrow_mut();
            if let Some((_, _, formatter)) = cache
                .iter()
                .find(|(cached, cached_layout, _)| cached == locale && *cached_layout == layout)
            {
                return Some(formatter.format(&input));
            }

            let formatter = StyleFormatter::try_new(layout, locale)?;
            let text = formatter.format(&input);
            cache.push((*locale, layout, formatter));
            Some(text)
        })
    });
    formatted.unwrap_or_else(|| moment.to_string())
}

/// A pattern together with the locale names it needs.
struct PatternNames {
    pattern: DateTimePattern,
    names: FixedCalendarDateTimeNames<Gregorian, CompositeFieldSet>,
}

impl PatternNames {
    fn load(uts35: &str, locale: Locale) -> Result<PatternNames, String> {
        let pattern = DateTimePattern::try_from_pattern_str(uts35).map_err(|e| e.to_string())?;
        let mut names = FixedCalendarDateTimeNames::<Gregorian, CompositeFieldSet>::try_new(locale.into())
            .map_err(|e| e.to_string())?;
        names.include_for_pattern(&pattern).map_err(describe_load_error)?;
        Ok(PatternNames { pattern, names })
    }

    fn format(&self, moment: &OffsetDateTime) -> Option<String> {
        let date = Date::try_new_gregorian(moment.year(), u8::from(moment.month()), moment.day()).ok()?;
        let time = Time::try_new(
            moment.hour(),
            moment.minute(),
            moment.second(),
            moment.nanosecond(),
        )
        .ok()?;
        let offset = UtcOffset::try_from_seconds(moment.offset().whole_seconds()).ok()?;
        let zone = TimeZone::UNKNOWN
            .with_offset(Some(offset))
            .at_date_time(DateTime { date, time });
        let input = ZonedDateTime { date, time, zone };

        let formatted = self.names.with_pattern_unchecked(&self.pattern).format(&input);
        match formatted.try_write_to_string() {
            Ok(text) => Some(text.into_owned()),
            Err((error, text)) => {
                tracing::debug!(%error, "date pattern rendered with fallback values");
                Some(text.into_owned())
            }
        }
    }
}

fn describe_load_error(error: PatternLoadError) -> String {
    match error {
        PatternLoadError::ConflictingField { .. } => {
            "a field conflicts with an earlier field of another width".to_string()
        }
        PatternLoadError::UnsupportedLength(_) => "a field has an unsupported width".to_string(),
        other => other.to_string(),
    }
}

/// A custom date pattern in `SimpleDateFormat` letters.
///
/// Supported fields are `G y M L d D F E a H h K m s z Z X`, plus `S` for
/// fraction digits right after `ss.`. Repeating a letter picks the width:
/// `MMM` is an abbreviated month name and `MMMM` the full one, `EEEE` the
/// full weekday. `z` is the localized UTC offset (`GMT+1`). Text in single
/// quotes is literal and `''` is an apostrophe. Other letters are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    uts35: String,
}

impl DatePattern {
    pub fn parse(pattern: &str) -> Result<DatePattern, PatternError> {
        let invalid = |message: String| PatternError::InvalidDatePattern {
            pattern: pattern.to_string(),
            message,
        };

        let uts35 = translate(pattern).map_err(invalid)?;
        // Load root names once so field conflicts fail here, not at format time.
        PatternNames::load(&uts35, Locale::UNKNOWN).map_err(invalid)?;
        Ok(DatePattern {
            source: pattern.to_string(),
            uts35,
        })
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    fn render(&self, moment: &OffsetDateTime, locale: &LocaleId) -> String {
        let formatted = NAMES_CACHE.with(|cache| {
            let mut cache = cache.borrow_mut();
            if let Some((_, _, names)) = cache
                .iter()
                .find(|(cached, uts35, _)| cached == locale && *uts35 == self.uts35)
            {
                return names.format(moment);
            }

            let names = PatternNames::load(&self.uts35, locale.to_icu()).ok()?;
            let text = names.format(moment);
            cache.push((*locale, self.uts35.clone(), names));
            text
        });
        formatted.unwrap_or_else(|| moment.to_string())
    }
}

/// Translate `SimpleDateFormat` letters into a UTS 35 pattern.
fn translate(pattern: &str) -> Result<String, String> {
    let mut out = String::new();
    let mut literal = String::new();
    let mut last_letter = None;
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\'' {
            read_quoted(&mut chars, &mut literal).map_err(|()| "unterminated quote".to_string())?;
        } else if !ch.is_ascii_alphabetic() {
            literal.push(ch);
        } else {
            let mut width = 1;
            while chars.next_if_eq(&ch).is_some() {
                width += 1;
            }
            if ch == 'S' {
                if last_letter != Some('s') || literal != "." {
                    return Err("fraction digits 'S' must follow 'ss.'".to_string());
                }
                literal.clear();
                out.push('.');
                out.extend(iter::repeat_n('S', width));
            } else {
                let (symbol, width) =
                    uts35_field(ch, width).ok_or_else(|| format!("unsupported field '{ch}'"))?;
                flush_literal(&mut out, &mut literal);
                out.extend(iter::repeat_n(symbol, width));
            }
            last_letter = Some(ch);
        }
    }

    flush_literal(&mut out, &mut literal);
    Ok(out)
}

/// The UTS 35 symbol and width for a `SimpleDateFormat` field.
fn uts35_field(letter: char, width: usize) -> Option<(char, usize)> {
    let max_width = match letter {
        'G' | 'y' | 'M' | 'L' | 'E' => 4,
        'D' | 'X' => 3,
        'd' | 'H' | 'h' | 'K' | 'm' | 's' => 2,
        'F' | 'a' | 'Z' => 1,
        'z' => return Some(('O', if width >= 4 { 4 } else { 1 })),
        _ => return None,
    };
    Some((letter, width.min(max_width)))
}

fn flush_literal(out: &mut String, literal: &mut String) {
    if literal.is_empty() {
        return;
    }
    out.push('\'');
    out.push_str(&literal.replace('\'', "''"));
    out.push('\'');
    literal.clear();
}

/// Read up to the closing quote; a doubled quote is an apostrophe.
fn read_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), ()> {
    if chars.next_if_eq(&'\'').is_some() {
        out.push('\'');
        return Ok(());
    }
    while let Some(ch) = chars.next() {
        if ch != '\'' {
            out.push(ch);
        } else if chars.next_if_eq(&'\'').is_some() {
            out.push('\'');
        } else {
            return Ok(());
        }
    }
    Err(())
}
