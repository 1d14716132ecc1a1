//! Locale-aware number formatting.
//!
//! Digits, grouping and separators come from ICU4X decimal data. Formatters
//! are cached per thread, keyed by locale and grouping, so compiled patterns
//! stay plain data that can be shared across threads.

use std::cell::RefCell;
use std::iter::Peekable;
use std::mem;
use std::str::Chars;

use fixed_decimal::{Decimal, FloatPrecision};
use icu_decimal::DecimalFormatter;
use icu_decimal::options::{DecimalFormatterOptions, GroupingStrategy};

use crate::format::cldr::{self, Currency};
use crate::format::error::PatternError;
use crate::format::sub_format::find_keyword;
use crate::types::{LocaleId, Value};

thread_local! {
    /// Per-thread cache of decimal formatters keyed by locale and grouping.
    static FORMATTER_CACHE: RefCell<Vec<(LocaleId, bool, DecimalFormatter)>> = const { RefCell::new(Vec::new()) };
}

const NUMBER_MODIFIERS: &[&str] = &["", "currency", "percent", "integer"];

/// A numeric argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Numeric {
    Integer(i64),
    Float(f64),
}

impl Numeric {
    pub(crate) fn from_value(value: &Value) -> Option<Numeric> {
        match value {
            Value::Integer(n) => Some(Numeric::Integer(*n)),
            Value::Float(f) => Some(Numeric::Float(*f)),
            _ => None,
        }
    }

    pub(crate) fn as_f64(self) -> f64 {
        match self {
            Numeric::Integer(n) => n as f64,
            Numeric::Float(f) => f,
        }
    }

    fn scale(self, multiplier: i64) -> Numeric {
        if multiplier == 1 {
            return self;
        }
        match self {
            Numeric::Integer(n) => n
                .checked_mul(multiplier)
                .map_or(Numeric::Float(n as f64 * multiplier as f64), Numeric::Integer),
            Numeric::Float(f) => Numeric::Float(f * multiplier as f64),
        }
    }

    fn is_negative(self) -> bool {
        match self {
            Numeric::Integer(n) => n < 0,
            Numeric::Float(f) => f < 0.0,
        }
    }

    /// The absolute value as a decimal, or `None` for NaN and infinities.
    fn magnitude(self) -> Option<Decimal> {
        match self {
            Numeric::Integer(n) => Some(Decimal::from(n.unsigned_abs())),
            Numeric::Float(f) => Decimal::try_from_f64(f.abs(), FloatPrecision::RoundTrip).ok(),
        }
    }

    fn non_finite_text(self) -> &'static str {
        match self {
            Numeric::Float(f) if f.is_nan() => "NaN",
            _ => "∞",
        }
    }
}

/// Digit layout for one number style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Digits {
    min_integer: i16,
    min_fraction: i16,
    max_fraction: i16,
    grouping: bool,
}

impl Digits {
    const DEFAULT: Digits = Digits {
        min_integer: 1,
        min_fraction: 0,
        max_fraction: 3,
        grouping: true,
    };

    const INTEGER: Digits = Digits {
        min_integer: 1,
        min_fraction: 0,
        max_fraction: 0,
        grouping: true,
    };

    const fn with_fraction(self, fraction: i16) -> Digits {
        Digits {
            min_fraction: fraction,
            max_fraction: fraction,
            ..self
        }
    }
}

/// A number sub-format.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberStyle {
    /// Grouped, at most three fraction digits.
    Default,
    /// The locale's currency pattern, symbol and minor units.
    Currency,
    /// The locale's percent pattern: scaled by 100, no fraction digits.
    Percent,
    /// Rounded to a whole number.
    Integer,
    /// A custom decimal pattern such as `#,##0.00`.
    Pattern(DecimalPattern),
}

impl NumberStyle {
    /// Resolve a `number` modifier to a style.
    pub(crate) fn from_modifier(modifier: &str) -> Result<NumberStyle, PatternError> {
        match find_keyword(modifier, NUMBER_MODIFIERS) {
            Some("") => Ok(NumberStyle::Default),
            Some("currency") => Ok(NumberStyle::Currency),
            Some("percent") => Ok(NumberStyle::Percent),
            Some("integer") => Ok(NumberStyle::Integer),
            _ => DecimalPattern::parse(modifier).map(NumberStyle::Pattern),
        }
    }

    pub(crate) fn format(&self, number: Numeric, locale: &LocaleId) -> String {
        match self {
            NumberStyle::Default => signed(number, Digits::DEFAULT, locale),
            NumberStyle::Integer => signed(number, Digits::INTEGER, locale),
            NumberStyle::Percent => {
                format_locale_pattern(cldr::percent_pattern(locale), None, number, locale)
            }
            NumberStyle::Currency => {
                let fraction = Currency::for_locale(locale).fraction_digits;
                format_locale_pattern(cldr::currency_pattern(locale), Some(fraction), number, locale)
            }
            NumberStyle::Pattern(pattern) => pattern.format(number, locale),
        }
    }
}

/// Format with the default number style, as used for untyped placeholders.
pub(crate) fn format_default(number: Numeric, locale: &LocaleId) -> String {
    NumberStyle::Default.format(number, locale)
}

fn signed(number: Numeric, digits: Digits, locale: &LocaleId) -> String {
    let sign = if number.is_negative() { "-" } else { "" };
    let body = format_digits(number, digits, locale);
    format!("{sign}{body}")
}

/// Format the absolute value of `number` with the locale's digits.
fn format_digits(number: Numeric, digits: Digits, locale: &LocaleId) -> String {
    let Some(mut decimal) = number.magnitude() else {
        return number.non_finite_text().to_string();
    };
    // Only round when the value is more precise than allowed; rounding pads otherwise.
    if *decimal.magnitude_range().start() < -digits.max_fraction {
        decimal.round(-digits.max_fraction);
    }
    decimal.trim_end();
    decimal.pad_end(-digits.min_fraction);
    decimal.pad_start(digits.min_integer);

    with_formatter(locale, digits.grouping, |formatter| {
        formatter.format(&decimal).to_string()
    })
    .unwrap_or_else(|| decimal.to_string())
}

/// Format with one of the locale's standard patterns, overriding its
/// fraction digits when given.
fn format_locale_pattern(
    pattern: &str,
    fraction: Option<i16>,
    number: Numeric,
    locale: &LocaleId,
) -> String {
    match DecimalPattern::parse(pattern) {
        Ok(mut parsed) => {
            if let Some(fraction) = fraction {
                parsed.digits = parsed.digits.with_fraction(fraction);
            }
            parsed.format(number, locale)
        }
        Err(error) => {
            tracing::debug!(%error, %locale, "locale number pattern is unusable");
            format_default(number, locale)
        }
    }
}

/// Run `f` with a cached formatter for `locale`, building one if needed.
fn with_formatter<T>(
    locale: &LocaleId,
    grouping: bool,
    f: impl FnOnce(&DecimalFormatter) -> T,
) -> Option<T> {
    FORMATTER_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some((_, _, formatter)) = cache
            .iter()
            .find(|(cached, cached_grouping, _)| cached == locale && *cached_grouping == grouping)
        {
            return Some(f(formatter));
        }

        let mut options = DecimalFormatterOptions::default();
        options.grouping_strategy = Some(if grouping {
            GroupingStrategy::Always
        } else {
            GroupingStrategy::Never
        });
        let formatter = DecimalFormatter::try_new(locale.to_icu().into(), options).ok()?;
        let result = f(&formatter);
        cache.push((*locale, grouping, formatter));
        Some(result)
    })
}

/// A compiled custom decimal pattern (`#,##0.00`, `0.#%`, `#;(#)`).
///
/// Supported: `#` and `0` digits, `,` grouping, one `.`, literal prefix and
/// suffix text, quoted literals, `%` and `‰` multipliers, `¤` for the symbol
/// of the region's currency and an optional `;` negative subpattern whose affixes
/// replace the default `-` sign. Grouping size follows the locale.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalPattern {
    positive: Affixes,
    negative: Option<Affixes>,
    digits: Digits,
    multiplier: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Affixes {
    prefix: Vec<AffixPart>,
    suffix: Vec<AffixPart>,
}

#[derive(Debug, Clone, PartialEq)]
enum AffixPart {
    Text(String),
    Currency,
}

#[derive(Debug, Default)]
struct Subpattern {
    affixes: Affixes,
    number: String,
    multiplier: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Prefix,
    Number,
    Suffix,
}

impl DecimalPattern {
    /// Compile a custom decimal pattern.
    pub fn parse(pattern: &str) -> Result<DecimalPattern, PatternError> {
        let invalid = |message: &str| PatternError::InvalidNumberPattern {
            pattern: pattern.to_string(),
            message: message.to_string(),
        };

        let mut chars = pattern.chars().peekable();
        let positive = scan_subpattern(&mut chars).map_err(invalid)?;
        let negative = if chars.next_if_eq(&';').is_some() {
            let negative = scan_subpattern(&mut chars).map_err(invalid)?;
            if chars.peek().is_some() {
                return Err(invalid("more than one ';'"));
            }
            Some(negative.affixes)
        } else {
            None
        };

        let digits = parse_digits(&positive.number).map_err(invalid)?;
        Ok(DecimalPattern {
            positive: positive.affixes,
            negative,
            digits,
            multiplier: positive.multiplier.unwrap_or(1),
        })
    }

    fn format(&self, number: Numeric, locale: &LocaleId) -> String {
        let scaled = number.scale(self.multiplier);
        let body = format_digits(scaled, self.digits, locale);
        let (affixes, sign) = match (&self.negative, scaled.is_negative()) {
            (Some(negative), true) => (negative, ""),
            (None, true) => (&self.positive, "-"),
            (_, false) => (&self.positive, ""),
        };
        format!(
            "{sign}{}{body}{}",
            render_affix(&affixes.prefix, locale),
            render_affix(&affixes.suffix, locale)
        )
    }
}

fn render_affix(parts: &[AffixPart], locale: &LocaleId) -> String {
    parts
        .iter()
        .map(|part| match part {
            AffixPart::Text(text) => text.as_str(),
            AffixPart::Currency => Currency::for_locale(locale).symbol,
        })
        .collect()
}

/// Scan one subpattern, stopping before an unquoted `;`.
fn scan_subpattern(chars: &mut Peekable<Chars<'_>>) -> Result<Subpattern, &'static str> {
    let mut sub = Subpattern::default();
    let mut phase = Phase::Prefix;
    let mut text = String::new();
    let mut in_quote = false;

    while let Some(&ch) = chars.peek() {
        if in_quote {
            chars.next();
            if ch != '\'' {
                text.push(ch);
            } else if chars.next_if_eq(&'\'').is_some() {
                text.push('\'');
            } else {
                in_quote = false;
            }
            continue;
        }

        match ch {
            ';' => break,
            '#' | '0' | ',' | '.' => {
                match phase {
                    Phase::Prefix => {
                        flush(&mut sub.affixes, phase, &mut text);
                        phase = Phase::Number;
                    }
                    Phase::Number => {}
                    Phase::Suffix => return Err("digit characters after suffix"),
                }
                sub.number.push(ch);
                chars.next();
            }
            _ => {
                chars.next();
                if phase == Phase::Number {
                    phase = Phase::Suffix;
                }
                match ch {
                    '\'' => {
                        if chars.next_if_eq(&'\'').is_some() {
                            text.push('\'');
                        } else {
                            in_quote = true;
                        }
                    }
                    '%' | '‰' => {
                        let multiplier = if ch == '%' { 100 } else { 1000 };
                        if sub.multiplier.is_some_and(|m| m != multiplier) {
                            return Err("both percent and per mille");
                        }
                        sub.multiplier = Some(multiplier);
                        text.push(ch);
                    }
                    '¤' => {
                        flush(&mut sub.affixes, phase, &mut text);
                        push_affix(&mut sub.affixes, phase, AffixPart::Currency);
                    }
                    _ => text.push(ch),
                }
            }
        }
    }

    if in_quote {
        return Err("unterminated quote");
    }
    flush(&mut sub.affixes, phase, &mut text);
    Ok(sub)
}

fn flush(affixes: &mut Affixes, phase: Phase, text: &mut String) {
    if !text.is_empty() {
        push_affix(affixes, phase, AffixPart::Text(mem::take(text)));
    }
}

fn push_affix(affixes: &mut Affixes, phase: Phase, part: AffixPart) {
    match phase {
        Phase::Prefix => affixes.prefix.push(part),
        Phase::Number | Phase::Suffix => affixes.suffix.push(part),
    }
}

/// Read the digit layout from the `#,##0.00` part of a pattern.
fn parse_digits(number: &str) -> Result<Digits, &'static str> {
    if number.is_empty() {
        return Err("missing digit pattern");
    }
    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (number, ""),
    };
    if fraction.contains('.') {
        return Err("multiple decimal separators");
    }
    if integer.ends_with(',') {
        return Err("grouping separator at end of integer part");
    }

    let mut min_integer: i16 = 0;
    let mut grouping = false;
    for ch in integer.chars() {
        match ch {
            '#' if min_integer > 0 => return Err("unexpected '#' after '0'"),
            '0' => min_integer = min_integer.saturating_add(1),
            ',' => grouping = true,
            _ => {}
        }
    }

    let mut min_fraction: i16 = 0;
    let mut optional_fraction: i16 = 0;
    for ch in fraction.chars() {
        match ch {
            '0' if optional_fraction > 0 => return Err("unexpected '0' after '#'"),
            '0' => min_fraction = min_fraction.saturating_add(1),
            '#' => optional_fraction = optional_fraction.saturating_add(1),
            _ => return Err("grouping separator in fraction"),
        }
    }

    Ok(Digits {
        min_integer,
        min_fraction,
        max_fraction: min_fraction.saturating_add(optional_fraction),
        grouping,
    })
}
