//! Parser for `.properties` translation files.
//!
//! Handles `#` and `!` comments, `=`, `:` or whitespace between key and
//! value, backslash line continuations and the escapes `\t \n \r \f \\` and
//! `\uXXXX`. A high and low surrogate written as two `\u` escapes decode to
//! one character. Any other escaped character stands for itself.

use thiserror::Error;
use winnow::combinator::{alt, cut_err, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode, StrContext};
use winnow::prelude::*;
use winnow::token::{any, none_of, one_of, take_while};

/// A line that is not valid properties syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{line}: {message}")]
pub struct PropertiesError {
    /// 1-based line where the offending entry starts.
    pub line: usize,
    pub message: String,
}

/// Parse properties text into key/value pairs in file order.
///
/// Duplicate keys are kept; collecting into a map lets the later one win.
///
/// # Example
///
/// ```
/// use tformat::loader::parse_properties;
///
/// let entries = parse_properties("# greeting\nhello = Hallo {0}!\nbye: Tsch\\u00fcss\n").unwrap();
/// assert_eq!(
///     entries,
///     vec![
///         ("hello".to_string(), "Hallo {0}!".to_string()),
///         ("bye".to_string(), "Tschüss".to_string()),
///     ]
/// );
/// ```
pub fn parse_properties(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    logical_lines(text)
        .into_iter()
        .map(|(line, content)| {
            let mut remaining = content.as_str();
            entry(&mut remaining).map_err(|e| PropertiesError {
                line,
                message: describe(e),
            })
        })
        .collect()
}

fn describe(error: ErrMode<ContextError>) -> String {
    match error.into_inner() {
        Ok(inner) if inner.context().next().is_some() => format!("malformed entry: {inner}"),
        _ => "malformed entry".to_string(),
    }
}

/// Join continued lines and drop blanks and comments.
///
/// Returns each logical line with the number of its first physical line.
fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (index, raw) in text.lines().enumerate() {
        let trimmed = raw.trim_start_matches([' ', '\t', '\x0c']);
        let (start, mut buffer) = match pending.take() {
            Some(pending) => pending,
            None if trimmed.is_empty() || trimmed.starts_with(['#', '!']) => continue,
            None => (index + 1, String::new()),
        };

        let trailing_backslashes = trimmed.chars().rev().take_while(|c| *c == '\\').count();
        if trailing_backslashes % 2 == 1 {
            buffer.push_str(&trimmed[..trimmed.len() - 1]);
            pending = Some((start, buffer));
        } else {
            buffer.push_str(trimmed);
            lines.push((start, buffer));
        }
    }

    lines.extend(pending);
    lines
}

fn entry(input: &mut &str) -> ModalResult<(String, String)> {
    let key = key.parse_next(input)?;
    separator.parse_next(input)?;
    let value = value.parse_next(input)?;
    Ok((key, value))
}

fn key(input: &mut &str) -> ModalResult<String> {
    repeat(0.., alt((escape, none_of(['=', ':', ' ', '\t', '\x0c', '\\']))))
        .fold(String::new, push_char)
        .parse_next(input)
}

fn value(input: &mut &str) -> ModalResult<String> {
    repeat(0.., alt((escape, none_of('\\'))))
        .fold(String::new, push_char)
        .parse_next(input)
}

fn push_char(mut text: String, ch: char) -> String {
    text.push(ch);
    text
}

fn separator(input: &mut &str) -> ModalResult<()> {
    (blank, opt(one_of(['=', ':'])), blank).void().parse_next(input)
}

fn blank(input: &mut &str) -> ModalResult<()> {
    take_while(0.., [' ', '\t', '\x0c']).void().parse_next(input)
}

fn escape(input: &mut &str) -> ModalResult<char> {
    preceded(
        '\\',
        alt((
            preceded('u', cut_err(unicode)),
            't'.value('\t'),
            'n'.value('\n'),
            'r'.value('\r'),
            'f'.value('\x0c'),
            any,
        )),
    )
    .parse_next(input)
}

fn unicode(input: &mut &str) -> ModalResult<char> {
    alt((
        (high_surrogate, preceded("\\u", low_surrogate))
            .map(|(high, low)| 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)),
        code_unit,
    ))
    .verify_map(char::from_u32)
    .context(StrContext::Label("unicode escape"))
    .parse_next(input)
}

fn high_surrogate(input: &mut &str) -> ModalResult<u32> {
    code_unit
        .verify(|unit: &u32| (0xD800..0xDC00).contains(unit))
        .parse_next(input)
}

fn low_surrogate(input: &mut &str) -> ModalResult<u32> {
    code_unit
        .verify(|unit: &u32| (0xDC00..0xE000).contains(unit))
        .parse_next(input)
}

/// Four hex digits as one UTF-16 code unit.
fn code_unit(input: &mut &str) -> ModalResult<u32> {
    take_while(4, |c: char| c.is_ascii_hexdigit())
        .try_map(|hex| u32::from_str_radix(hex, 16))
        .parse_next(input)
}
