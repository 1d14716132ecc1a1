//! Pattern compiler and formatter.
//!
//! A pattern is literal text with positional placeholders of the form
//! `{index}`, `{index,type}` or `{index,type,modifier}`. Compilation scans the
//! pattern once with a single character of lookahead and produces an
//! immutable [`CompiledPattern`].
//!
//! In literal text a single `'` opens or closes a quoted run in which braces
//! are plain characters. A doubled `''` is an escaped apostrophe and writes one
//! `'`; it does not toggle quoting twice and vanish, so `it''s` renders `it's`.

use std::fmt::Write as _;
use std::mem;

use crate::format::error::{FormatError, PatternError};
use crate::format::sub_format::SubFormat;
use crate::types::{LocaleId, Value};

/// A pattern compiled for one locale.
///
/// Immutable once built and safe to share between threads.
///
/// # Example
///
/// ```
/// use tformat::{CompiledPattern, LocaleId, args};
///
/// let pattern = CompiledPattern::compile("{0} has {1} points", &LocaleId::US).unwrap();
/// assert_eq!(pattern.format(Some(args!["Ana", 1500].as_slice())).unwrap(), "Ana has 1,500 points");
/// assert_eq!(pattern.format(Some(args!["Ana"].as_slice())).unwrap(), "Ana has {1} points");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPattern {
    source: String,
    locale: LocaleId,
    segments: Vec<Segment>,
}

/// One piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A placeholder bound to an argument position.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub index: usize,
    pub sub_format: SubFormat,
}

/// Which part of the input the scanner is reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Part {
    Literal,
    Index,
    Type,
    Modifier,
}

impl Part {
    fn next(self) -> Part {
        match self {
            Part::Literal => Part::Index,
            Part::Index => Part::Type,
            Part::Type | Part::Modifier => Part::Modifier,
        }
    }
}

/// Text collected for the placeholder being scanned.
#[derive(Debug, Default)]
struct PlaceholderText {
    index: String,
    type_keyword: String,
    modifier: String,
}

impl PlaceholderText {
    fn field(&mut self, part: Part) -> &mut String {
        match part {
            Part::Index | Part::Literal => &mut self.index,
            Part::Type => &mut self.type_keyword,
            Part::Modifier => &mut self.modifier,
        }
    }

    fn compile(self) -> Result<Placeholder, PatternError> {
        // No trimming: `{ 0 }` is not a valid index.
        let index: i64 = self.index.parse().map_err(|_| PatternError::InvalidArgumentIndex {
            index: self.index.clone(),
        })?;
        let index = usize::try_from(index).map_err(|_| PatternError::NegativeArgumentIndex { index })?;
        let sub_format = SubFormat::from_parts(&self.type_keyword, &self.modifier)?;
        Ok(Placeholder { index, sub_format })
    }
}

impl CompiledPattern {
    /// Compile `raw` for `locale`.
    pub fn compile(raw: &str, locale: &LocaleId) -> Result<CompiledPattern, PatternError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut placeholder = PlaceholderText::default();
        let mut part = Part::Literal;
        let mut depth = 0usize;
        let mut in_quote = false;

        let mut chars = raw.chars().peekable();
        while let Some(ch) = chars.next() {
            if part == Part::Literal {
                match ch {
                    '\'' if chars.next_if_eq(&'\'').is_some() => literal.push('\''),
                    '\'' => in_quote = !in_quote,
                    '{' if !in_quote && chars.peek() != Some(&'%') => {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(mem::take(&mut literal)));
                        }
                        part = Part::Index;
                    }
                    _ => literal.push(ch),
                }
                continue;
            }

            if in_quote {
                if ch == '\'' {
                    in_quote = false;
                } else {
                    placeholder.field(part).push(ch);
                }
                continue;
            }

            match ch {
                ',' if part < Part::Modifier => part = part.next(),
                '{' => {
                    depth += 1;
                    placeholder.field(part).push(ch);
                }
                '}' if depth == 0 => {
                    let text = mem::take(&mut placeholder);
                    segments.push(Segment::Placeholder(text.compile()?));
                    part = Part::Literal;
                }
                '}' => {
                    depth -= 1;
                    placeholder.field(part).push(ch);
                }
                ' ' if part == Part::Type && placeholder.type_keyword.is_empty() => {}
                '\'' => in_quote = true,
                _ => placeholder.field(part).push(ch),
            }
        }

        if part != Part::Literal {
            return Err(PatternError::UnmatchedBraces);
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(CompiledPattern {
            source: raw.to_string(),
            locale: *locale,
            segments,
        })
    }

    /// Format with `args`.
    ///
    /// Placeholders without a matching argument are written back as
    /// `{index}`, and null arguments render as `null`.
    pub fn format(&self, args: Option<&[Value]>) -> Result<String, FormatError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(placeholder) => {
                    match args.and_then(|args| args.get(placeholder.index)) {
                        None => {
                            let _ = write!(out, "{{{}}}", placeholder.index);
                        }
                        Some(Value::Null) => out.push_str("null"),
                        Some(value) => placeholder.sub_format.format(value, &self.locale, &mut out)?,
                    }
                }
            }
        }
        Ok(out)
    }

    /// The pattern text this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn locale(&self) -> LocaleId {
        self.locale
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            Segment::Literal(_) => None,
        })
    }
}
