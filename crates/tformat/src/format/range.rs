//! The `range` sub-format: render elements of a sequence argument.
//!
//! `{K}` selects one element, where `K` is an index, `n` (the last element)
//! or `n-K` (the K-th element before the last). `{start;separator;end}` joins
//! the elements from `start` through `end` inclusive. Text outside braces is
//! literal; a single quote toggles a quoted span in which braces and `;` are
//! plain text.

use std::mem;

use winnow::combinator::{alt, preceded};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::format::error::{FormatError, RangeSyntaxError};
use crate::format::write_untyped;
use crate::types::{LocaleId, Value};

/// A compiled range pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePattern {
    segments: Vec<RangeSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RangeSegment {
    Literal(String),
    Element(IndexRef),
    Join {
        start: usize,
        separator: String,
        end: IndexRef,
    },
}

/// An element position, counted from either end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexRef {
    FromStart(usize),
    /// `n` is `FromEnd(0)`, `n-2` is `FromEnd(2)`.
    FromEnd(usize),
}

impl IndexRef {
    /// The absolute position in a sequence of `len` elements, checked.
    fn resolve(self, len: usize) -> Result<usize, FormatError> {
        let index = match self {
            IndexRef::FromStart(index) => to_i64(index),
            IndexRef::FromEnd(offset) => to_i64(len) - to_i64(offset) - 1,
        };
        usize::try_from(index)
            .ok()
            .filter(|index| *index < len)
            .ok_or(FormatError::IndexOutOfRange { index, len })
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Which part of a `{start;separator;end}` block is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Start,
    Separator,
    End,
}

impl RangePattern {
    /// Compile a range pattern such as `{0;, ;n-1} and {n}`.
    pub fn compile(pattern: &str) -> Result<RangePattern, RangeSyntaxError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut block: Option<(Part, [String; 3])> = None;
        let mut in_quote = false;

        for ch in pattern.chars() {
            let Some((part, fields)) = block.as_mut() else {
                match ch {
                    '\'' => in_quote = !in_quote,
                    '{' if !in_quote => block = Some((Part::Start, Default::default())),
                    _ => literal.push(ch),
                }
                continue;
            };

            let field = &mut fields[*part as usize];
            if in_quote {
                if ch == '\'' {
                    in_quote = false;
                } else {
                    field.push(ch);
                }
                continue;
            }
            match ch {
                '\'' => in_quote = true,
                ';' => match part {
                    Part::Start => *part = Part::Separator,
                    Part::Separator => *part = Part::End,
                    Part::End => field.push(ch),
                },
                '}' => {
                    if !literal.is_empty() {
                        segments.push(RangeSegment::Literal(mem::take(&mut literal)));
                    }
                    let [start, separator, end] = mem::take(fields);
                    segments.push(compile_block(start, separator, end)?);
                    block = None;
                }
                _ => field.push(ch),
            }
        }

        if block.is_some() {
            return Err(RangeSyntaxError::UnmatchedBraces);
        }
        if !literal.is_empty() {
            segments.push(RangeSegment::Literal(literal));
        }
        Ok(RangePattern { segments })
    }

    /// Render `elements` with `locale` number and date conventions.
    pub fn format(&self, elements: &[Value], locale: &LocaleId) -> Result<String, FormatError> {
        let mut out = String::new();
        self.format_into(elements, locale, &mut out)?;
        Ok(out)
    }

    pub(crate) fn format_into(
        &self,
        elements: &[Value],
        locale: &LocaleId,
        out: &mut String,
    ) -> Result<(), FormatError> {
        for segment in &self.segments {
            match segment {
                RangeSegment::Literal(text) => out.push_str(text),
                RangeSegment::Element(index) => {
                    let index = index.resolve(elements.len())?;
                    write_untyped(out, &elements[index], locale);
                }
                RangeSegment::Join {
                    start,
                    separator,
                    end,
                } => {
                    let start = IndexRef::FromStart(*start).resolve(elements.len())?;
                    let end = end.resolve(elements.len())?;
                    for (i, element) in elements.iter().enumerate().take(end + 1).skip(start) {
                        if i > start {
                            out.push_str(separator);
                        }
                        write_untyped(out, element, locale);
                    }
                }
            }
        }
        Ok(())
    }
}

fn compile_block(start: String, separator: String, end: String) -> Result<RangeSegment, RangeSyntaxError> {
    if separator.is_empty() && end.is_empty() {
        let index = parse_index(&start).ok_or(RangeSyntaxError::IllegalStartIndex { index: start })?;
        return Ok(RangeSegment::Element(index));
    }

    let Some(IndexRef::FromStart(first)) = parse_index(&start) else {
        return Err(RangeSyntaxError::IllegalStartIndex { index: start });
    };
    let last = parse_index(&end).ok_or(RangeSyntaxError::IllegalEndIndex { index: end })?;
    Ok(RangeSegment::Join {
        start: first,
        separator,
        end: last,
    })
}

/// Parse a whole index field: `7`, `n` or `n-2`.
fn parse_index(text: &str) -> Option<IndexRef> {
    let mut remaining = text;
    let index = index_ref(&mut remaining).ok()?;
    remaining.is_empty().then_some(index)
}

fn index_ref(input: &mut &str) -> ModalResult<IndexRef> {
    alt((
        preceded("n-", number).map(IndexRef::FromEnd),
        "n".value(IndexRef::FromEnd(0)),
        number.map(IndexRef::FromStart),
    ))
    .parse_next(input)
}

fn number(input: &mut &str) -> ModalResult<usize> {
    take_while(1.., |c: char| c.is_ascii_digit())
        .try_map(str::parse::<usize>)
        .parse_next(input)
}
