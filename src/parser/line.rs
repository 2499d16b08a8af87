//! Unfold a calendar document into logical lines.
//!
//! A physical line starting with a space or a horizontal tab continues the
//! previous logical line: its first octet is dropped and the rest is appended
//! as is. Folding happens on bytes, so a multi-octet character split across
//! two physical lines is joined before the logical line gets decoded.
//!
//! # Examples
//!
//! ```rust
//! let input = b"SUMMARY:Team\r\n  meeting\r\nUID:1\r\n";
//! let lines = icalfeed::LineReader::from_slice(input)
//!     .map(|line| line.map(|line| line.to_string()))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(lines, ["SUMMARY:Team meeting", "UID:1"]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::iter::Peekable;

use crate::parser::InputError;

/// A logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub inner: Cow<'a, str>,
    number: usize,
}

impl<'a> Line<'a> {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// 1-based number of the physical line this logical line starts on.
    #[inline]
    pub fn number(&self) -> usize {
        self.number
    }
}

impl fmt::Display for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Physical lines of a byte slice, split on `\n`.
pub struct BytesLines<'a>(&'a [u8]);

impl<'a> Iterator for BytesLines<'a> {
    type Item = Cow<'a, [u8]>;

    fn next(&mut self) -> Option<Self::Item> {
        let remaining: &'a [u8] = self.0;
        if remaining.is_empty() {
            return None;
        }
        let (line, rest) = match remaining.iter().position(|&b| b == b'\n') {
            Some(pos) => (&remaining[..pos], &remaining[pos + 1..]),
            None => (remaining, &remaining[remaining.len()..]),
        };
        self.0 = rest;
        Some(Cow::Borrowed(line))
    }
}

#[inline]
fn is_blank(line: &[u8]) -> bool {
    line.is_empty() || line == b"\r"
}

#[inline]
fn is_continuation(line: &[u8]) -> bool {
    matches!(line.first(), Some(b' ' | b'\t'))
}

fn trim_cr(line: Cow<'_, [u8]>) -> Cow<'_, [u8]> {
    match line {
        Cow::Borrowed(line) => Cow::Borrowed(line.strip_suffix(b"\r").unwrap_or(line)),
        Cow::Owned(mut line) => {
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Cow::Owned(line)
        }
    }
}

fn decode(line: Cow<'_, [u8]>, number: usize) -> Result<Line<'_>, InputError> {
    let inner = match line {
        Cow::Borrowed(line) => Cow::Borrowed(
            std::str::from_utf8(line).map_err(|_| InputError::InvalidUtf8(number))?,
        ),
        Cow::Owned(line) => {
            Cow::Owned(String::from_utf8(line).map_err(|_| InputError::InvalidUtf8(number))?)
        }
    };
    Ok(Line { inner, number })
}

/// Turns physical lines into logical lines.
///
/// Empty physical lines are skipped and do not interrupt folding.
pub struct LineReader<'a, I: Iterator<Item = Cow<'a, [u8]>>> {
    lines: Peekable<I>,
    number: usize,
}

impl<'a> LineReader<'a, BytesLines<'a>> {
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Self::new(BytesLines(slice))
    }
}

impl<'a, I: Iterator<Item = Cow<'a, [u8]>>> LineReader<'a, I> {
    /// Read from physical lines that are already split on line terminators.
    /// A single trailing `\r` per line is ignored.
    pub fn new(lines: I) -> Self {
        LineReader {
            lines: lines.peekable(),
            number: 0,
        }
    }
}

impl<'a, I: Iterator<Item = Cow<'a, [u8]>>> Iterator for LineReader<'a, I> {
    type Item = Result<Line<'a>, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        let head = loop {
            let line = self.lines.next()?;
            self.number += 1;
            if !is_blank(&line) {
                break line;
            }
        };
        let number = self.number;

        // Continuations are consumed below together with their head line,
        // so one can only show up here before the first logical line.
        if is_continuation(&head) {
            return Some(Err(InputError::LeadingContinuation(number)));
        }

        let mut head = trim_cr(head);
        while let Some(next) = self.lines.peek() {
            if is_blank(next) {
                self.lines.next();
                self.number += 1;
                continue;
            }
            if !is_continuation(next) {
                break;
            }
            let Some(continuation) = self.lines.next() else {
                break;
            };
            self.number += 1;
            let continuation = trim_cr(continuation);
            head.to_mut().extend_from_slice(&continuation[1..]);
        }

        Some(decode(head, number))
    }
}
