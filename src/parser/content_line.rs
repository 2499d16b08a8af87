//! Split logical lines into properties.
//!
//! Each logical line is cut at its first `:` into the raw key (property name
//! plus any `;NAME=VALUE` parameters) and the value. A line without `:` is
//! kept as a key with an empty value. Parameters stay unparsed until
//! [`Property::parameters`] is first called.
//!
//! # Examples
//!
//! ```rust
//! let input = b"DTSTART;TZID=Europe/Berlin:20240101T090000\r\n";
//! let prop = icalfeed::ContentLineParser::from_slice(input)
//!     .next()
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(prop.key(), "DTSTART;TZID=Europe/Berlin");
//! assert_eq!(prop.value(), "20240101T090000");
//! ```

use std::borrow::Cow;
use std::iter::Iterator;

use super::{BytesLines, InputError, Line, LineReader};
use crate::{VALUE_DELIMITER, property::Property};

pub struct ContentLineParser<'a, T: Iterator<Item = Cow<'a, [u8]>>>(LineReader<'a, T>);

impl<'a> ContentLineParser<'a, BytesLines<'a>> {
    pub fn from_slice(slice: &'a [u8]) -> Self {
        ContentLineParser(LineReader::from_slice(slice))
    }
}

impl<'a, T: Iterator<Item = Cow<'a, [u8]>>> ContentLineParser<'a, T> {
    pub fn new(line_reader: LineReader<'a, T>) -> Self {
        ContentLineParser(line_reader)
    }

    fn parse(line: Line) -> Property {
        match line.as_str().split_once(VALUE_DELIMITER) {
            Some((key, value)) => Property::new(key, value),
            None => Property::new(line.as_str(), ""),
        }
    }
}

impl<'a, T: Iterator<Item = Cow<'a, [u8]>>> Iterator for ContentLineParser<'a, T> {
    type Item = Result<Property, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.0.next()?.map(Self::parse))
    }
}
