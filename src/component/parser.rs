use std::borrow::Cow;

use crate::{
    ContentLineParser, ParserError,
    component::{Anomaly, AnomalySink, Event},
    parser::BytesLines,
    property::Property,
};

/// Yields the events of a document, one per `BEGIN:VEVENT`/`END:VEVENT` pair.
///
/// Only `VEVENT` blocks are recognised. Properties outside of one, a second
/// `BEGIN` before the `END`, and an `END` without `BEGIN` are reported to the
/// sink and skipped. An event still open when the input ends is dropped.
pub struct EventParser<'a, I: Iterator<Item = Cow<'a, [u8]>>, S: AnomalySink = Vec<Anomaly>> {
    line_parser: ContentLineParser<'a, I>,
    current: Option<Event>,
    sink: S,
}

impl<'a> EventParser<'a, BytesLines<'a>> {
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Self::new(ContentLineParser::from_slice(slice))
    }
}

impl<'a, I: Iterator<Item = Cow<'a, [u8]>>> EventParser<'a, I> {
    pub fn new(line_parser: ContentLineParser<'a, I>) -> Self {
        EventParser {
            line_parser,
            current: None,
            sink: Vec::new(),
        }
    }
}

impl<'a, I: Iterator<Item = Cow<'a, [u8]>>, S: AnomalySink> EventParser<'a, I, S> {
    pub fn with_sink<T: AnomalySink>(self, sink: T) -> EventParser<'a, I, T> {
        EventParser {
            line_parser: self.line_parser,
            current: self.current,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn is_marker(prop: &Property, marker: &str) -> bool {
        prop.key() == marker && prop.value() == "VEVENT"
    }
}

impl<'a, I: Iterator<Item = Cow<'a, [u8]>>, S: AnomalySink> Iterator for EventParser<'a, I, S> {
    type Item = Result<Event, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let prop = match self.line_parser.next()? {
                Ok(prop) => prop,
                Err(err) => return Some(Err(err.into())),
            };

            if Self::is_marker(&prop, "BEGIN") {
                if self.current.replace(Event::default()).is_some() {
                    self.sink.record(Anomaly::BeginWithoutEnd);
                }
            } else if Self::is_marker(&prop, "END") {
                match self.current.take() {
                    Some(event) => return Some(Ok(event)),
                    None => self.sink.record(Anomaly::EndWithoutBegin),
                }
            } else if let Some(event) = self.current.as_mut() {
                event.add_property(prop);
            } else {
                self.sink.record(Anomaly::PropertyOutsideEvent {
                    key: prop.key().to_owned(),
                    value: prop.value().to_owned(),
                });
            }
        }
    }
}
