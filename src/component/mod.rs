//! Group properties into events.
//!
//! # Examples
//!
//! ```rust
//! let input = b"BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nUID:1\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
//! let mut anomalies: Vec<icalfeed::Anomaly> = vec![];
//! let events = icalfeed::parse_calendar(input, &mut anomalies).unwrap();
//! assert_eq!(events.len(), 1);
//! // The VCALENDAR markers sit outside of any event
//! assert_eq!(anomalies.len(), 2);
//! ```

mod anomaly;
pub use anomaly::{Anomaly, AnomalySink, WarnLog};

mod event;
pub use event::Event;

mod parser;
pub use parser::EventParser;

use crate::ParserError;

/// Parse all complete events of a document.
pub fn parse_calendar<S: AnomalySink>(input: &[u8], sink: S) -> Result<Vec<Event>, ParserError> {
    EventParser::from_slice(input).with_sink(sink).collect()
}
