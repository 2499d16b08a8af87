//! Read iCalendar feeds into concrete event occurrences.
//!
//! The pipeline goes bytes → [`LineReader`] → [`ContentLineParser`] →
//! [`EventParser`] → [`expand_event`]. Everything below [`feed`] is
//! synchronous and free of I/O.

const VALUE_DELIMITER: char = ':';
const PARAM_DELIMITER: char = ';';
const PARAM_NAME_DELIMITER: char = '=';

pub mod component;
pub use component::{Anomaly, AnomalySink, Event, EventParser, WarnLog, parse_calendar};

pub mod parser;
pub use parser::{ContentLineParser, InputError, LineReader, ParserError};

pub mod property;
pub use property::{OptionalProperty, Parameters, Property};

pub mod types;

mod expand;
pub use expand::{Occurrence, expand_calendar, expand_event};

pub mod feed;

pub mod settings;
pub use settings::Settings;
