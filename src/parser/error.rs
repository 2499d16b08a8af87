use crate::types::CalDateTimeError;

/// Structural problems with the raw document.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Line {0}: continuation line without a preceding line.")]
    LeadingContinuation(usize),
    #[error("Line {0}: not valid UTF-8.")]
    InvalidUtf8(usize),
    #[error("Parameter \"{segment}\" of \"{key}\" is missing a \"=\".")]
    ParamWithoutValue { key: String, segment: String },
}

/// Errors that abort processing of a whole document.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("malformed input: {0}")]
    MalformedInput(#[from] InputError),
    #[error("malformed date: {0}")]
    MalformedDate(#[from] CalDateTimeError),
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),
    #[error("invalid recurrence rule: {0}")]
    InvalidRecurrenceRule(#[from] rrule::RRuleError),
    #[error("missing property: {0}")]
    MissingRequiredProperty(&'static str),
}
