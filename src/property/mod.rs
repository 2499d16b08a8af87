use std::cell::OnceCell;
use std::collections::HashMap;

use chrono::DateTime;
use derive_more::Deref;

use crate::{
    PARAM_DELIMITER, PARAM_NAME_DELIMITER,
    parser::{InputError, ParserError},
    types::{Tz, parse_date, parse_date_time},
};

/// Parameters of a property, keyed by upper-cased parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Parameters(HashMap<String, String>);

impl Parameters {
    /// Parse the parameters out of a raw property key such as
    /// `DTSTART;TZID=Europe/Berlin;VALUE=DATE-TIME`.
    pub fn parse(key: &str) -> Result<Self, InputError> {
        let mut params = HashMap::new();
        for segment in key.split(PARAM_DELIMITER).skip(1) {
            let Some((name, value)) = segment.split_once(PARAM_NAME_DELIMITER) else {
                return Err(InputError::ParamWithoutValue {
                    key: key.to_owned(),
                    segment: segment.to_owned(),
                });
            };
            params.insert(name.to_uppercase(), value.to_owned());
        }
        Ok(Self(params))
    }

    #[inline]
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[inline]
    pub fn get_tzid(&self) -> Option<&str> {
        self.get_param("TZID")
    }

    #[inline]
    pub fn get_value_type(&self) -> Option<&str> {
        self.get_param("VALUE")
    }

    /// `VALUE=DATE`, i.e. no time of day.
    #[inline]
    pub fn is_date(&self) -> bool {
        self.get_value_type()
            .is_some_and(|value| value.eq_ignore_ascii_case("DATE"))
    }
}

/// One `KEY[;PARAM=VALUE...]:VALUE` line.
#[derive(Debug, Clone)]
pub struct Property {
    key: String,
    value: String,
    params: OnceCell<Result<Parameters, InputError>>,
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl Eq for Property {}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            params: OnceCell::new(),
        }
    }

    /// The raw key, parameters included.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The property name without parameters.
    #[inline]
    pub fn name(&self) -> &str {
        self.key
            .split_once(PARAM_DELIMITER)
            .map_or(self.key.as_str(), |(name, _)| name)
    }

    /// Whether this is a `name` property, with or without parameters.
    pub fn is_named(&self, name: &str) -> bool {
        self.key
            .strip_prefix(name)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(PARAM_DELIMITER))
    }

    /// Parsed on first access, then cached. A malformed parameter segment
    /// fails every access.
    pub fn parameters(&self) -> Result<&Parameters, InputError> {
        self.params
            .get_or_init(|| Parameters::parse(&self.key))
            .as_ref()
            .map_err(Clone::clone)
    }

    fn timezone(&self) -> Result<Tz, ParserError> {
        match self.parameters()?.get_tzid() {
            Some(tzid) => {
                Tz::from_tzid(tzid).ok_or_else(|| ParserError::UnknownTimezone(tzid.to_owned()))
            }
            None => Ok(Tz::Local),
        }
    }

    fn resolve(&self, value: &str, tz: Tz) -> Result<DateTime<Tz>, ParserError> {
        if self.parameters()?.is_date() {
            Ok(parse_date(value, tz)?)
        } else {
            Ok(parse_date_time(value, tz)?)
        }
    }

    /// Resolve the value as a date (`VALUE=DATE`, midnight in the zone) or a
    /// date-time. `TZID` picks the zone, falling back to the local one; a
    /// trailing `Z` means UTC whatever the `TZID` says.
    pub fn as_date(&self) -> Result<DateTime<Tz>, ParserError> {
        let tz = self.timezone()?;
        self.resolve(&self.value, tz)
    }

    /// Like [`Property::as_date`] for comma-separated value lists (`EXDATE`).
    pub fn as_dates(&self) -> Result<Vec<DateTime<Tz>>, ParserError> {
        let tz = self.timezone()?;
        self.value
            .trim_end_matches(',')
            .split(',')
            .map(|value| self.resolve(value, tz))
            .collect()
    }
}

/// Accessors for properties that may be missing from an event.
///
/// A missing property yields the default or `None`; only a property that is
/// present and malformed produces an error.
pub trait OptionalProperty<'p> {
    fn value_or(self, default: &'p str) -> &'p str;

    fn as_date(self) -> Result<Option<DateTime<Tz>>, ParserError>;
}

impl<'p> OptionalProperty<'p> for Option<&'p Property> {
    #[inline]
    fn value_or(self, default: &'p str) -> &'p str {
        self.map_or(default, Property::value)
    }

    fn as_date(self) -> Result<Option<DateTime<Tz>>, ParserError> {
        self.map(Property::as_date).transpose()
    }
}
