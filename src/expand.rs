use chrono::{DateTime, Utc};
use itertools::Itertools;
use rrule::{RRule, RRuleSet, Unvalidated};

use crate::{
    ParserError,
    component::{AnomalySink, Event, parse_calendar},
    property::OptionalProperty,
    types::{Tz, parse_date, parse_date_time},
};

/// One concrete occurrence of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Occurrence {
    pub uid: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    #[cfg_attr(feature = "serde", serde(rename = "wholeDays"))]
    pub whole_day: bool,
    pub summary: String,
    pub description: String,
    pub location: String,
    /// Locator of the calendar the event came from.
    #[cfg_attr(feature = "serde", serde(rename = "calendar"))]
    pub source: String,
}

/// Turn an event into its occurrences up to and including `horizon`.
///
/// Without an `RRULE` this is exactly one occurrence. With one, every
/// instant of the rule from `DTSTART` on that is not listed in an `EXDATE`
/// becomes an occurrence lasting as long as the event itself.
pub fn expand_event<S: AnomalySink>(
    event: &Event,
    source: &str,
    horizon: DateTime<Utc>,
    sink: &mut S,
) -> Result<Vec<Occurrence>, ParserError> {
    let uid = event
        .single_property("UID", sink)
        .ok_or(ParserError::MissingRequiredProperty("UID"))?;
    let dtstart = event
        .single_property("DTSTART", sink)
        .ok_or(ParserError::MissingRequiredProperty("DTSTART"))?;
    let start = dtstart.as_date()?;
    let end = event.single_property("DTEND", sink).as_date()?.unwrap_or(start);

    let base = Occurrence {
        uid: uid.value().to_owned(),
        start,
        end,
        whole_day: dtstart.parameters()?.is_date(),
        summary: event.single_property("SUMMARY", sink).value_or("").to_owned(),
        description: event
            .single_property("DESCRIPTION", sink)
            .value_or("")
            .to_owned(),
        location: event.single_property("LOCATION", sink).value_or("").to_owned(),
        source: source.to_owned(),
    };

    let Some(rrule) = event.single_property("RRULE", sink) else {
        return Ok(vec![base]);
    };

    let tz = start.timezone();
    let rrule_tz = rrule::Tz::from(tz);
    let dt_start = start.with_timezone(&rrule_tz);
    let rule = anchor_until(rrule.value(), tz)?
        .parse::<RRule<Unvalidated>>()?
        .validate(dt_start)?;

    let mut rruleset = RRuleSet::new(dt_start).rrule(rule);
    for exdate in event.properties_matching("EXDATE") {
        for date in exdate.as_dates()? {
            rruleset = rruleset.exdate(date.with_timezone(&rrule_tz));
        }
    }

    let duration = end - start;
    Ok(rruleset
        .into_iter()
        .take_while(|instant| *instant <= horizon)
        .map(|instant| {
            let start = instant.with_timezone(&tz);
            Occurrence {
                start,
                end: start + duration,
                ..base.clone()
            }
        })
        .collect())
}

/// Rewrite a floating `UNTIL` as UTC, reading it in `tz`.
///
/// A rule anchored in a zone only accepts a UTC `UNTIL`. Floating starts
/// are left alone.
fn anchor_until(rule: &str, tz: Tz) -> Result<String, ParserError> {
    if tz.is_local() {
        return Ok(rule.to_owned());
    }
    let parts = rule
        .split(';')
        .map(|part| match part.split_once('=') {
            Some((name, value)) if name.eq_ignore_ascii_case("UNTIL") && !value.ends_with('Z') => {
                let until = if value.contains('T') {
                    parse_date_time(value, tz)?
                } else {
                    parse_date(value, tz)?
                };
                Ok(format!(
                    "{name}={}",
                    until.with_timezone(&Utc).format("%Y%m%dT%H%M%SZ")
                ))
            }
            _ => Ok(part.to_owned()),
        })
        .collect::<Result<Vec<_>, ParserError>>()?;
    Ok(parts.iter().join(";"))
}

/// Parse a document and expand all of its events.
pub fn expand_calendar<S: AnomalySink>(
    input: &[u8],
    source: &str,
    horizon: DateTime<Utc>,
    mut sink: S,
) -> Result<Vec<Occurrence>, ParserError> {
    let events = parse_calendar(input, &mut sink)?;
    let mut occurrences = vec![];
    for event in &events {
        occurrences.extend(expand_event(event, source, horizon, &mut sink)?);
    }
    Ok(occurrences)
}
