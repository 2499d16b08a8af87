//! Combine the occurrences of several calendars into what gets published.

use chrono::{DateTime, Utc};
use itertools::Itertools;

use crate::{Occurrence, ParserError, WarnLog, expand_calendar};

/// A calendar that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFailure {
    pub source: String,
    pub error: ParserError,
}

/// Expand every `(source, document)` pair.
///
/// A document that fails is logged and reported in the returned failures;
/// the other documents are processed regardless.
pub fn aggregate<'d>(
    documents: impl IntoIterator<Item = (&'d str, &'d [u8])>,
    horizon: DateTime<Utc>,
) -> (Vec<Occurrence>, Vec<SourceFailure>) {
    let mut occurrences = vec![];
    let mut failures = vec![];
    for (source, document) in documents {
        match expand_calendar(document, source, horizon, WarnLog::new(source)) {
            Ok(expanded) => {
                tracing::debug!(source, count = expanded.len(), "expanded calendar");
                occurrences.extend(expanded);
            }
            Err(error) => {
                tracing::error!(source, %error, "failed to parse calendar");
                failures.push(SourceFailure {
                    source: source.to_owned(),
                    error,
                });
            }
        }
    }
    (occurrences, failures)
}

/// Occurrences sorted by start and split up relative to `last_seen`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub last_seen: DateTime<Utc>,
    /// Running at `last_seen`.
    pub today_events: Vec<Occurrence>,
    /// Running at or starting after `last_seen`.
    pub today_and_future_events: Vec<Occurrence>,
    /// Everything, when historic events are published.
    pub all_events: Option<Vec<Occurrence>>,
}

fn is_live(occurrence: &Occurrence, now: &DateTime<Utc>) -> bool {
    occurrence.start <= *now && occurrence.end >= *now
}

impl Snapshot {
    pub fn build(now: DateTime<Utc>, occurrences: Vec<Occurrence>, publish_historic: bool) -> Self {
        let all_events = occurrences
            .into_iter()
            .sorted_by_key(|occurrence| occurrence.start)
            .collect_vec();

        let today_events = all_events
            .iter()
            .filter(|o| is_live(o, &now))
            .cloned()
            .collect();
        let today_and_future_events = all_events
            .iter()
            .filter(|o| is_live(o, &now) || o.start >= now)
            .cloned()
            .collect();

        Self {
            last_seen: now,
            today_events,
            today_and_future_events,
            all_events: publish_historic.then_some(all_events),
        }
    }

    /// Topic and payload of every message to publish, topics under `prefix`.
    #[cfg(feature = "serde")]
    pub fn messages(&self, prefix: &str) -> Result<Vec<(String, String)>, serde_json::Error> {
        let mut messages = vec![
            (
                format!("{prefix}/_meta/last_seen"),
                self.last_seen
                    .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            ),
            (
                format!("{prefix}/state/today_events"),
                serde_json::to_string(&self.today_events)?,
            ),
            (
                format!("{prefix}/state/today_and_future_events"),
                serde_json::to_string(&self.today_and_future_events)?,
            ),
        ];
        if let Some(all_events) = &self.all_events {
            messages.push((
                format!("{prefix}/state/all_events"),
                serde_json::to_string(all_events)?,
            ));
        }
        Ok(messages)
    }
}
