//! Process settings, read from the environment.
//!
//! | Variable                  | Default              |
//! |---------------------------|----------------------|
//! | `MQTT_CONNECTION_STRING`  | `tcp://0.0.0.0:1883` |
//! | `MQTT_TOPIC_PREFIX`       | `calendars`          |
//! | `UPDATE_INTERVAL`         | `0` (run once)       |
//! | `PUBLISH_HISTORIC_EVENTS` | `false`              |
//! | `CALENDAR_URLS`           | none, `;`-separated  |

use std::time::Duration;

use chrono::{DateTime, Months, Utc};
use serde::Deserialize;

const DEFAULT_CONNECTION_STRING: &str = "tcp://0.0.0.0:1883";
const DEFAULT_TOPIC_PREFIX: &str = "calendars";
const RECURRENCE_MONTHS: u32 = 6;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("UPDATE_INTERVAL must be a whole number of seconds, got \"{0}\"")]
    InvalidUpdateInterval(String),
}

/// Variables as found in the environment, before defaults apply.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSettings {
    mqtt_connection_string: Option<String>,
    mqtt_topic_prefix: Option<String>,
    update_interval: Option<String>,
    publish_historic_events: Option<String>,
    calendar_urls: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub mqtt_connection_string: String,
    /// Without trailing `/`.
    pub mqtt_topic_prefix: String,
    /// `None` means update once and exit.
    pub update_interval: Option<Duration>,
    pub publish_historic_events: bool,
    pub calendar_urls: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mqtt_connection_string: DEFAULT_CONNECTION_STRING.to_owned(),
            mqtt_topic_prefix: DEFAULT_TOPIC_PREFIX.to_owned(),
            update_interval: None,
            publish_historic_events: false,
            calendar_urls: vec![],
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self::load(config::Environment::default())?;
        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Like [`Settings::from_env`], reading `vars` instead of the process environment.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, SettingsError>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect::<config::Map<String, String>>();
        Self::load(config::Environment::default().source(Some(vars)))
    }

    fn load(environment: config::Environment) -> Result<Self, SettingsError> {
        let raw: RawSettings = config::Config::builder()
            .add_source(
                environment
                    .convert_case(config::Case::Snake)
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, SettingsError> {
        let defaults = Self::default();

        let mqtt_topic_prefix = raw
            .mqtt_topic_prefix
            .as_deref()
            .map(|prefix| prefix.trim_end_matches('/'))
            .filter(|prefix| !prefix.is_empty())
            .map_or(defaults.mqtt_topic_prefix, str::to_owned);

        let update_interval = match raw.update_interval.as_deref() {
            None => None,
            Some(value) => {
                let seconds: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| SettingsError::InvalidUpdateInterval(value.to_owned()))?;
                u64::try_from(seconds)
                    .ok()
                    .filter(|&seconds| seconds > 0)
                    .map(Duration::from_secs)
            }
        };

        Ok(Self {
            mqtt_connection_string: raw
                .mqtt_connection_string
                .unwrap_or(defaults.mqtt_connection_string),
            mqtt_topic_prefix,
            update_interval,
            publish_historic_events: raw.publish_historic_events.as_deref() == Some("true"),
            calendar_urls: raw
                .calendar_urls
                .as_deref()
                .unwrap_or_default()
                .split(';')
                .filter(|url| !url.is_empty())
                .map(str::to_owned)
                .collect(),
        })
    }

    /// Recurring events are expanded up to this instant.
    pub fn recurrence_horizon(now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_add_months(Months::new(RECURRENCE_MONTHS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}
