use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, MappedLocalTime, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone,
};
use derive_more::{Display, From};
use phf::phf_map;

/// Zone an instant was resolved in: the process-local zone or an IANA zone.
#[derive(Debug, Clone, Copy, From, PartialEq, Eq)]
pub enum Tz {
    Local,
    Olson(chrono_tz::Tz),
}

// Zone names written by Outlook and Exchange.
static WINDOWS_TZIDS: phf::Map<&'static str, &'static str> = phf_map! {
    "UTC" => "UTC",
    "GMT Standard Time" => "Europe/London",
    "Greenwich Standard Time" => "Atlantic/Reykjavik",
    "W. Europe Standard Time" => "Europe/Berlin",
    "Central Europe Standard Time" => "Europe/Budapest",
    "Central European Standard Time" => "Europe/Warsaw",
    "Romance Standard Time" => "Europe/Paris",
    "E. Europe Standard Time" => "Europe/Chisinau",
    "FLE Standard Time" => "Europe/Kiev",
    "GTB Standard Time" => "Europe/Bucharest",
    "Russian Standard Time" => "Europe/Moscow",
    "Eastern Standard Time" => "America/New_York",
    "Central Standard Time" => "America/Chicago",
    "Mountain Standard Time" => "America/Denver",
    "US Mountain Standard Time" => "America/Phoenix",
    "Pacific Standard Time" => "America/Los_Angeles",
    "Alaskan Standard Time" => "America/Anchorage",
    "Hawaiian Standard Time" => "Pacific/Honolulu",
    "Atlantic Standard Time" => "America/Halifax",
    "E. South America Standard Time" => "America/Sao_Paulo",
    "India Standard Time" => "Asia/Calcutta",
    "China Standard Time" => "Asia/Shanghai",
    "Singapore Standard Time" => "Asia/Singapore",
    "Tokyo Standard Time" => "Asia/Tokyo",
    "Korea Standard Time" => "Asia/Seoul",
    "AUS Eastern Standard Time" => "Australia/Sydney",
    "New Zealand Standard Time" => "Pacific/Auckland",
};

impl Tz {
    pub const UTC: Self = Self::Olson(chrono_tz::UTC);

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local => "Local",
            Self::Olson(tz) => tz.name(),
        }
    }

    /// Look up a `TZID` in the IANA database, then among Windows zone names.
    pub fn from_tzid(tzid: &str) -> Option<Self> {
        if let Ok(tz) = chrono_tz::Tz::from_str(tzid) {
            return Some(Self::Olson(tz));
        }
        WINDOWS_TZIDS
            .get(tzid)
            .and_then(|iana| chrono_tz::Tz::from_str(iana).ok())
            .map(Self::Olson)
    }

    /// Place a wall-clock time in this zone. Ambiguous times take the
    /// earlier instant; times inside a gap use the offset from before the
    /// transition and so land after it.
    pub fn localize(&self, local: &NaiveDateTime) -> DateTime<Self> {
        match self.from_local_datetime(local) {
            MappedLocalTime::Single(dt) => dt,
            MappedLocalTime::Ambiguous(earliest, _) => earliest,
            MappedLocalTime::None => {
                let before = self
                    .offset_from_utc_datetime(&(*local - TimeDelta::days(1)))
                    .fix();
                let utc = *local - TimeDelta::seconds(i64::from(before.local_minus_utc()));
                self.from_utc_datetime(&utc)
            }
        }
    }
}

impl From<Tz> for rrule::Tz {
    fn from(value: Tz) -> Self {
        match value {
            Tz::Local => rrule::Tz::Local(chrono::Local),
            Tz::Olson(tz) => rrule::Tz::Tz(tz),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CalTimezoneOffset {
    Local(FixedOffset),
    Olson(chrono_tz::TzOffset),
}

impl Offset for CalTimezoneOffset {
    fn fix(&self) -> FixedOffset {
        match self {
            Self::Local(offset) => *offset,
            Self::Olson(olson) => olson.fix(),
        }
    }
}

impl TimeZone for Tz {
    type Offset = CalTimezoneOffset;

    fn from_offset(offset: &Self::Offset) -> Self {
        match offset {
            CalTimezoneOffset::Local(_) => Self::Local,
            CalTimezoneOffset::Olson(offset) => Self::Olson(chrono_tz::Tz::from_offset(offset)),
        }
    }

    #[cfg(not(tarpaulin_include))] // Only used by deprecated chrono::Date type
    fn offset_from_local_date(&self, local: &NaiveDate) -> MappedLocalTime<Self::Offset> {
        match self {
            Self::Local => chrono::Local
                .offset_from_local_date(local)
                .map(CalTimezoneOffset::Local),
            Self::Olson(tz) => tz
                .offset_from_local_date(local)
                .map(CalTimezoneOffset::Olson),
        }
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> MappedLocalTime<Self::Offset> {
        match self {
            Self::Local => chrono::Local
                .offset_from_local_datetime(local)
                .map(CalTimezoneOffset::Local),
            Self::Olson(tz) => tz
                .offset_from_local_datetime(local)
                .map(CalTimezoneOffset::Olson),
        }
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> Self::Offset {
        match self {
            Self::Local => CalTimezoneOffset::Local(chrono::Local.offset_from_utc_datetime(utc)),
            Self::Olson(tz) => CalTimezoneOffset::Olson(tz.offset_from_utc_datetime(utc)),
        }
    }

    #[cfg(not(tarpaulin_include))] // Only used by deprecated chrono::Date type
    fn offset_from_utc_date(&self, utc: &NaiveDate) -> Self::Offset {
        match self {
            Self::Local => CalTimezoneOffset::Local(chrono::Local.offset_from_utc_date(utc)),
            Self::Olson(tz) => CalTimezoneOffset::Olson(tz.offset_from_utc_date(utc)),
        }
    }
}
