use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::types::Tz;

lazy_static! {
    static ref RE_DATE: Regex = Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap();
    static ref RE_DATE_TIME: Regex =
        Regex::new(r"^(\d{4})(\d{2})(\d{2})T(\d{2})(\d{2})(\d{2})(Z)?$").unwrap();
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CalDateTimeError {
    #[error("Invalid date \"{0}\", expected YYYYMMDD")]
    InvalidDate(String),
    #[error("Invalid date-time \"{0}\", expected YYYYMMDDTHHMMSS or YYYYMMDDTHHMMSSZ")]
    InvalidDateTime(String),
}

fn field(caps: &Captures, index: usize) -> u32 {
    // The regexes only let digits through
    caps[index].parse().unwrap_or(u32::MAX)
}

fn naive_date(caps: &Captures) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(field(caps, 1) as i32, field(caps, 2), field(caps, 3))
}

/// Parse `YYYYMMDD` as midnight in `tz`.
pub fn parse_date(value: &str, tz: Tz) -> Result<DateTime<Tz>, CalDateTimeError> {
    let invalid = || CalDateTimeError::InvalidDate(value.to_owned());
    let caps = RE_DATE.captures(value).ok_or_else(invalid)?;
    let date = naive_date(&caps).ok_or_else(invalid)?;
    Ok(tz.localize(&date.and_time(NaiveTime::MIN)))
}

/// Parse `YYYYMMDDTHHMMSS` in `tz`, or `YYYYMMDDTHHMMSSZ` in UTC.
pub fn parse_date_time(value: &str, tz: Tz) -> Result<DateTime<Tz>, CalDateTimeError> {
    let invalid = || CalDateTimeError::InvalidDateTime(value.to_owned());
    let caps = RE_DATE_TIME.captures(value).ok_or_else(invalid)?;
    let time = NaiveTime::from_hms_opt(field(&caps, 4), field(&caps, 5), field(&caps, 6))
        .ok_or_else(invalid)?;
    let local = NaiveDateTime::new(naive_date(&caps).ok_or_else(invalid)?, time);
    if caps.get(7).is_some() {
        Ok(Tz::UTC.localize(&local))
    } else {
        Ok(tz.localize(&local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    #[test]
    fn date_is_midnight() {
        let date = parse_date("20240229", Tz::Olson(chrono_tz::Europe::London)).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }

    #[test]
    fn date_time_in_zone() {
        let date = parse_date_time("20240615T120000", Tz::Olson(chrono_tz::Europe::London)).unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2024, 6, 15, 11, 0, 0).unwrap());
    }

    #[rstest]
    #[case("2024011")]
    #[case("202401011")]
    #[case("20240230")]
    #[case("2024-01-01")]
    #[case("20240101T000000")]
    fn invalid_dates(#[case] value: &str) {
        assert_eq!(
            parse_date(value, Tz::UTC),
            Err(CalDateTimeError::InvalidDate(value.to_owned()))
        );
    }

    #[rstest]
    #[case("20240101")]
    #[case("20240101T2500000")]
    #[case("20240101T250000")]
    #[case("20240101T120000z")]
    #[case("20240101T120000+0100")]
    #[case(" 20240101T120000Z")]
    fn invalid_date_times(#[case] value: &str) {
        assert_eq!(
            parse_date_time(value, Tz::UTC),
            Err(CalDateTimeError::InvalidDateTime(value.to_owned()))
        );
    }
}
