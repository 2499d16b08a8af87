use chrono::{DateTime, TimeZone, Utc};
use icalfeed::{Anomaly, Occurrence};

fn horizon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn by_uid<'o>(occurrences: &'o [Occurrence], uid: &str) -> Vec<&'o Occurrence> {
    occurrences.iter().filter(|o| o.uid == uid).collect()
}

pub mod line {
    use icalfeed::LineReader;
    use itertools::Itertools;

    #[test]
    fn crlf_and_folding() {
        let input = include_bytes!("./resources/ical_events.ics");
        let lines = LineReader::from_slice(input.as_slice())
            .map_ok(|line| line.to_string())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert!(lines.iter().all(|line| !line.ends_with('\r')));
        assert!(lines.contains(
            &"DESCRIPTION:Bring the insurance card and the x-ray from last year. Ask about the follow-up appointment."
                .to_owned()
        ));
    }
}

pub mod calendar {
    use super::*;
    use icalfeed::{ParserError, expand_calendar, parse_calendar};
    use rstest::rstest;

    #[rstest]
    #[case(include_str!("./resources/ical_events.ics"), 3, 23)]
    #[case(include_str!("./resources/recurring_wholeday.ics"), 1, 3)]
    #[case(include_str!("./resources/ical_outlook.ics"), 1, 5)]
    fn events_and_anomalies(#[case] input: &str, #[case] events: usize, #[case] anomalies: usize) {
        let mut recorded: Vec<Anomaly> = vec![];
        let parsed = parse_calendar(input.as_bytes(), &mut recorded).unwrap();
        assert_eq!(parsed.len(), events);
        assert_eq!(recorded.len(), anomalies);
        assert!(
            recorded
                .iter()
                .all(|anomaly| matches!(anomaly, Anomaly::PropertyOutsideEvent { .. }))
        );
    }

    #[test]
    fn google_export() {
        let input = include_bytes!("./resources/ical_events.ics");
        let mut anomalies: Vec<Anomaly> = vec![];
        let occurrences =
            expand_calendar(input, "https://example.com/family.ics", horizon(), &mut anomalies)
                .unwrap();
        assert_eq!(occurrences.len(), 5);

        let dentist = by_uid(&occurrences, "dentist-1@example.com");
        assert_eq!(dentist.len(), 1);
        let dentist = dentist[0];
        assert_eq!(dentist.start, utc(2024, 5, 14, 16, 30));
        assert_eq!(dentist.end, utc(2024, 5, 14, 18, 0));
        assert_eq!(dentist.summary, "Dentist");
        assert_eq!(dentist.location, "Hauptstraße 5\\, Berlin");
        // The alarm's DESCRIPTION comes second and loses
        assert_eq!(
            dentist.description,
            "Bring the insurance card and the x-ray from last year. Ask about the follow-up appointment."
        );
        assert_eq!(dentist.source, "https://example.com/family.ics");
        assert!(anomalies.contains(&Anomaly::MultipleProperties {
            key: "DESCRIPTION".to_owned()
        }));

        let holiday = by_uid(&occurrences, "whit-monday@example.com");
        assert_eq!(holiday.len(), 1);
        let holiday = holiday[0];
        assert!(holiday.whole_day);
        assert_eq!(
            holiday.start.naive_local().to_string(),
            "2024-05-20 00:00:00"
        );

        let swims = by_uid(&occurrences, "swim@example.com")
            .iter()
            .map(|o| (o.start.with_timezone(&Utc), o.end.with_timezone(&Utc)))
            .collect::<Vec<_>>();
        assert_eq!(
            swims,
            [
                (utc(2024, 6, 3, 5, 30), utc(2024, 6, 3, 6, 0)),
                (utc(2024, 6, 17, 5, 30), utc(2024, 6, 17, 6, 0)),
                (utc(2024, 6, 24, 5, 30), utc(2024, 6, 24, 6, 0)),
            ]
        );
    }

    #[test]
    fn recurring_whole_day() {
        let input = include_bytes!("./resources/recurring_wholeday.ics");
        let occurrences = expand_calendar(input, "birthdays", horizon(), Vec::<Anomaly>::new())
            .unwrap();
        let days = occurrences
            .iter()
            .map(|o| o.start.naive_local().date().to_string())
            .collect::<Vec<_>>();
        assert_eq!(days, ["2020-02-29", "2024-02-29"]);
        assert!(occurrences.iter().all(|o| o.whole_day));
    }

    #[test]
    fn windows_timezone_names() {
        let input = include_bytes!("./resources/ical_outlook.ics");
        let occurrences =
            expand_calendar(input, "outlook", horizon(), Vec::<Anomaly>::new()).unwrap();
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].start, utc(2024, 5, 15, 8, 0));
        assert_eq!(occurrences[0].start.timezone().name(), "Europe/Berlin");
        assert_eq!(occurrences[0].location, "Teams");
    }

    #[test]
    fn missing_uid_fails_whole_document() {
        let input = include_bytes!("./resources/ical_missing_uid.ics");
        assert_eq!(
            expand_calendar(input, "broken", horizon(), Vec::<Anomaly>::new()),
            Err(ParserError::MissingRequiredProperty("UID"))
        );
    }
}

pub mod feed {
    use super::*;
    use icalfeed::{Settings, feed::{Snapshot, aggregate}};

    #[test]
    fn several_calendars() {
        let now = utc(2024, 6, 17, 5, 45);
        let (occurrences, failures) = aggregate(
            [
                (
                    "family",
                    include_bytes!("./resources/ical_events.ics").as_slice(),
                ),
                (
                    "broken",
                    include_bytes!("./resources/ical_missing_uid.ics").as_slice(),
                ),
                (
                    "work",
                    include_bytes!("./resources/ical_outlook.ics").as_slice(),
                ),
            ],
            Settings::recurrence_horizon(now),
        );
        assert_eq!(occurrences.len(), 6);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].source, "broken");

        let snapshot = Snapshot::build(now, occurrences, false);
        let today = snapshot
            .today_events
            .iter()
            .map(|o| o.uid.as_str())
            .collect::<Vec<_>>();
        assert_eq!(today, ["swim@example.com"]);
        assert_eq!(snapshot.today_and_future_events.len(), 2);
        assert!(
            snapshot
                .today_and_future_events
                .windows(2)
                .all(|pair| pair[0].start <= pair[1].start)
        );
    }
}
