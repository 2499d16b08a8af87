use chrono::{TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use icalfeed::{
    Anomaly, LineReader, Property, expand_calendar, parse_calendar,
    types::{Tz, parse_date, parse_date_time},
};

fn benchmark(c: &mut Criterion) {
    let input = include_str!("../tests/resources/ical_events.ics");
    let horizon = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let mut group = c.benchmark_group("parse_type");
    group.bench_function("parse date", |b| {
        b.iter(|| {
            parse_date("19700329", Tz::UTC).unwrap();
        })
    });
    group.bench_function("parse date-time UTC", |b| {
        b.iter(|| {
            parse_date_time("19700329T020000Z", Tz::UTC).unwrap();
        })
    });
    group.bench_function("parse date-time Local", |b| {
        b.iter(|| {
            parse_date_time("19700329T020000", Tz::Local).unwrap();
        })
    });
    group.bench_function("ics parse DTSTART", |b| {
        b.iter(|| {
            Property::new("DTSTART;TZID=Europe/Berlin", "19700329T020000")
                .as_date()
                .unwrap();
        })
    });
    drop(group);

    let mut group = c.benchmark_group("lines");
    group.bench_function("line parse ical_events.ics", |b| {
        b.iter(|| {
            let reader = LineReader::from_slice(input.as_bytes());
            // Consume reader
            for _ in reader {}
        })
    });
    drop(group);

    let mut group = c.benchmark_group("events");
    group.bench_function("parse ical_events.ics", |b| {
        b.iter(|| parse_calendar(input.as_bytes(), Vec::<Anomaly>::new()).unwrap())
    });
    group.bench_function("expand ical_events.ics", |b| {
        b.iter(|| {
            expand_calendar(input.as_bytes(), "bench", horizon, Vec::<Anomaly>::new()).unwrap()
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
