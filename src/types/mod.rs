mod timezone;
pub use timezone::{CalTimezoneOffset, Tz};

mod datetime;
pub use datetime::{CalDateTimeError, parse_date, parse_date_time};
