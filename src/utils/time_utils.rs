use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Date part of a timestamp, as used for row labels (e.g. `1981-03-01`).
    pub fn date_label(time: &NaiveDateTime) -> String {
        time.format(Self::STANDARD_TIME_FORMAT).to_string()
    }

    /// Midnight at the start of `date`.
    pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN)
    }

    pub fn year_of(time: &NaiveDateTime) -> i32 {
        time.year()
    }
}
