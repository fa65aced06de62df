use chrono::{Datelike, NaiveDate};

/// Week of the year for `date`, counting Sunday-started weeks with the week
/// containing January 1st as week 1. Ranges from 1 to 54.
pub fn calendar_week_of(date: NaiveDate) -> u32 {
    let days_since_jan1 = date.ordinal0();
    let weekday = date.weekday().num_days_from_sunday();
    // Sunday = 0
    let jan1_weekday = (weekday + 7 - days_since_jan1 % 7) % 7;

    (days_since_jan1 + jan1_weekday + 1).div_ceil(7)
}
