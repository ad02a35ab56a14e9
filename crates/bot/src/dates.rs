//! Date helpers for the instruction block.
//!
//! Relative day words are resolved against a caller-supplied "today", so the
//! prompt is a pure function of its inputs.

use chrono::{Days, Local, NaiveDate};

/// `dd/mm/yyyy`, as written in Italy.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// The local calendar date.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// "oggi", "domani" and "dopodomani" resolved from one anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeDates {
    pub today: NaiveDate,
    pub tomorrow: NaiveDate,
    pub day_after_tomorrow: NaiveDate,
}

impl RelativeDates {
    pub fn from_today(today: NaiveDate) -> Self {
        Self {
            today,
            tomorrow: today.checked_add_days(Days::new(1)).unwrap_or(today),
            day_after_tomorrow: today.checked_add_days(Days::new(2)).unwrap_or(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn italian_format() {
        assert_eq!(format_date(day(2025, 6, 2)), "02/06/2025");
    }

    #[test]
    fn relative_dates_cross_month_end() {
        let dates = RelativeDates::from_today(day(2025, 5, 31));
        assert_eq!(dates.tomorrow, day(2025, 6, 1));
        assert_eq!(dates.day_after_tomorrow, day(2025, 6, 2));
    }
}
