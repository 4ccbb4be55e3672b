use chrono::{Months, NaiveDate};

use crate::error::Error;

/// Adds calendar months, clamping the day to the end of the target month
/// (Jan 31 + 1 month is Feb 28, or Feb 29 in a leap year).
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, Error> {
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        Error::Validation(format!("{} + {} months is out of range", date, months))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_overflow_clamps_to_last_day() {
        assert_eq!(add_months(date(2023, 1, 31), 1).unwrap(), date(2023, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1).unwrap(), date(2024, 2, 29));
        assert_eq!(add_months(date(2024, 3, 31), 1).unwrap(), date(2024, 4, 30));
    }

    #[test]
    fn test_add_months_crosses_years() {
        assert_eq!(add_months(date(2024, 11, 15), 3).unwrap(), date(2025, 2, 15));
        assert_eq!(add_months(date(2024, 2, 29), 12).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn test_add_zero_months_is_identity() {
        assert_eq!(add_months(date(2024, 5, 20), 0).unwrap(), date(2024, 5, 20));
    }

    #[test]
    fn test_add_months_out_of_range() {
        assert!(add_months(NaiveDate::MAX, 1).is_err());
    }
}
