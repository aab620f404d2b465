// SPDX-License-Identifier: MPL-2.0

use chrono::{Datelike, NaiveDate, Weekday};

/// Lists every working day (Monday through Friday) of the given month in
/// ascending calendar order.
///
/// Returns `None` when chrono rejects the (year, month) pair, e.g. a month
/// outside 1-12.  Out-of-range input is rejected rather than rolled over
/// into a neighbouring year.
pub fn working_days(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let mut days = Vec::new();
    let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
    while date.month() == month {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(date);
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break, // end of chrono's representable range
        };
    }
    Some(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_year_february_has_21_working_days() {
        let days = working_days(2024, 2).unwrap();
        assert_eq!(days.len(), 21);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(
            *days.last().unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn month_starting_on_saturday_skips_the_first_weekend() {
        let days = working_days(2024, 6).unwrap();
        assert_eq!(days.len(), 20);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(
            *days.last().unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
        );
    }

    #[test]
    fn only_weekdays_are_returned() {
        for month in 1..=12 {
            for day in working_days(2023, month).unwrap() {
                assert!(
                    !matches!(day.weekday(), Weekday::Sat | Weekday::Sun),
                    "{day} falls on a weekend"
                );
            }
        }
    }

    #[test]
    fn working_and_weekend_days_cover_the_whole_month() {
        let days = working_days(2024, 6).unwrap();
        let weekends = (1..=30)
            .map(|d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap())
            .filter(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .count();
        assert_eq!(days.len() + weekends, 30);
    }

    #[test]
    fn results_are_in_ascending_order() {
        let days = working_days(2024, 12).unwrap();
        assert!(days.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn same_inputs_yield_the_same_sequence() {
        assert_eq!(working_days(2025, 3), working_days(2025, 3));
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert_eq!(working_days(2024, 0), None);
        assert_eq!(working_days(2024, 13), None);
    }
}
