// SPDX-License-Identifier: MPL-2.0

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::{config::Configuration, rng::UniformSource};

// Lunch starts somewhere between 11:30 and 13:00 and always lasts one hour.
const LUNCH_START_EARLIEST: f64 = 11.5;
const LUNCH_START_LATEST: f64 = 13.0;
const LUNCH_MINUTES: u32 = 60;

/// One billable interval, anchored to a calendar day in local time and
/// carried as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// The interval(s) to book for a single working day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySchedule {
    /// One entry spanning the whole working day.
    Single(Session),
    /// Two entries with a one-hour lunch gap between them.
    Split { morning: Session, afternoon: Session },
}

impl DaySchedule {
    /// Computes the schedule for `day`.  In lunch-break mode the lunch start
    /// is drawn fresh from `source` on every call, so two calls for the same
    /// day will generally differ.
    pub fn for_day(
        config: &Configuration,
        day: NaiveDate,
        source: &mut impl UniformSource,
    ) -> Result<DaySchedule> {
        let day_start = config.start_hour * 60;
        let day_end = config.end_hour * 60;

        if !config.lunch_break {
            return Ok(DaySchedule::Single(Session {
                start: local_instant(day, day_start)?,
                end: local_instant(day, day_end)?,
            }));
        }

        // Work in whole minutes so a draw like 12.9999 still rounds to a
        // representable wall-clock time instead of a 60th minute.
        let lunch_start =
            (source.uniform(LUNCH_START_EARLIEST, LUNCH_START_LATEST) * 60.0).round() as u32;
        let lunch_end = lunch_start + LUNCH_MINUTES;

        Ok(DaySchedule::Split {
            morning: Session {
                start: local_instant(day, day_start)?,
                end: local_instant(day, lunch_start)?,
            },
            afternoon: Session {
                start: local_instant(day, lunch_end)?,
                end: local_instant(day, day_end)?,
            },
        })
    }

    pub fn sessions(&self) -> Vec<&Session> {
        match self {
            DaySchedule::Single(session) => vec![session],
            DaySchedule::Split { morning, afternoon } => vec![morning, afternoon],
        }
    }
}

fn local_instant(day: NaiveDate, minute_of_day: u32) -> Result<DateTime<Utc>> {
    let hour = minute_of_day / 60;
    let minute = minute_of_day % 60;
    let time = day
        .and_hms_opt(hour, minute, 0)
        .with_context(|| format!("{hour:02}:{minute:02} is not a valid time of day"))?;
    let local = Local
        .from_local_datetime(&time)
        .latest()
        .with_context(|| format!("{time} does not exist in the local timezone"))?;
    Ok(local.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Timelike};

    use super::*;
    use crate::{config::DEFAULT_BASE_URL, rng::FixedSource};

    fn config(lunch_break: bool) -> Configuration {
        Configuration {
            workspace_id: "ws-1".into(),
            project_id: "proj-1".into(),
            auth_token: "token".into(),
            description: "development".into(),
            start_hour: 9,
            end_hour: 17,
            lunch_break,
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    fn local_hm(instant: &DateTime<Utc>) -> (u32, u32) {
        let local = instant.with_timezone(&Local);
        (local.hour(), local.minute())
    }

    #[test]
    fn single_mode_spans_the_whole_working_day() {
        let schedule =
            DaySchedule::for_day(&config(false), day(), &mut FixedSource::new([12.0])).unwrap();
        let DaySchedule::Single(session) = schedule else {
            panic!("expected a single session");
        };
        assert_eq!(local_hm(&session.start), (9, 0));
        assert_eq!(local_hm(&session.end), (17, 0));
        assert!(session.start < session.end);
    }

    #[test]
    fn split_mode_partitions_the_day_around_a_one_hour_lunch() {
        let schedule =
            DaySchedule::for_day(&config(true), day(), &mut FixedSource::new([12.25])).unwrap();
        let DaySchedule::Split { morning, afternoon } = schedule else {
            panic!("expected a split schedule");
        };
        assert_eq!(local_hm(&morning.start), (9, 0));
        assert_eq!(local_hm(&morning.end), (12, 15));
        assert_eq!(local_hm(&afternoon.start), (13, 15));
        assert_eq!(local_hm(&afternoon.end), (17, 0));
        assert_eq!(afternoon.start - morning.end, Duration::hours(1));
        assert!(morning.start < morning.end);
        assert!(morning.end < afternoon.start);
        assert!(afternoon.start < afternoon.end);
    }

    #[test]
    fn lunch_draw_boundaries_stay_inside_the_working_day() {
        for draw in [11.5, 13.0] {
            let schedule =
                DaySchedule::for_day(&config(true), day(), &mut FixedSource::new([draw])).unwrap();
            let DaySchedule::Split { morning, afternoon } = schedule else {
                panic!("expected a split schedule");
            };
            assert!(morning.start < morning.end);
            assert!(morning.end < afternoon.start);
            assert!(afternoon.start < afternoon.end);
            assert_eq!(afternoon.start - morning.end, Duration::hours(1));
        }
    }

    #[test]
    fn fractional_draws_round_to_whole_minutes() {
        let schedule =
            DaySchedule::for_day(&config(true), day(), &mut FixedSource::new([12.9999])).unwrap();
        let DaySchedule::Split { morning, afternoon } = schedule else {
            panic!("expected a split schedule");
        };
        assert_eq!(local_hm(&morning.end), (13, 0));
        assert_eq!(local_hm(&afternoon.start), (14, 0));
    }

    #[test]
    fn identical_draws_produce_identical_schedules() {
        let first =
            DaySchedule::for_day(&config(true), day(), &mut FixedSource::new([12.5])).unwrap();
        let second =
            DaySchedule::for_day(&config(true), day(), &mut FixedSource::new([12.5])).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn sessions_lists_entries_in_chronological_order() {
        let schedule =
            DaySchedule::for_day(&config(true), day(), &mut FixedSource::new([12.0])).unwrap();
        let sessions = schedule.sessions();
        assert_eq!(sessions.len(), 2);
        assert!(sessions[0].end < sessions[1].start);

        let single =
            DaySchedule::for_day(&config(false), day(), &mut FixedSource::new([12.0])).unwrap();
        assert_eq!(single.sessions().len(), 1);
    }
}
