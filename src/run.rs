use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::{
    calendar,
    client::{TimeEntryBody, TimeEntryClient},
    config::{Configuration, ConfigurationError},
    rng::UniformSource,
    schedule::DaySchedule,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub success: u32,
    pub failed: u32,
}

impl RunReport {
    pub fn total(&self) -> u32 {
        self.success + self.failed
    }
}

/// Books entries for every working day of the month, one day at a time.  A
/// day that fails is logged and counted but never stops the loop; only an
/// invalid month aborts before any submission.
pub async fn run_month(
    config: &Configuration,
    client: &TimeEntryClient,
    source: &mut impl UniformSource,
    year: i32,
    month: u32,
    simulate: bool,
) -> Result<RunReport> {
    if !(1..=12).contains(&month) {
        return Err(ConfigurationError::MonthOutOfRange(month).into());
    }
    let days = calendar::working_days(year, month)
        .with_context(|| format!("no calendar for {year}-{month:02}"))?;
    log::info!("Found {} working days in {year}-{month:02}", days.len());

    let mut report = RunReport::default();
    for day in &days {
        match book_day(config, client, source, *day, simulate).await {
            Ok(()) => {
                report.success += 1;
                log::info!(
                    "{} entries for {day} ({}/{})",
                    if simulate { "Simulated" } else { "Created" },
                    report.success,
                    days.len()
                );
            }
            Err(err) => {
                report.failed += 1;
                log::error!("Failed to book entries for {day}: {err:#}");
            }
        }
    }

    if report.success > 0 {
        log::info!(
            "{} entries for {} day(s)",
            if simulate { "Simulated" } else { "Created" },
            report.success
        );
    }
    if report.failed > 0 {
        log::warn!("Failed to create entries for {} day(s)", report.failed);
    }
    Ok(report)
}

async fn book_day(
    config: &Configuration,
    client: &TimeEntryClient,
    source: &mut impl UniformSource,
    day: NaiveDate,
    simulate: bool,
) -> Result<()> {
    let schedule = DaySchedule::for_day(config, day, source)?;

    if simulate {
        describe(&schedule, day);
        return Ok(());
    }

    // Morning and afternoon are independent calls; if the first one fails
    // the day is reported failed and the second is not attempted, but the
    // first is never rolled back.
    for session in schedule.sessions() {
        client
            .create_entry(&TimeEntryBody::new(config, session))
            .await
            .with_context(|| {
                format!(
                    "entry {} - {}",
                    local_time(&session.start),
                    local_time(&session.end)
                )
            })?;
    }
    Ok(())
}

fn describe(schedule: &DaySchedule, day: NaiveDate) {
    match schedule {
        DaySchedule::Single(session) => {
            log::info!(
                "{day}: {} - {}",
                local_time(&session.start),
                local_time(&session.end)
            );
        }
        DaySchedule::Split { morning, afternoon } => {
            log::info!(
                "{day}: morning {} - {}, lunch {} - {}, afternoon {} - {}",
                local_time(&morning.start),
                local_time(&morning.end),
                local_time(&morning.end),
                local_time(&afternoon.start),
                local_time(&afternoon.start),
                local_time(&afternoon.end)
            );
        }
    }
}

fn local_time(instant: &DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format("%H:%M").to_string()
}
