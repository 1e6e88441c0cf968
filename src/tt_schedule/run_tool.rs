use futures::future;
use log::info;

use super::models::{Config, Schedule, ScheduleError};
use super::normalize::build_schedule;
use super::schedule_getter::ScheduleSource;

/// Fetch the class label and the table dump, then normalize the dump into
/// a per-day schedule. The two fetches are independent of each other, so
/// they are issued together and joined before class resolution.
pub async fn run<S: ScheduleSource>(
    source: &S,
    config: &Config,
    token: &str,
) -> Result<Schedule, ScheduleError> {
    let (class_name, tables) = future::try_join(
        source.class_name(config, token),
        source.timetable_tables(config),
    )
    .await?;
    info!(
        "Normalizing {} table(s) for class {}",
        tables.len(),
        class_name
    );
    build_schedule(&tables, &class_name)
}
