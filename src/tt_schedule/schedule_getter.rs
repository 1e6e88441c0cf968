use reqwest::Client;

use super::helpers::{get_class_name, get_regular_timetable};
use super::models::edupage_model::RawTable;
use super::models::{Config, ScheduleError};

/// A trait, necessary for every entity that will be used for getting the
/// raw schedule material: the caller's class label and the table dump.
#[allow(async_fn_in_trait)]
pub trait ScheduleSource {
    async fn class_name(&self, config: &Config, token: &str) -> Result<String, ScheduleError>;
    async fn timetable_tables(&self, config: &Config) -> Result<Vec<RawTable>, ScheduleError>;
}

/// Allows to use Client for getting the material via requests to the
/// userinfo and edupage endpoints.
impl ScheduleSource for Client {
    async fn class_name(&self, config: &Config, token: &str) -> Result<String, ScheduleError> {
        get_class_name(self, config, token).await
    }

    async fn timetable_tables(&self, config: &Config) -> Result<Vec<RawTable>, ScheduleError> {
        get_regular_timetable(self, config).await
    }
}
