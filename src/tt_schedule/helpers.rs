use log::info;
use reqwest::Client;
use serde_json::json;

use super::models::edupage_model::{AdditionalUserInfo, RawTable, RegularTtResponse};
use super::models::{Config, ScheduleError};

/// Class label (e.g. "10A") of the authenticated student, resolved via the
/// contingent userinfo endpoint. Failures propagate unchanged.
pub async fn get_class_name(
    http_client: &Client,
    config: &Config,
    token: &str,
) -> Result<String, ScheduleError> {
    info!("Getting class name from {}", config.userinfo_url);
    let response = http_client
        .get(&config.userinfo_url)
        .bearer_auth(token)
        .send()
        .await?
        .error_for_status()?;
    let userinfo: AdditionalUserInfo = response.json().await?;
    Ok(userinfo.data.klass.unwrap_or_default())
}

/// Full dbi table dump of the school's regular timetable.
pub async fn get_regular_timetable(
    http_client: &Client,
    config: &Config,
) -> Result<Vec<RawTable>, ScheduleError> {
    info!("Getting regular timetable from {}", config.timetable_url);
    let payload = json!({
        "__args": [null, config.timetable_number],
        "__gsh": config.timetable_gsh,
    });
    let response = http_client
        .post(&config.timetable_url)
        .json(&payload)
        .send()
        .await
        .map_err(|err| ScheduleError::EdupageUnavailable(err.to_string()))?;
    if !response.status().is_success() {
        return Err(ScheduleError::EdupageUnavailable(format!(
            "status {}",
            response.status()
        )));
    }
    let body: RegularTtResponse = response.json().await?;
    Ok(body.r.dbi_accessor_res.tables)
}
