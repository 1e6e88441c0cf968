use std::path::PathBuf;

use clap::{command, Parser};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod edupage_model;

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. Path to config.json, that contains the edupage and userinfo endpoint parameters.
/// 2. Bearer token of an authenticated session, used only for the class name lookup.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(long, value_name = "TOKEN")]
    pub token: String,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. URL of the edupage regulartt endpoint that serves the raw table dump
/// 2. Timetable number, sent as the second element of the `__args` payload
/// 3. The `__gsh` checksum the endpoint expects alongside the arguments
/// 4. URL of the userinfo endpoint that resolves the student's class name
#[derive(Deserialize)]
pub struct Config {
    pub timetable_url: String,
    pub timetable_number: String,
    pub timetable_gsh: String,
    pub userinfo_url: String,
}

/// The three conditions under which no meaningful schedule can be built.
/// Everything milder resolves to placeholder values instead.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("edupage is unavailable: {0}")]
    EdupageUnavailable(String),
    #[error("timetable dump contains no lessons table")]
    LessonsNotFound,
    #[error("class {0:?} not found in the classes table")]
    ClassNotFound(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// A maximal run of consecutive periods on one day sharing subject, teacher
/// and classroom. `number_start`/`number_end` are `None` for lessons whose
/// placement could not be resolved to a period number.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MergedLesson {
    pub number_start: Option<i64>,
    pub number_end: Option<i64>,
    pub time: String,
    pub subject: String,
    pub teacher: String,
    pub classroom: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScheduleDay {
    pub name: String,
    pub lessons: Vec<MergedLesson>,
}

/// Final artifact: one entry per day of the source's day table, in source
/// order, each carrying its merged lesson list.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Schedule {
    pub days: Vec<ScheduleDay>,
}
