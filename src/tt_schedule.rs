pub mod day_mask;
pub mod helpers;
pub mod models;
pub mod normalize;
pub mod run_tool;
pub mod schedule_getter;
pub mod tables;
