pub mod tt_schedule;
