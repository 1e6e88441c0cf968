//! The normalization engine: turns one edupage dbi dump into a per-day
//! schedule for a single class. Pure transformation, no I/O.

use std::collections::{BTreeMap, HashSet};

use log::debug;

use super::day_mask::{detect_mask_direction, mask_to_days};
use super::models::edupage_model::{value_to_f64, value_to_i64, value_to_id, RawRow, RawTable};
use super::models::{MergedLesson, Schedule, ScheduleDay, ScheduleError};
use super::tables::{
    period_time_range, resolve_period_number, teacher_name, RowIndex, TableSet, DASH,
};

/// Bucket for entries whose day placement could not be recovered. Kept out
/// of the emitted schedule, surfaced through the debug log instead.
pub const UNKNOWN_DAY: &str = "Unknown";

/// Day names used when the dump carries no usable `days` table.
const FALLBACK_DAYS: [&str; 5] = ["Понедельник", "Вторник", "Среда", "Четверг", "Пятница"];

/// One lesson occupying one period on one day, the smallest unit of
/// expansion. `mask` is the raw day mask the entry came from, kept only
/// for tracing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicEntry {
    pub period: Option<i64>,
    pub subject: String,
    pub teacher: String,
    pub room: String,
    pub mask: String,
}

/// Build the per-day schedule of `class_name` from a raw table dump.
pub fn build_schedule(tables: &[RawTable], class_name: &str) -> Result<Schedule, ScheduleError> {
    let set = TableSet::new(tables);
    let subjects = set.index("subjects");
    let teachers = set.index("teachers");
    let classrooms = set.index("classrooms");
    let periods = set.index("periods");

    let days_order = day_names(&set);

    let lessons = set
        .find("lessons")
        .or_else(|| set.find("ttitems"))
        .ok_or(ScheduleError::LessonsNotFound)?;

    let cards = set.rows("cards");
    let card_masks: Vec<String> = cards.iter().map(raw_mask).collect();
    let direction = detect_mask_direction(card_masks.iter().map(String::as_str), days_order.len());
    debug!("Detected day mask direction: {:?}", direction);

    let mut cards_by_lesson: BTreeMap<String, Vec<&RawRow>> = BTreeMap::new();
    for card in cards {
        if let Some(lesson_id) = card.value(&["lessonid"]).and_then(value_to_id) {
            cards_by_lesson.entry(lesson_id).or_default().push(card);
        }
    }

    let class_id = resolve_class_id(&set, class_name)?;

    /* Expand every lesson of the class into atomic (day, period) entries */
    let mut buckets: BTreeMap<String, Vec<AtomicEntry>> = BTreeMap::new();
    for lesson in &lessons.data_rows {
        if !lesson
            .id_list(&["classids"])
            .iter()
            .any(|id| *id == class_id)
        {
            continue;
        }

        let subject = subject_name(&subjects, lesson);
        let teacher = teacher_names(&teachers, lesson);

        let lesson_cards = lesson
            .id()
            .and_then(|id| cards_by_lesson.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if lesson_cards.is_empty() {
            // The source gives no day information for cardless lessons.
            let period = lesson
                .value(&["period", "durationperiods"])
                .and_then(value_to_i64);
            buckets
                .entry(UNKNOWN_DAY.to_string())
                .or_default()
                .push(AtomicEntry {
                    period,
                    subject,
                    teacher,
                    room: room_names(&classrooms, lesson),
                    mask: String::new(),
                });
            continue;
        }

        for card in lesson_cards {
            let start = resolve_period_number(&periods, card.value(&["period", "periodid"]));
            let duration = card
                .value(&["durationperiods", "duration"])
                .or_else(|| lesson.value(&["durationperiods", "duration"]))
                .and_then(value_to_f64)
                .filter(|d| *d > 0.0)
                .map(|d| (d.floor() as i64).max(1))
                .unwrap_or(1);
            let room = room_names(&classrooms, card);
            let card_mask = raw_mask(card);

            let mut days = mask_to_days(&card_mask, &days_order, direction);
            if days.is_empty() {
                // Cards with an unusable mask inherit the lesson's own mask.
                let alt = mask_to_days(&raw_mask(lesson), &days_order, direction);
                if !alt.is_empty() {
                    days = alt;
                }
            }

            // Multi-period lessons become one entry per period so they can
            // merge back into ranges later.
            let expanded: Vec<Option<i64>> = match start {
                Some(start) => (0..duration).map(|k| Some(start + k)).collect(),
                None => vec![None],
            };

            for period in expanded {
                let entry = AtomicEntry {
                    period,
                    subject: subject.clone(),
                    teacher: teacher.clone(),
                    room: room.clone(),
                    mask: card_mask.clone(),
                };
                if days.is_empty() {
                    buckets
                        .entry(UNKNOWN_DAY.to_string())
                        .or_default()
                        .push(entry);
                } else {
                    for day in &days {
                        buckets.entry(day.clone()).or_default().push(entry.clone());
                    }
                }
            }
        }
    }

    /* Deduplicate and merge every bucket, the Unknown one included */
    let merged_by_day: BTreeMap<String, Vec<MergedLesson>> = buckets
        .iter()
        .map(|(day, entries)| (day.clone(), merge_day_entries(&periods, entries)))
        .collect();

    if let Some(unplaced) = merged_by_day.get(UNKNOWN_DAY) {
        if !unplaced.is_empty() {
            debug!(
                "{} lesson(s) of class {} have no recoverable day: {:?}",
                unplaced.len(),
                class_name,
                unplaced
            );
        }
    }

    Ok(Schedule {
        days: days_order
            .into_iter()
            .map(|name| {
                let lessons = merged_by_day.get(&name).cloned().unwrap_or_default();
                ScheduleDay { name, lessons }
            })
            .collect(),
    })
}

/// Deduplicate one day's entries and collapse consecutive periods of the
/// same subject/teacher/room into ranges. Numeric ranges come first in
/// period order, unplaceable entries follow with an empty time span.
pub fn merge_day_entries(periods: &RowIndex<'_>, entries: &[AtomicEntry]) -> Vec<MergedLesson> {
    let mut seen = HashSet::new();
    let mut unique: Vec<&AtomicEntry> = Vec::new();
    for entry in entries {
        let key = (
            entry.period,
            entry.subject.as_str(),
            entry.teacher.as_str(),
            entry.room.as_str(),
        );
        if seen.insert(key) {
            unique.push(entry);
        }
    }

    let mut numeric: Vec<(i64, &AtomicEntry)> = unique
        .iter()
        .filter_map(|entry| entry.period.map(|period| (period, *entry)))
        .collect();
    numeric.sort_by_key(|(period, _)| *period);

    let mut merged = Vec::new();
    let mut i = 0;
    while i < numeric.len() {
        let (start, head) = numeric[i];
        let mut end = start;
        let mut j = i + 1;
        while j < numeric.len() {
            let (next_period, next) = numeric[j];
            if next_period == end + 1
                && next.subject == head.subject
                && next.teacher == head.teacher
                && next.room == head.room
            {
                end = next_period;
                j += 1;
            } else {
                break;
            }
        }
        merged.push(MergedLesson {
            number_start: Some(start),
            number_end: Some(end),
            time: period_time_range(periods, start, end),
            subject: head.subject.clone(),
            teacher: head.teacher.clone(),
            classroom: head.room.clone(),
        });
        i = j;
    }

    for entry in unique.iter().filter(|entry| entry.period.is_none()) {
        merged.push(MergedLesson {
            number_start: None,
            number_end: None,
            time: String::new(),
            subject: entry.subject.clone(),
            teacher: entry.teacher.clone(),
            classroom: entry.room.clone(),
        });
    }

    merged
}

/// Day names in source order, or the Russian five-day fallback.
fn day_names(set: &TableSet<'_>) -> Vec<String> {
    let names: Vec<String> = set
        .rows("days")
        .iter()
        .map(|row| {
            row.str_field(&["name", "short"])
                .unwrap_or_else(|| format!("Day {}", row.id().unwrap_or_default()))
        })
        .collect();
    if names.is_empty() {
        FALLBACK_DAYS.iter().map(|day| day.to_string()).collect()
    } else {
        names
    }
}

/// Case-insensitive, trimmed match of the class label against the
/// `classes` table. Fatal when nothing matches: a schedule for an unknown
/// class would be meaningless.
fn resolve_class_id(set: &TableSet<'_>, class_name: &str) -> Result<String, ScheduleError> {
    let wanted = class_name.trim().to_lowercase();
    for row in set.rows("classes") {
        let by_name = row
            .str_field(&["name"])
            .is_some_and(|name| name.trim().to_lowercase() == wanted);
        let by_short = row
            .str_field(&["short"])
            .is_some_and(|short| short.trim().to_lowercase() == wanted);
        if by_name || by_short {
            return row
                .id()
                .ok_or_else(|| ScheduleError::ClassNotFound(class_name.to_string()));
        }
    }
    Err(ScheduleError::ClassNotFound(class_name.to_string()))
}

fn subject_name(subjects: &RowIndex<'_>, lesson: &RawRow) -> String {
    let subject_id = lesson.value(&["subjectid"]).and_then(value_to_id);
    if let Some(row) = subject_id.as_ref().and_then(|id| subjects.get(id)) {
        if let Some(name) = row.str_field(&["name", "short"]) {
            return name;
        }
    }
    subject_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DASH.to_string())
}

/// Comma-joined teacher display names, deduplicated, empties dropped.
fn teacher_names(teachers: &RowIndex<'_>, lesson: &RawRow) -> String {
    let mut seen = HashSet::new();
    let names: Vec<String> = lesson
        .id_list(&["teacherids"])
        .iter()
        .map(|teacher_id| teacher_name(teachers.get(teacher_id).copied()))
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect();
    if names.is_empty() {
        DASH.to_string()
    } else {
        names.join(", ")
    }
}

/// Comma-joined room names; unknown room ids stay in the output as-is.
fn room_names(classrooms: &RowIndex<'_>, row: &RawRow) -> String {
    let names: Vec<String> = row
        .id_list(&["classroomids", "classroomid"])
        .iter()
        .map(|room_id| {
            classrooms
                .get(room_id)
                .and_then(|room| room.str_field(&["name", "short"]))
                .unwrap_or_else(|| room_id.clone())
        })
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        DASH.to_string()
    } else {
        names.join(", ")
    }
}

/// Raw day mask of a card or lesson row, empty when absent.
fn raw_mask(row: &RawRow) -> String {
    row.str_field(&["days", "daysmask", "daysdefid"])
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
