use std::collections::BTreeMap;

use serde_json::Value;

use super::models::edupage_model::{value_to_i64, value_to_id, RawRow, RawTable};

/// Placeholder for anything the dump fails to name.
pub const DASH: &str = "—";

/// Rows of one table keyed by their id.
pub type RowIndex<'a> = BTreeMap<String, &'a RawRow>;

/// All tables of one dump, addressable by table id. Missing tables resolve
/// to empty row sets, the source omits whole tables depending on the
/// deployment.
pub struct TableSet<'a> {
    tables: &'a [RawTable],
}

impl<'a> TableSet<'a> {
    pub fn new(tables: &'a [RawTable]) -> Self {
        Self { tables }
    }

    pub fn find(&self, id: &str) -> Option<&'a RawTable> {
        self.tables.iter().find(|table| table.id == id)
    }

    pub fn rows(&self, id: &str) -> &'a [RawRow] {
        self.find(id)
            .map(|table| table.data_rows.as_slice())
            .unwrap_or(&[])
    }

    /// Index the named table by row id. Rows without an id are skipped.
    pub fn index(&self, id: &str) -> RowIndex<'a> {
        let mut index = BTreeMap::new();
        for row in self.rows(id) {
            if let Some(row_id) = row.id() {
                index.insert(row_id, row);
            }
        }
        index
    }
}

/// Display name of a teacher row: full `name`, else composed first/last
/// name, else the short code, else a dash. Never fails.
pub fn teacher_name(row: Option<&RawRow>) -> String {
    let Some(row) = row else {
        return DASH.to_string();
    };
    if let Some(name) = row.str_field(&["name"]) {
        return name;
    }
    let firstname = row.str_field(&["firstname"]).unwrap_or_default();
    let lastname = row.str_field(&["lastname"]).unwrap_or_default();
    let composed = format!("{} {}", firstname.trim(), lastname.trim())
        .trim()
        .to_string();
    if !composed.is_empty() {
        return composed;
    }
    row.str_field(&["short"]).unwrap_or_else(|| DASH.to_string())
}

/// Resolve a numeric period number from a card/lesson "period" value.
/// Tries a direct id hit, then a scan for rows whose `id` or `short`
/// equals the value, then a plain numeric parse of the value itself.
pub fn resolve_period_number(periods: &RowIndex<'_>, raw: Option<&Value>) -> Option<i64> {
    let raw = raw?;
    let key = value_to_id(raw)?;
    if let Some(row) = periods.get(&key) {
        return row.value(&["period", "short", "id"]).and_then(value_to_i64);
    }
    for row in periods.values() {
        let by_id = row.id().is_some_and(|id| id == key);
        let by_short = row.str_field(&["short"]).is_some_and(|s| s == key);
        if by_id || by_short {
            return row.value(&["period", "short", "id"]).and_then(value_to_i64);
        }
    }
    value_to_i64(raw)
}

/// `"HH:MM-HH:MM"` span from the start of `start` to the end of `end`,
/// empty when either endpoint has no period row.
pub fn period_time_range(periods: &RowIndex<'_>, start: i64, end: i64) -> String {
    let Some(start_row) = find_period_row(periods, start) else {
        return String::new();
    };
    let Some(end_row) = find_period_row(periods, end) else {
        return String::new();
    };
    let start_time = start_row
        .str_field(&["starttime", "start"])
        .unwrap_or_default();
    let end_time = end_row.str_field(&["endtime", "end"]).unwrap_or_default();
    format!("{}-{}", start_time, end_time)
        .trim_matches('-')
        .to_string()
}

fn find_period_row<'a>(periods: &RowIndex<'a>, number: i64) -> Option<&'a RawRow> {
    let key = number.to_string();
    if let Some(row) = periods.get(&key) {
        return Some(row);
    }
    periods
        .values()
        .find(|row| {
            let by_period = row
                .value(&["period"])
                .and_then(value_to_id)
                .is_some_and(|p| p == key);
            let by_short = row.str_field(&["short"]).is_some_and(|s| s == key);
            by_period || by_short
        })
        .copied()
}
