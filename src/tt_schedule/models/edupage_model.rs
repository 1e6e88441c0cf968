//! Module with models compatible with edupage's regulartt dbi payload
use serde::Deserialize;
use serde_json::{Map, Value};

/// Envelope of the regulartt response:
/// `{ "r": { "dbiAccessorRes": { "tables": [...] } } }`.
/// Every level defaults when absent, so a structurally empty body
/// normalizes to zero tables instead of a decode failure.
#[derive(Deserialize, Debug, Default)]
pub struct RegularTtResponse {
    #[serde(default)]
    pub r: RegularTtResult,
}

#[derive(Deserialize, Debug, Default)]
pub struct RegularTtResult {
    #[serde(rename = "dbiAccessorRes", default)]
    pub dbi_accessor_res: DbiAccessorRes,
}

#[derive(Deserialize, Debug, Default)]
pub struct DbiAccessorRes {
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

/// One named table of the dump. Rows are kept schema-loose on purpose:
/// field names and value types differ between school deployments.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct RawTable {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub data_rows: Vec<RawRow>,
}

/// One row of a raw table. Fields are only reachable through the accessors
/// below, which spell out every accepted field-name fallback and coerce
/// values the way the source mixes them (string ids next to numeric ids,
/// scalars next to lists).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(transparent)]
pub struct RawRow(pub Map<String, Value>);

impl RawRow {
    pub fn id(&self) -> Option<String> {
        self.0.get("id").and_then(value_to_id)
    }

    /// First non-empty string among `keys`, numbers rendered as strings.
    pub fn str_field(&self, keys: &[&str]) -> Option<String> {
        for key in keys {
            if let Some(s) = self.0.get(*key).and_then(value_to_id) {
                if !s.is_empty() {
                    return Some(s);
                }
            }
        }
        None
    }

    /// First present, non-null value among `keys`.
    pub fn value(&self, keys: &[&str]) -> Option<&Value> {
        for key in keys {
            if let Some(v) = self.0.get(*key) {
                if !v.is_null() {
                    return Some(v);
                }
            }
        }
        None
    }

    /// Field that may hold one id or a list of ids. The first present key
    /// wins even when it holds an empty list.
    pub fn id_list(&self, keys: &[&str]) -> Vec<String> {
        for key in keys {
            match self.0.get(*key) {
                Some(Value::Array(items)) => {
                    return items.iter().filter_map(value_to_id).collect();
                }
                Some(v) if !v.is_null() => {
                    return value_to_id(v).into_iter().collect();
                }
                _ => continue,
            }
        }
        Vec::new()
    }
}

/// Render a scalar the way the source compares ids: `"3"` and `3` are the
/// same key.
pub fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn value_to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Userinfo payload of the contingent API; only the class label is consumed.
#[derive(Deserialize, Debug)]
pub struct AdditionalUserInfo {
    pub data: AdditionalUserData,
}

#[derive(Deserialize, Debug)]
pub struct AdditionalUserData {
    #[serde(rename = "Klass")]
    pub klass: Option<String>,
}
