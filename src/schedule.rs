use std::fmt::Write;

use chrono::DateTime;
use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;
use serde_json::Value;
use thiserror::Error;

use crate::models::{ClassRecord, ClassView};

pub const DEFAULT_INSTRUCTOR: &str = "Coach";
pub const INVALID_TIME: &str = "--:--";

#[derive(Debug, Error)]
#[error("invalid time format {0:?}")]
pub struct InvalidTimeFormat(pub String);

/// Renders API instants as wall-clock times in the gym's timezone.
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    tz: Tz,
    pattern: String,
}

impl TimeFormatter {
    pub fn new(tz: Tz, pattern: &str) -> Result<Self, InvalidTimeFormat> {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(InvalidTimeFormat(pattern.to_string()));
        }
        Ok(Self {
            tz,
            pattern: pattern.to_string(),
        })
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn format(&self, instant: Option<&str>) -> String {
        let Some(parsed) = instant.and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        else {
            return INVALID_TIME.to_string();
        };
        let mut out = String::new();
        match write!(out, "{}", parsed.with_timezone(&self.tz).format(&self.pattern)) {
            Ok(()) => out,
            Err(_) => INVALID_TIME.to_string(),
        }
    }
}

/// Missing or null counts are zero; anything non-numeric is unknown.
fn count(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Some(_) => None,
    }
}

/// Whole spots remaining; a fractional remainder is dropped.
pub fn spots_left(capacity: Option<f64>, reserved: Option<f64>) -> Option<u64> {
    match (capacity, reserved) {
        (Some(capacity), Some(reserved)) => Some((capacity - reserved).max(0.0).floor() as u64),
        _ => None,
    }
}

/// Zero-capacity classes are never full.
pub fn is_full(capacity: Option<f64>, reserved: Option<f64>) -> bool {
    matches!((capacity, reserved), (Some(capacity), Some(reserved)) if capacity > 0.0 && reserved >= capacity)
}

pub fn normalize(record: &ClassRecord, formatter: &TimeFormatter) -> ClassView {
    let capacity = count(record.capacity.as_ref());
    let reserved = count(record.reserved_count.as_ref());

    ClassView {
        id: record.id.clone(),
        title: record.title.clone(),
        start: formatter.format(record.start_at.as_deref()),
        end: formatter.format(record.end_at.as_deref()),
        instructor: record
            .instructor
            .as_ref()
            .and_then(|i| i.name.clone())
            .unwrap_or_else(|| DEFAULT_INSTRUCTOR.to_string()),
        spots_left: spots_left(capacity, reserved),
        full: is_full(capacity, reserved),
        reserved: record.user_status.as_deref() == Some("reserved"),
        description: record.description.clone(),
    }
}
