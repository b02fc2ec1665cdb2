use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Class record as returned by the gym API.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ClassRecord {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    #[serde(default)]
    pub capacity: Option<Value>,
    #[serde(default)]
    pub reserved_count: Option<Value>,
    #[serde(default)]
    pub instructor: Option<Instructor>,
    #[serde(default)]
    pub user_status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Instructor {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participant {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Display-ready class.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassView {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub instructor: String,
    pub spots_left: Option<u64>,
    pub full: bool,
    pub reserved: bool,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub client_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthFailure {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClassListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClassDetailResponse {
    #[serde(default)]
    pub success: bool,
    pub class: Option<ClassRecord>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassDetail {
    pub class: Option<ClassRecord>,
    pub participants: Vec<Participant>,
}

/// `{success:false, error}` body that may accompany a non-2xx status.
#[derive(Debug, Deserialize)]
pub struct FailureEnvelope {
    pub success: bool,
    pub error: Option<String>,
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
