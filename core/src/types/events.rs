use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventResponse {
    pub id: Uuid,
    #[serde(default)]
    pub program_name: Option<String>,
    pub location_id: Uuid,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub court_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub enrolled: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    pub location_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

/// Time window for the schedule view.
#[derive(Debug, Clone)]
pub struct EventWindow {
    pub after: DateTime<Utc>,
    pub before: DateTime<Utc>,
    pub location_id: Option<Uuid>,
}

/// Event as shown on the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub spots_left: Option<u32>,
}
