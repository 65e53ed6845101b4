use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::courts::Court;
use super::locations::Location;
use super::teams::Team;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResponse {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub home_team_name: String,
    pub away_team_id: Uuid,
    pub away_team_name: String,
    pub location_id: Uuid,
    pub location_name: String,
    #[serde(default)]
    pub court_id: Option<Uuid>,
    #[serde(default)]
    pub court_name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub home_score: Option<i32>,
    #[serde(default)]
    pub away_score: Option<i32>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub location_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_score: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub away_score: Option<i32>,
}

/// Game as shown on the schedule board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: Uuid,
    pub title: String,
    pub venue: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub score: Option<String>,
    pub status: String,
}

/// Everything the game form needs for its select inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFormOptions {
    pub locations: Vec<Location>,
    pub teams: Vec<Team>,
    pub courts: Vec<Court>,
}
