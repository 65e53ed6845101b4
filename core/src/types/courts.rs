use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Court {
    pub id: Uuid,
    pub name: String,
    pub location_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourtRequest {
    pub name: String,
    pub location_id: Uuid,
}
