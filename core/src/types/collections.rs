use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverdueInvoice {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub amount_due_cents: i64,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub attempts: u32,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionAttemptRequest {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_collected_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionAttempt {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub method: String,
    pub created_at: DateTime<Utc>,
}

/// Overdue invoice as shown on the collections board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItem {
    pub invoice_id: Uuid,
    pub customer_name: String,
    pub amount_due: String,
    pub days_overdue: i64,
    pub attempts: u32,
}
