use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discount code as stored by the backend. Exactly one of
/// `discount_percent` and `discount_amount_cents` is normally set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscountResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub discount_percent: Option<u32>,
    #[serde(default)]
    pub discount_amount_cents: Option<i64>,
    #[serde(default)]
    pub max_redemptions: Option<u32>,
    #[serde(default)]
    pub times_redeemed: u32,
    #[serde(default)]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountRequest {
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_redemptions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Discount as shown in the discounts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discount {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub label: String,
    pub remaining_redemptions: Option<u32>,
    pub active: bool,
}
