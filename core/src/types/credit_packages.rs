use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditPackage {
    pub id: Uuid,
    pub name: String,
    pub credits: u32,
    pub price_cents: i64,
    #[serde(default)]
    pub stripe_price_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditPackageRequest {
    pub name: String,
    pub credits: u32,
    pub price_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stripe_price_id: Option<String>,
}
