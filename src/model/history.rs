use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct History {
    pub id: i64,
    pub reference: String,
    pub account_number: String,
    pub kind: String,
    pub amount: BigDecimal,
    pub fee: BigDecimal,
    pub balance_after: BigDecimal,
    pub counterparty: Option<String>,
    pub detail: String,
    pub request_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
