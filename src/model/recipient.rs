use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipient {
    pub id: i64,
    pub account_number: String,
    pub name: String,
    pub recipient_account: String,
    pub created_at: DateTime<Utc>,
}
