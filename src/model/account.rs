use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub date_of_birth: NaiveDate,
    pub balance: BigDecimal,
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Balance and holder name only, as read under a row lock.
#[derive(Debug, Clone, FromRow)]
pub struct Account_Balance {
    pub account_number: String,
    pub name: String,
    pub balance: BigDecimal,
}
