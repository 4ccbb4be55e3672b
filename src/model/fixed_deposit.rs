use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fixed_Deposit {
    pub id: Uuid,
    pub account_number: String,
    pub principal: BigDecimal,
    pub tenure_months: i32,
    pub interest_rate: BigDecimal,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub maturity_amount: BigDecimal,
    pub status: String,
    pub payout: Option<BigDecimal>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}
