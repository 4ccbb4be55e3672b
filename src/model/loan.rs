use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Loan {
    pub id: Uuid,
    pub account_number: String,
    pub principal: BigDecimal,
    pub purpose: String,
    pub tenure_months: i32,
    pub annual_income: BigDecimal,
    pub employment_status: String,
    pub interest_rate: BigDecimal,
    pub emi_amount: BigDecimal,
    pub total_payable: BigDecimal,
    pub total_paid: BigDecimal,
    pub balance_remaining: BigDecimal,
    pub status: String,
    pub requested_at: DateTime<Utc>,
    pub disbursed_at: Option<DateTime<Utc>>,
    pub next_due_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
    /// Payments made so far; due dates count months from disbursement.
    pub installments_paid: i32,
}
