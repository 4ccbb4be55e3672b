//! Loan endpoints
//!
//! Application, pricing preview, admin approval and repayments.

use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    configuration::{AppState, State},
    error::Error,
    finance::{amortization_schedule, monthly_installment, Installment},
    handler::loan,
    helpers::authorize,
    model::{History, Loan},
    types::{
        loan_tenure, parse_amount, LoanApplicationRequest, LoanPaymentRequest,
    },
};

#[derive(Debug, Serialize)]
pub struct LoanReceipt {
    pub loan: Loan,
    pub history: History,
}

// =============================================================================
// Per Account
// =============================================================================

#[get("/accounts/{account}/loans")]
pub async fn get_index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    let account_number = path.into_inner();
    let data = state.database.loan.get_by_account(&account_number).await?;

    Ok(web::Json(data))
}

#[post("/accounts/{account}/loans")]
pub async fn post_index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    data: web::Json<LoanApplicationRequest>,
) -> Result<impl Responder, Error> {
    let account_number = path.into_inner();
    let data = data.validate()?;
    let loan = loan::apply(&state, &account_number, data).await?;

    Ok(HttpResponse::Created().json(loan))
}

// =============================================================================
// Quote
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    amount: String,
    tenure_months: u32,
}

#[get("/loans/quote")]
pub async fn quote(
    state: web::Data<AppState<State>>,
    query: web::Query<QuoteQuery>,
) -> Result<impl Responder, Error> {
    let principal = parse_amount("amount", &query.amount)?;
    let tenure_months = loan_tenure(query.tenure_months)?;
    let quote = monthly_installment(
        &principal,
        tenure_months,
        &state.config.loan_interest_rate,
    )?;

    Ok(web::Json(quote))
}

// =============================================================================
// Single Loan
// =============================================================================

#[get("/loans/{id}")]
pub async fn get_loan(
    state: web::Data<AppState<State>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, Error> {
    let id = path.into_inner();
    let data = state
        .database
        .loan
        .get(id)
        .await?
        .ok_or_else(|| Error::LoanNotFound(id.to_string()))?;

    Ok(web::Json(data))
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub loan_id: Uuid,
    pub installments: Vec<Installment>,
}

/// Installments run from the disbursement date, or from today for a loan
/// still waiting for approval.
#[get("/loans/{id}/schedule")]
pub async fn schedule(
    state: web::Data<AppState<State>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, Error> {
    let id = path.into_inner();
    let loan = state
        .database
        .loan
        .get(id)
        .await?
        .ok_or_else(|| Error::LoanNotFound(id.to_string()))?;

    let start = loan.disbursed_at.unwrap_or_else(Utc::now).date_naive();
    let tenure_months = u32::try_from(loan.tenure_months).map_err(|_| {
        Error::InvalidState(format!("loan {} has no valid tenure", id))
    })?;
    let installments = amortization_schedule(
        &loan.principal,
        tenure_months,
        &loan.interest_rate,
        start,
    )?;

    Ok(web::Json(ScheduleResponse {
        loan_id: id,
        installments,
    }))
}

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    auth: Option<String>,
}

#[post("/loans/{id}/approve")]
pub async fn approve(
    state: web::Data<AppState<State>>,
    path: web::Path<Uuid>,
    query: web::Query<AdminQuery>,
) -> Result<impl Responder, Error> {
    authorize(query.auth.as_deref(), &state.config)?;

    let (loan, history) = loan::approve(&state, path.into_inner()).await?;

    Ok(web::Json(LoanReceipt { loan, history }))
}

#[post("/loans/{id}/reject")]
pub async fn reject(
    state: web::Data<AppState<State>>,
    path: web::Path<Uuid>,
    query: web::Query<AdminQuery>,
) -> Result<impl Responder, Error> {
    authorize(query.auth.as_deref(), &state.config)?;

    let loan = loan::reject(&state, path.into_inner()).await?;

    Ok(web::Json(loan))
}

#[post("/loans/{id}/payments")]
pub async fn payment(
    state: web::Data<AppState<State>>,
    path: web::Path<Uuid>,
    data: web::Json<LoanPaymentRequest>,
) -> Result<impl Responder, Error> {
    let data = data.validate()?;
    let today = Utc::now().date_naive();
    let (loan, history) =
        loan::pay(&state, path.into_inner(), data, today).await?;

    Ok(web::Json(LoanReceipt { loan, history }))
}
