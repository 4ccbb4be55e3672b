//! Account opening, registration and lookup.

use actix_web::{get, post, web, HttpResponse, Responder};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::account,
    helpers::authorize,
    types::{OpenAccountRequest, RegisterRequest},
};

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    auth: Option<String>,
}

#[post("/accounts")]
pub async fn open(
    state: web::Data<AppState<State>>,
    query: web::Query<AdminQuery>,
    data: web::Json<OpenAccountRequest>,
) -> Result<impl Responder, Error> {
    authorize(query.auth.as_deref(), &state.config)?;

    let data = data.validate()?;
    let account = account::open(&state, data).await?;

    Ok(HttpResponse::Created().json(account))
}

#[post("/accounts/register")]
pub async fn register(
    state: web::Data<AppState<State>>,
    data: web::Json<RegisterRequest>,
) -> Result<impl Responder, Error> {
    let account = account::register(&state, data.into_inner()).await?;

    Ok(web::Json(account))
}

/// What a sender sees about the receiving account before confirming.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub account_number: String,
    pub name: String,
    pub balance: BigDecimal,
}

#[get("/accounts/{account}")]
pub async fn summary(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    let account_number = path.into_inner();
    let account = state
        .database
        .account
        .get(&account_number)
        .await?
        .ok_or_else(|| {
            Error::AccountNotFound(account_number.to_owned())
        })?;

    Ok(web::Json(AccountSummary {
        account_number: account.account_number,
        name: account.name,
        balance: account.balance,
    }))
}
