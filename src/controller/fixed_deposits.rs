use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::fixed_deposit,
    model::{Fixed_Deposit, History},
    types::FixedDepositOpenRequest,
};

#[derive(Debug, Serialize)]
pub struct FixedDepositReceipt {
    pub fixed_deposit: Fixed_Deposit,
    pub history: History,
}

#[get("/accounts/{account}/fixed-deposits")]
pub async fn get_index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
) -> Result<impl Responder, Error> {
    let account_number = path.into_inner();
    let data = state
        .database
        .fixed_deposit
        .get_by_account(&account_number)
        .await?;

    Ok(web::Json(data))
}

#[post("/accounts/{account}/fixed-deposits")]
pub async fn post_index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    data: web::Json<FixedDepositOpenRequest>,
) -> Result<impl Responder, Error> {
    let account_number = path.into_inner();
    let data = data.validate()?;
    let today = Utc::now().date_naive();
    let (fixed_deposit, history) =
        fixed_deposit::open(&state, &account_number, data, today).await?;

    Ok(HttpResponse::Created().json(FixedDepositReceipt {
        fixed_deposit,
        history,
    }))
}

#[post("/fixed-deposits/{id}/withdraw")]
pub async fn withdraw(
    state: web::Data<AppState<State>>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, Error> {
    let today = Utc::now().date_naive();
    let (fixed_deposit, history) =
        fixed_deposit::withdraw(&state, path.into_inner(), today).await?;

    Ok(web::Json(FixedDepositReceipt {
        fixed_deposit,
        history,
    }))
}
