use std::str::FromStr as _;

use actix_web::{get, web, Responder};
use serde::Deserialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{is_reference, History_Type},
};

#[derive(Debug, Deserialize)]
pub struct Query {
    skip: Option<i64>,
    limit: Option<i64>,
    kind: Option<String>,
}

#[get("/accounts/{account}/history")]
pub async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let account_number = path.into_inner();
    let skip = query.skip.unwrap_or(0).max(0);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let kind = match query.kind.as_deref() {
        Some(kind) => Some(String::from(
            History_Type::from_str(kind)
                .map_err(|e| Error::Validation(e.to_string()))?,
        )),
        None => None,
    };

    if !state.database.account.is_exists(&account_number).await? {
        return Err(Error::AccountNotFound(account_number));
    }

    let data = state
        .database
        .history
        .get(&account_number, kind, skip, limit)
        .await?;

    Ok(web::Json(data))
}

#[get("/accounts/{account}/history/{reference}")]
pub async fn reference(
    state: web::Data<AppState<State>>,
    path: web::Path<(String, String)>,
) -> Result<impl Responder, Error> {
    let (account_number, reference) = path.into_inner();

    if !is_reference(&reference) {
        return Err(Error::Validation(format!(
            "{} is not a transaction reference",
            reference
        )));
    }

    let data = state
        .database
        .history
        .get_by_reference(&account_number, &reference)
        .await?
        .ok_or_else(|| {
            Error::HistoryNotFound(reference.to_owned())
        })?;

    Ok(web::Json(data))
}
