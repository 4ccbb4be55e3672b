use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::recipient,
    types::RecipientRequest,
};

#[derive(Debug, Deserialize)]
pub struct Query {
    search: Option<String>,
}

#[get("/accounts/{account}/recipients")]
pub async fn get_index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    query: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let owner = path.into_inner();
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let data = state.database.recipient.get(&owner, search).await?;

    Ok(web::Json(data))
}

#[post("/accounts/{account}/recipients")]
pub async fn post_index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    data: web::Json<RecipientRequest>,
) -> Result<impl Responder, Error> {
    let owner = path.into_inner();
    let (name, account_number) = data.validate(&owner)?;
    let recipient =
        recipient::add(&state, &owner, &name, &account_number).await?;

    Ok(HttpResponse::Created().json(recipient))
}
