use actix_web::{post, web, Responder};

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::transfer,
    types::TransferRequest,
};

#[post("/accounts/{account}/transfers")]
pub async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    data: web::Json<TransferRequest>,
) -> Result<impl Responder, Error> {
    let from_account = path.into_inner();
    let data = data.validate(&from_account)?;
    let history = transfer::transfer(&state, &from_account, data).await?;

    Ok(web::Json(history))
}
