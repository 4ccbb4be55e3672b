use actix_web::{post, web, Responder};

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::bill_payment,
    types::BillPaymentRequest,
};

#[post("/accounts/{account}/bills")]
pub async fn index(
    state: web::Data<AppState<State>>,
    path: web::Path<String>,
    data: web::Json<BillPaymentRequest>,
) -> Result<impl Responder, Error> {
    let from_account = path.into_inner();
    let data =
        data.validate(&from_account, &state.config.bill_payment_fee_rate)?;
    let history = bill_payment::pay(&state, &from_account, data).await?;

    Ok(web::Json(history))
}
