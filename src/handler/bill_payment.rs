use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{format_php, History_Type},
    ledger::{self, Mutation},
    model::History,
    types::BillPayment,
};

pub async fn pay(
    app_state: &AppState<State>,
    from_account: &str,
    data: BillPayment,
) -> Result<History, Error> {
    let detail = format!(
        "Bill payment of {} to {} (fee {})",
        format_php(&data.amount),
        data.biller,
        format_php(&data.fee)
    );
    let mut mutation =
        Mutation::outgoing(History_Type::Bill_Payment, from_account, data.amount)
            .fee(data.fee)
            .counterparty(data.biller)
            .detail(detail)
            .request_id(data.request_id);

    if let Some(receiver) = &data.receiver_account {
        mutation = mutation.destination(receiver);
    }

    let mut transaction = app_state.database.pool.begin().await?;
    let posting =
        ledger::apply(&app_state.database, &mut transaction, &mutation).await?;
    transaction.commit().await?;

    Ok(posting.history)
}
