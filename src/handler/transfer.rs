use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{format_php, History_Type},
    ledger::{self, Mutation},
    model::History,
    types::Transfer,
};

pub async fn transfer(
    app_state: &AppState<State>,
    from_account: &str,
    data: Transfer,
) -> Result<History, Error> {
    let detail = format!(
        "Transfer of {} to account {}",
        format_php(&data.amount),
        data.to_account
    );
    let mutation =
        Mutation::outgoing(History_Type::Transfer, from_account, data.amount)
            .destination(&data.to_account)
            .counterparty(data.to_account)
            .detail(detail)
            .request_id(data.request_id);

    let mut transaction = app_state.database.pool.begin().await?;
    let posting =
        ledger::apply(&app_state.database, &mut transaction, &mutation).await?;
    transaction.commit().await?;

    Ok(posting.history)
}
