use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    configuration::{AppState, State},
    error::Error,
    finance::{add_months, maturity_amount, withdrawal},
    helpers::{format_php, Deposit_Status, History_Type},
    ledger::{self, Mutation},
    model::{Fixed_Deposit, History},
    types::FixedDepositOpen,
};

/// Moves the principal out of the account into a new deposit.
pub async fn open(
    app_state: &AppState<State>,
    account_number: &str,
    data: FixedDepositOpen,
    today: NaiveDate,
) -> Result<(Fixed_Deposit, History), Error> {
    let database = &app_state.database;
    let interest_rate = app_state.config.fixed_deposit_interest_rate.to_owned();

    let maturity_amount =
        maturity_amount(&data.principal, &interest_rate, data.tenure_months)?;
    let maturity_date = add_months(today, data.tenure_months)?;
    let tenure_months = i32::try_from(data.tenure_months).map_err(|_| {
        Error::Validation(String::from("tenure_months is out of range"))
    })?;

    let deposit = Fixed_Deposit {
        id: Uuid::new_v4(),
        account_number: account_number.to_owned(),
        principal: data.principal.to_owned(),
        tenure_months,
        interest_rate,
        start_date: today,
        maturity_date,
        maturity_amount,
        status: String::from(Deposit_Status::Active),
        payout: None,
        created_at: Utc::now(),
        closed_at: None,
    };

    let mutation = Mutation::outgoing(
        History_Type::Fixed_Deposit_Open,
        account_number,
        data.principal,
    )
    .minted_counterparty(deposit.id.to_string())
    .detail(format!(
        "Fixed deposit of {} for {} months, {} at maturity on {}",
        format_php(&deposit.principal),
        deposit.tenure_months,
        format_php(&deposit.maturity_amount),
        deposit.maturity_date
    ))
    .request_id(data.request_id);

    let mut transaction = database.pool.begin().await?;
    let posting = ledger::apply(database, &mut transaction, &mutation).await?;

    if posting.replayed {
        let id = posting
            .history
            .counterparty
            .as_deref()
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(|| {
                Error::InvalidState(format!(
                    "history {} does not reference a fixed deposit",
                    posting.history.reference
                ))
            })?;
        let deposit = database
            .fixed_deposit
            .get_for_update(id, &mut transaction)
            .await?
            .ok_or_else(|| Error::FixedDepositNotFound(id.to_string()))?;

        return Ok((deposit, posting.history));
    }

    database
        .fixed_deposit
        .insert(&deposit, &mut transaction)
        .await?;
    transaction.commit().await?;

    Ok((deposit, posting.history))
}

/// Closes an active deposit; the payout depends on whether it has matured
/// by `today`.
pub async fn withdraw(
    app_state: &AppState<State>,
    id: Uuid,
    today: NaiveDate,
) -> Result<(Fixed_Deposit, History), Error> {
    let database = &app_state.database;
    let mut transaction = database.pool.begin().await?;

    let mut deposit = database
        .fixed_deposit
        .get_for_update(id, &mut transaction)
        .await?
        .ok_or_else(|| Error::FixedDepositNotFound(id.to_string()))?;

    let settlement = withdrawal(&deposit, today)?;
    let detail = match settlement.status {
        Deposit_Status::Matured => format!(
            "Matured fixed deposit payout of {}",
            format_php(&settlement.payout)
        ),
        _ => format!(
            "Early fixed deposit withdrawal of {}, interest forfeited",
            format_php(&settlement.payout)
        ),
    };

    let mutation = Mutation::incoming(
        History_Type::Fixed_Deposit_Withdraw,
        &deposit.account_number,
        settlement.payout.to_owned(),
    )
    .counterparty(deposit.id.to_string())
    .detail(detail);

    let posting = ledger::apply(database, &mut transaction, &mutation).await?;
    database
        .fixed_deposit
        .close(id, settlement.status, &settlement.payout, &mut transaction)
        .await?;
    transaction.commit().await?;

    tracing::info!(
        "Fixed deposit {} closed as {}, payout {}",
        id,
        settlement.status,
        settlement.payout
    );

    deposit.status = String::from(settlement.status);
    deposit.payout = Some(settlement.payout);
    deposit.closed_at = Some(Utc::now());

    Ok((deposit, posting.history))
}
