use chrono::Utc;

use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::money,
    model::Account,
    types::{OpenAccount, RegisterRequest},
};

use super::map_duplicate;

pub async fn open(
    app_state: &AppState<State>,
    data: OpenAccount,
) -> Result<Account, Error> {
    let now = Utc::now();
    let account = Account {
        account_number: data.account_number,
        name: data.name,
        email: data.email,
        mobile: data.mobile,
        date_of_birth: data.date_of_birth,
        balance: money(&data.initial_balance),
        user_id: None,
        created_at: now,
        updated_at: now,
    };

    let mut transaction = app_state.database.pool.begin().await?;
    app_state
        .database
        .account
        .insert(&account, &mut transaction)
        .await
        .map_err(|e| map_duplicate(e, "account_number"))?;
    transaction.commit().await?;

    tracing::info!("Opened account {}", account.account_number);

    Ok(account)
}

/// Links an identity-provider user to the account whose holder details
/// match the request.
pub async fn register(
    app_state: &AppState<State>,
    data: RegisterRequest,
) -> Result<Account, Error> {
    let user_id = data.user_id()?;
    let user_id = user_id.as_str();
    let account_number = data.account_number.trim();

    let mut transaction = app_state.database.pool.begin().await?;
    let mut account = app_state
        .database
        .account
        .get_for_update(account_number, &mut transaction)
        .await?
        .ok_or_else(|| Error::AccountNotFound(account_number.to_owned()))?;

    if let Some(field) = data.mismatch(&account) {
        return Err(Error::Validation(format!(
            "{} does not match the account holder details",
            field
        )));
    }

    match account.user_id.as_deref() {
        Some(linked) if linked == user_id => return Ok(account),
        Some(_) => {
            return Err(Error::InvalidState(format!(
                "account {} is already registered",
                account.account_number
            )));
        },
        None => {},
    }

    app_state
        .database
        .account
        .link_user(account_number, user_id, &mut transaction)
        .await
        .map_err(|e| map_duplicate(e, "user_id"))?;
    transaction.commit().await?;

    tracing::info!("Registered user {} on account {}", user_id, account_number);

    account.user_id = Some(user_id.to_owned());
    account.updated_at = Utc::now();

    Ok(account)
}
