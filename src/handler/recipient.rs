use crate::{
    configuration::{AppState, State},
    error::Error,
    model::Recipient,
};

pub async fn add(
    app_state: &AppState<State>,
    owner: &str,
    name: &str,
    recipient_account: &str,
) -> Result<Recipient, Error> {
    let database = &app_state.database;

    if !database.account.is_exists(owner).await? {
        return Err(Error::AccountNotFound(owner.to_owned()));
    }
    if !database.account.is_exists(recipient_account).await? {
        return Err(Error::AccountNotFound(recipient_account.to_owned()));
    }

    let mut transaction = database.pool.begin().await?;
    let recipient = database
        .recipient
        .insert(owner, name, recipient_account, &mut transaction)
        .await?
        .ok_or_else(|| {
            Error::DuplicateField(String::from("recipient_account"))
        })?;
    transaction.commit().await?;

    Ok(recipient)
}
