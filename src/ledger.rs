//! Balance mutations.
//!
//! Every movement of money goes through [`apply`]: lock the affected
//! accounts, [`plan`] the new balances from the locked snapshot, write them
//! and append one history record, all inside the caller's transaction.

use bigdecimal::{BigDecimal, Zero as _};
use sqlx::Transaction;

use crate::{
    dao::DataBase,
    error::Error,
    helpers::{generate_reference, money, History_Type, MAX_REFERENCE_ATTEMPTS},
    model::{Account_Balance, History},
    provider::DatabasePool,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Source pays `amount + fee`; the destination, if any, receives `amount`.
    Outgoing,
    /// Source receives `amount`.
    Incoming,
}

#[derive(Debug, Clone)]
pub struct Mutation {
    pub kind: History_Type,
    pub source: String,
    pub destination: Option<String>,
    pub amount: BigDecimal,
    pub fee: BigDecimal,
    pub flow: Flow,
    pub counterparty: Option<String>,
    /// The counterparty is created by this request, so a replay cannot
    /// carry the same value.
    pub counterparty_minted: bool,
    pub detail: String,
    pub request_id: Option<String>,
}

impl Mutation {
    pub fn outgoing(
        kind: History_Type,
        source: &str,
        amount: BigDecimal,
    ) -> Mutation {
        Mutation {
            kind,
            source: source.to_owned(),
            destination: None,
            amount,
            fee: BigDecimal::zero(),
            flow: Flow::Outgoing,
            counterparty: None,
            counterparty_minted: false,
            detail: String::new(),
            request_id: None,
        }
    }

    pub fn incoming(
        kind: History_Type,
        source: &str,
        amount: BigDecimal,
    ) -> Mutation {
        Mutation {
            flow: Flow::Incoming,
            ..Mutation::outgoing(kind, source, amount)
        }
    }

    pub fn destination(mut self, account_number: &str) -> Mutation {
        self.destination = Some(account_number.to_owned());
        self
    }

    pub fn fee(mut self, fee: BigDecimal) -> Mutation {
        self.fee = fee;
        self
    }

    pub fn counterparty(mut self, counterparty: String) -> Mutation {
        self.counterparty = Some(counterparty);
        self
    }

    pub fn minted_counterparty(mut self, counterparty: String) -> Mutation {
        self.counterparty = Some(counterparty);
        self.counterparty_minted = true;
        self
    }

    /// Counterparty a replayed history record must carry.
    fn replay_counterparty(&self) -> Option<&str> {
        if self.counterparty_minted {
            return None;
        }

        self.counterparty.as_deref()
    }

    pub fn detail(mut self, detail: String) -> Mutation {
        self.detail = detail;
        self
    }

    pub fn request_id(mut self, request_id: Option<String>) -> Mutation {
        self.request_id = request_id;
        self
    }

    fn validate(&self) -> Result<(), Error> {
        if self.amount <= BigDecimal::zero() {
            return Err(Error::Validation(String::from(
                "amount must be greater than zero",
            )));
        }
        if money(&self.amount) != self.amount {
            return Err(Error::Validation(String::from(
                "amount must have at most two fraction digits",
            )));
        }
        if self.fee < BigDecimal::zero() || money(&self.fee) != self.fee {
            return Err(Error::Validation(String::from(
                "fee must be a non-negative amount",
            )));
        }
        if self.destination.as_deref() == Some(self.source.as_str()) {
            return Err(Error::Validation(String::from(
                "source and destination accounts must differ",
            )));
        }
        if self.flow == Flow::Incoming
            && (self.destination.is_some() || !self.fee.is_zero())
        {
            return Err(Error::Validation(String::from(
                "a credit has neither destination nor fee",
            )));
        }

        Ok(())
    }
}

/// History record waiting for its reference.
#[derive(Debug, Clone, PartialEq)]
pub struct History_Entry {
    pub account_number: String,
    pub kind: History_Type,
    pub amount: BigDecimal,
    pub fee: BigDecimal,
    pub balance_after: BigDecimal,
    pub counterparty: Option<String>,
    pub detail: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Balance_Write {
    pub account_number: String,
    pub balance: BigDecimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub writes: Vec<Balance_Write>,
    pub entry: History_Entry,
}

#[derive(Debug, Clone)]
pub struct Posting {
    pub history: History,
    /// The request id was seen before and nothing was written.
    pub replayed: bool,
}

/// Computes every write of `mutation` against locked balances.
///
/// Fails before producing anything when the mutation is malformed or the
/// source cannot cover it.
pub fn plan(
    mutation: &Mutation,
    source: &Account_Balance,
    destination: Option<&Account_Balance>,
) -> Result<Plan, Error> {
    mutation.validate()?;

    if source.account_number != mutation.source {
        return Err(Error::AccountNotFound(mutation.source.to_owned()));
    }

    match (&mutation.destination, destination) {
        (None, None) => {},
        (Some(expected), Some(account))
            if &account.account_number == expected => {},
        (Some(expected), _) => {
            return Err(Error::AccountNotFound(expected.to_owned()));
        },
        (None, Some(account)) => {
            return Err(Error::Validation(format!(
                "unexpected destination {}",
                account.account_number
            )));
        },
    }

    let mut writes = Vec::with_capacity(2);

    let source_balance = match mutation.flow {
        Flow::Outgoing => {
            let required = money(&(&mutation.amount + &mutation.fee));
            let available = money(&source.balance);
            if available < required {
                return Err(Error::InsufficientFunds {
                    required,
                    available,
                });
            }
            money(&(available - required))
        },
        Flow::Incoming => money(&(&source.balance + &mutation.amount)),
    };

    writes.push(Balance_Write {
        account_number: source.account_number.to_owned(),
        balance: source_balance.clone(),
    });

    if let Some(account) = destination {
        writes.push(Balance_Write {
            account_number: account.account_number.to_owned(),
            balance: money(&(&account.balance + &mutation.amount)),
        });
    }

    let entry = History_Entry {
        account_number: source.account_number.to_owned(),
        kind: mutation.kind,
        amount: money(&mutation.amount),
        fee: money(&mutation.fee),
        balance_after: source_balance,
        counterparty: mutation.counterparty.to_owned(),
        detail: mutation.detail.to_owned(),
        request_id: mutation.request_id.to_owned(),
    };

    Ok(Plan { writes, entry })
}

/// A request id reused for another kind of operation, or for another
/// counterparty, is rejected instead of answered with the stored record.
pub fn same_request(
    history: &History,
    kind: History_Type,
    counterparty: Option<&str>,
) -> Result<(), Error> {
    let same_kind = history.kind == String::from(kind);
    let same_counterparty = match counterparty {
        Some(expected) => history.counterparty.as_deref() == Some(expected),
        None => true,
    };

    if !same_kind || !same_counterparty {
        return Err(Error::DuplicateField(String::from("request_id")));
    }

    Ok(())
}

/// History stored earlier under the same request id, if any.
///
/// `counterparty` is compared only when given.
pub async fn replayed(
    database: &DatabasePool,
    transaction: &mut Transaction<'_, DataBase>,
    account_number: &str,
    request_id: Option<&str>,
    kind: History_Type,
    counterparty: Option<&str>,
) -> Result<Option<History>, Error> {
    let Some(request_id) = request_id else {
        return Ok(None);
    };

    let history = database
        .history
        .get_by_request_id(account_number, request_id, transaction)
        .await?;

    if let Some(history) = &history {
        same_request(history, kind, counterparty)?;
    }

    Ok(history)
}

/// Runs `mutation` inside `transaction`.
///
/// Accounts are locked in ascending account-number order. Nothing is
/// written unless [`plan`] succeeds; the caller commits.
pub async fn apply(
    database: &DatabasePool,
    transaction: &mut Transaction<'_, DataBase>,
    mutation: &Mutation,
) -> Result<Posting, Error> {
    mutation.validate()?;

    let mut numbers = vec![mutation.source.as_str()];
    if let Some(destination) = &mutation.destination {
        numbers.push(destination.as_str());
    }
    numbers.sort_unstable();

    let mut locked = Vec::with_capacity(numbers.len());
    for number in numbers {
        let account = database
            .account
            .lock_balance(number, transaction)
            .await?
            .ok_or_else(|| Error::AccountNotFound(number.to_owned()))?;
        locked.push(account);
    }

    if let Some(history) = replayed(
        database,
        transaction,
        &mutation.source,
        mutation.request_id.as_deref(),
        mutation.kind,
        mutation.replay_counterparty(),
    )
    .await?
    {
        tracing::info!(
            "Replayed {} for request {:?}",
            history.reference,
            history.request_id
        );
        return Ok(Posting {
            history,
            replayed: true,
        });
    }

    let find = |number: &str| {
        locked.iter().find(|account| account.account_number == number)
    };
    let source = find(&mutation.source)
        .ok_or_else(|| Error::AccountNotFound(mutation.source.to_owned()))?;
    let destination = match &mutation.destination {
        Some(number) => Some(
            find(number)
                .ok_or_else(|| Error::AccountNotFound(number.to_owned()))?,
        ),
        None => None,
    };

    let plan = plan(mutation, source, destination)?;

    for write in &plan.writes {
        database
            .account
            .update_balance(&write.account_number, &write.balance, transaction)
            .await?;
    }

    for _ in 0..MAX_REFERENCE_ATTEMPTS {
        let reference = generate_reference();
        if let Some(history) = database
            .history
            .insert(&reference, &plan.entry, transaction)
            .await?
        {
            tracing::info!(
                "Posted {} {} on account {}: amount {}, fee {}",
                history.kind,
                history.reference,
                history.account_number,
                history.amount,
                history.fee
            );
            return Ok(Posting {
                history,
                replayed: false,
            });
        }

        tracing::warn!("Reference {} already taken, drawing again", reference);
    }

    Err(Error::ReferenceExhausted(MAX_REFERENCE_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use bigdecimal::Zero as _;

    use super::*;

    fn decimal(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn account(number: &str, balance: &str) -> Account_Balance {
        Account_Balance {
            account_number: number.to_owned(),
            name: format!("Holder {}", number),
            balance: decimal(balance),
        }
    }

    fn transfer(amount: &str) -> Mutation {
        Mutation::outgoing(History_Type::Transfer, "1001", decimal(amount))
            .destination("1002")
            .counterparty(String::from("1002"))
            .detail(String::from("Transfer to 1002"))
    }

    #[test]
    fn test_transfer_moves_amount_between_accounts() {
        let source = account("1001", "500.00");
        let destination = account("1002", "20.00");

        let plan = plan(&transfer("120.50"), &source, Some(&destination)).unwrap();

        assert_eq!(
            plan.writes,
            vec![
                Balance_Write {
                    account_number: String::from("1001"),
                    balance: decimal("379.50"),
                },
                Balance_Write {
                    account_number: String::from("1002"),
                    balance: decimal("140.50"),
                },
            ]
        );
        assert_eq!(plan.entry.account_number, "1001");
        assert_eq!(plan.entry.kind, History_Type::Transfer);
        assert_eq!(plan.entry.amount, decimal("120.50"));
        assert_eq!(plan.entry.balance_after, decimal("379.50"));
        assert_eq!(plan.entry.counterparty.as_deref(), Some("1002"));
    }

    #[test]
    fn test_transfer_of_whole_balance_is_allowed() {
        let source = account("1001", "100.00");
        let destination = account("1002", "0.00");

        let plan = plan(&transfer("100"), &source, Some(&destination)).unwrap();
        assert!(plan.writes[0].balance.is_zero());
    }

    #[test]
    fn test_insufficient_funds_produces_no_plan() {
        let source = account("1001", "100.00");
        let destination = account("1002", "0.00");

        let result = plan(&transfer("100.01"), &source, Some(&destination));

        match result {
            Err(Error::InsufficientFunds {
                required,
                available,
            }) => {
                assert_eq!(required, decimal("100.01"));
                assert_eq!(available, decimal("100.00"));
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_fee_is_charged_to_source_only() {
        let source = account("1001", "1000.00");
        let destination = account("1002", "0.00");
        let mutation =
            Mutation::outgoing(History_Type::Bill_Payment, "1001", decimal("500"))
                .destination("1002")
                .fee(decimal("5.00"));

        let plan = plan(&mutation, &source, Some(&destination)).unwrap();

        assert_eq!(plan.writes[0].balance, decimal("495.00"));
        assert_eq!(plan.writes[1].balance, decimal("500.00"));
        assert_eq!(plan.entry.fee, decimal("5.00"));
    }

    #[test]
    fn test_fee_counts_against_balance() {
        let source = account("1001", "500.00");
        let mutation =
            Mutation::outgoing(History_Type::Bill_Payment, "1001", decimal("500"))
                .fee(decimal("5.00"));

        let result = plan(&mutation, &source, None);
        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
    }

    #[test]
    fn test_incoming_credits_source() {
        let source = account("1001", "10.00");
        let mutation = Mutation::incoming(
            History_Type::Loan_Disbursement,
            "1001",
            decimal("100000"),
        );

        let plan = plan(&mutation, &source, None).unwrap();

        assert_eq!(plan.writes.len(), 1);
        assert_eq!(plan.writes[0].balance, decimal("100010.00"));
        assert_eq!(plan.entry.balance_after, decimal("100010.00"));
    }

    #[test]
    fn test_same_account_transfer_is_rejected() {
        let source = account("1001", "500.00");
        let mutation =
            Mutation::outgoing(History_Type::Transfer, "1001", decimal("1"))
                .destination("1001");

        let result = plan(&mutation, &source, Some(&source));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_amount_validation() {
        let source = account("1001", "500.00");
        let destination = account("1002", "0.00");

        for amount in ["0", "-5", "1.005"] {
            let result = plan(&transfer(amount), &source, Some(&destination));
            assert!(
                matches!(result, Err(Error::Validation(_))),
                "amount {} accepted",
                amount
            );
        }
    }

    #[test]
    fn test_missing_destination_is_not_found() {
        let source = account("1001", "500.00");

        let result = plan(&transfer("10"), &source, None);
        assert!(matches!(result, Err(Error::AccountNotFound(number)) if number == "1002"));
    }

    fn stored(kind: History_Type, counterparty: &str) -> History {
        History {
            id: 1,
            reference: String::from("REF-1234567890"),
            account_number: String::from("1001"),
            kind: String::from(kind),
            amount: decimal("100.00"),
            fee: decimal("0.00"),
            balance_after: decimal("400.00"),
            counterparty: Some(counterparty.to_owned()),
            detail: String::from("Transfer to 1002"),
            request_id: Some(String::from("r1")),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_same_request_accepts_matching_record() {
        let history = stored(History_Type::Transfer, "1002");

        assert!(same_request(&history, History_Type::Transfer, Some("1002")).is_ok());
        assert!(same_request(&history, History_Type::Transfer, None).is_ok());
    }

    #[test]
    fn test_request_id_reused_for_other_kind_is_rejected() {
        let history = stored(History_Type::Transfer, "1002");

        let result =
            same_request(&history, History_Type::Bill_Payment, Some("Meralco"));
        assert!(
            matches!(result, Err(Error::DuplicateField(field)) if field == "request_id")
        );

        let result = same_request(&history, History_Type::Loan_Payment, None);
        assert!(matches!(result, Err(Error::DuplicateField(_))));
    }

    #[test]
    fn test_request_id_reused_for_other_counterparty_is_rejected() {
        let history = stored(History_Type::Transfer, "1002");

        let result = same_request(&history, History_Type::Transfer, Some("1003"));
        assert!(matches!(result, Err(Error::DuplicateField(_))));
    }

    #[test]
    fn test_minted_counterparty_is_not_compared() {
        let mutation = Mutation::outgoing(
            History_Type::Fixed_Deposit_Open,
            "1001",
            decimal("1000"),
        )
        .minted_counterparty(String::from("a-new-deposit"));
        assert_eq!(mutation.replay_counterparty(), None);
        assert_eq!(transfer("1").replay_counterparty(), Some("1002"));
    }

    #[test]
    fn test_incoming_with_fee_is_rejected() {
        let source = account("1001", "500.00");
        let mutation = Mutation::incoming(
            History_Type::Fixed_Deposit_Withdraw,
            "1001",
            decimal("10"),
        )
        .fee(decimal("1"));

        let result = plan(&mutation, &source, None);
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
