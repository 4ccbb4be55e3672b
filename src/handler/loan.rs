use bigdecimal::{BigDecimal, Zero as _};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    configuration::{AppState, State},
    error::Error,
    finance::{add_months, monthly_installment, repay},
    helpers::{format_php, History_Type, Loan_Status},
    ledger::{self, Mutation},
    model::{History, Loan},
    types::{LoanApplication, LoanPayment},
};

/// Records a pending application priced at the configured rate. No money
/// moves until the loan is approved.
pub async fn apply(
    app_state: &AppState<State>,
    account_number: &str,
    data: LoanApplication,
) -> Result<Loan, Error> {
    let database = &app_state.database;
    if !database.account.is_exists(account_number).await? {
        return Err(Error::AccountNotFound(account_number.to_owned()));
    }

    let interest_rate = app_state.config.loan_interest_rate.to_owned();
    let quote =
        monthly_installment(&data.principal, data.tenure_months, &interest_rate)?;
    let tenure_months = i32::try_from(data.tenure_months).map_err(|_| {
        Error::Validation(String::from("tenure_months is out of range"))
    })?;

    let now = Utc::now();
    let loan = Loan {
        id: Uuid::new_v4(),
        account_number: account_number.to_owned(),
        principal: data.principal,
        purpose: data.purpose,
        tenure_months,
        annual_income: data.annual_income,
        employment_status: data.employment_status,
        interest_rate,
        emi_amount: quote.emi,
        total_payable: quote.total_payable.to_owned(),
        total_paid: BigDecimal::zero().with_scale(2),
        balance_remaining: quote.total_payable,
        status: String::from(Loan_Status::Pending),
        requested_at: now,
        disbursed_at: None,
        next_due_date: None,
        updated_at: now,
        installments_paid: 0,
    };

    let mut transaction = database.pool.begin().await?;
    database.loan.insert(&loan, &mut transaction).await?;
    transaction.commit().await?;

    tracing::info!(
        "Loan {} requested on account {}: principal {}, emi {}",
        loan.id,
        loan.account_number,
        loan.principal,
        loan.emi_amount
    );

    Ok(loan)
}

/// Approves a pending loan and credits its principal to the borrower.
pub async fn approve(
    app_state: &AppState<State>,
    id: Uuid,
) -> Result<(Loan, History), Error> {
    let database = &app_state.database;
    let mut transaction = database.pool.begin().await?;

    let mut loan = database
        .loan
        .get_for_update(id, &mut transaction)
        .await?
        .ok_or_else(|| Error::LoanNotFound(id.to_string()))?;

    ensure_status(&loan, Loan_Status::Pending)?;

    let now = Utc::now();
    let next_due_date = add_months(now.date_naive(), 1)?;

    let mutation = Mutation::incoming(
        History_Type::Loan_Disbursement,
        &loan.account_number,
        loan.principal.to_owned(),
    )
    .counterparty(loan.id.to_string())
    .detail(format!(
        "Loan disbursement of {} for {}",
        format_php(&loan.principal),
        loan.purpose
    ));

    let posting = ledger::apply(database, &mut transaction, &mutation).await?;
    database
        .loan
        .disburse(id, now, next_due_date, &mut transaction)
        .await?;
    transaction.commit().await?;

    loan.status = String::from(Loan_Status::Active);
    loan.disbursed_at = Some(now);
    loan.next_due_date = Some(next_due_date);
    loan.updated_at = now;

    Ok((loan, posting.history))
}

pub async fn reject(app_state: &AppState<State>, id: Uuid) -> Result<Loan, Error> {
    let database = &app_state.database;
    let mut transaction = database.pool.begin().await?;

    let mut loan = database
        .loan
        .get_for_update(id, &mut transaction)
        .await?
        .ok_or_else(|| Error::LoanNotFound(id.to_string()))?;

    ensure_status(&loan, Loan_Status::Pending)?;

    database
        .loan
        .update_status(id, Loan_Status::Rejected, &mut transaction)
        .await?;
    transaction.commit().await?;

    tracing::info!("Loan {} rejected", id);

    loan.status = String::from(Loan_Status::Rejected);
    loan.updated_at = Utc::now();

    Ok(loan)
}

/// Pays one installment, or `data.amount`, from the borrower account.
pub async fn pay(
    app_state: &AppState<State>,
    id: Uuid,
    data: LoanPayment,
    today: NaiveDate,
) -> Result<(Loan, History), Error> {
    let database = &app_state.database;
    let mut transaction = database.pool.begin().await?;

    let mut loan = database
        .loan
        .get_for_update(id, &mut transaction)
        .await?
        .ok_or_else(|| Error::LoanNotFound(id.to_string()))?;

    let loan_id = loan.id.to_string();
    if let Some(history) = ledger::replayed(
        database,
        &mut transaction,
        &loan.account_number,
        data.request_id.as_deref(),
        History_Type::Loan_Payment,
        Some(&loan_id),
    )
    .await?
    {
        return Ok((loan, history));
    }

    let repayment = repay(&loan, data.amount.as_ref(), today)?;

    let mutation = Mutation::outgoing(
        History_Type::Loan_Payment,
        &loan.account_number,
        repayment.paid.to_owned(),
    )
    .counterparty(loan_id)
    .detail(format!(
        "Loan payment of {}, remaining {}",
        format_php(&repayment.paid),
        format_php(&repayment.balance_remaining)
    ))
    .request_id(data.request_id);

    let posting = ledger::apply(database, &mut transaction, &mutation).await?;
    database
        .loan
        .update_progress(
            id,
            &repayment.total_paid,
            &repayment.balance_remaining,
            repayment.status,
            repayment.next_due_date,
            repayment.installments_paid,
            &mut transaction,
        )
        .await?;
    transaction.commit().await?;

    if repayment.status == Loan_Status::Completed {
        tracing::info!("Loan {} fully repaid", id);
    }

    loan.total_paid = repayment.total_paid;
    loan.balance_remaining = repayment.balance_remaining;
    loan.status = String::from(repayment.status);
    loan.next_due_date = repayment.next_due_date;
    loan.installments_paid = repayment.installments_paid;
    loan.updated_at = Utc::now();

    Ok((loan, posting.history))
}

fn ensure_status(loan: &Loan, expected: Loan_Status) -> Result<(), Error> {
    if loan.status != expected.to_string() {
        return Err(Error::InvalidState(format!(
            "loan {} is {}, expected {}",
            loan.id, loan.status, expected
        )));
    }

    Ok(())
}
