//! Pure money arithmetic: installments, maturity payouts and calendar math.
//!
//! Nothing in here touches the database; handlers feed these functions the
//! rows they locked and persist what comes back.

mod amortization;
mod calendar;
mod maturity;
mod repayment;

pub use self::{
    amortization::{amortization_schedule, monthly_installment, Emi_Quote, Installment},
    calendar::add_months,
    maturity::{maturity_amount, withdrawal, Withdrawal},
    repayment::{repay, Repayment},
};
