use bigdecimal::{BigDecimal, One as _, Zero as _};
use chrono::NaiveDate;
use serde::Serialize;

use crate::{error::Error, helpers::money};

use super::calendar::add_months;

/// Digits kept while compounding, well past the cent.
const PRECISION: i64 = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emi_Quote {
    pub emi: BigDecimal,
    pub total_payable: BigDecimal,
    pub total_interest: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Installment {
    pub number: u32,
    pub due_date: NaiveDate,
    pub payment: BigDecimal,
    pub interest: BigDecimal,
    pub principal: BigDecimal,
    pub balance: BigDecimal,
}

/// Level monthly payment for an amortizing loan.
///
/// `EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r = annual_rate / 12`;
/// a zero rate degrades to `P / n` and the total payable is the principal.
pub fn monthly_installment(
    principal: &BigDecimal,
    tenure_months: u32,
    annual_rate: &BigDecimal,
) -> Result<Emi_Quote, Error> {
    if tenure_months == 0 {
        return Err(Error::Validation(String::from(
            "tenure must be at least one month",
        )));
    }
    if principal <= &BigDecimal::zero() {
        return Err(Error::Validation(String::from(
            "principal must be greater than zero",
        )));
    }
    if annual_rate < &BigDecimal::zero() {
        return Err(Error::Validation(String::from(
            "interest rate must not be negative",
        )));
    }

    let principal = money(principal);
    let tenure = BigDecimal::from(tenure_months);
    let monthly_rate = monthly_rate(annual_rate);

    let (emi, total_payable) = if monthly_rate.is_zero() {
        (money(&(&principal / &tenure)), principal.clone())
    } else {
        let factor = power(&(BigDecimal::one() + &monthly_rate), tenure_months);
        let denominator = &factor - BigDecimal::one();
        if denominator.is_zero() {
            (money(&(&principal / &tenure)), principal.clone())
        } else {
            let emi = money(&(&principal * &monthly_rate * &factor / denominator));
            let total_payable = money(&(&emi * &tenure));
            (emi, total_payable)
        }
    };

    // Rounding to the cent must leave something to pay every month and
    // must not pay back less than was lent.
    if emi.is_zero() || total_payable < principal {
        return Err(Error::Validation(format!(
            "principal {} is too small to repay over {} months",
            principal, tenure_months
        )));
    }

    let total_interest = money(&(&total_payable - &principal));

    Ok(Emi_Quote {
        emi,
        total_payable,
        total_interest,
    })
}

/// Installment plan starting one month after `start`.
///
/// Due dates are anchored on `start` so that month-end clamping never
/// drifts. The last installment takes whatever is left of the total
/// payable, which absorbs the cent rounding of the earlier ones.
pub fn amortization_schedule(
    principal: &BigDecimal,
    tenure_months: u32,
    annual_rate: &BigDecimal,
    start: NaiveDate,
) -> Result<Vec<Installment>, Error> {
    let quote = monthly_installment(principal, tenure_months, annual_rate)?;
    let monthly_rate = monthly_rate(annual_rate);

    let mut balance = money(principal);
    let mut scheduled = BigDecimal::zero();
    let mut installments = Vec::with_capacity(tenure_months as usize);

    for number in 1..=tenure_months {
        let due_date = add_months(start, number)?;

        let (payment, interest, principal_part) = if number == tenure_months {
            let payment = money(&(&quote.total_payable - &scheduled));
            let interest = money(&(&payment - &balance));
            (payment, interest, balance.clone())
        } else {
            let interest = money(&(&balance * &monthly_rate));
            let principal_part = money(&(&quote.emi - &interest));
            (quote.emi.clone(), interest, principal_part)
        };

        balance = money(&(&balance - &principal_part));
        scheduled += &payment;

        installments.push(Installment {
            number,
            due_date,
            payment,
            interest,
            principal: principal_part,
            balance: balance.clone(),
        });
    }

    Ok(installments)
}

fn monthly_rate(annual_rate: &BigDecimal) -> BigDecimal {
    (annual_rate / BigDecimal::from(12)).round(PRECISION)
}

fn power(base: &BigDecimal, exponent: u32) -> BigDecimal {
    let mut result = BigDecimal::one();
    let mut base = base.clone();
    let mut exponent = exponent;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = (&result * &base).round(PRECISION);
        }
        base = (&base * &base).round(PRECISION);
        exponent >>= 1;
    }

    result
}
