use std::str::FromStr as _;

use bigdecimal::{BigDecimal, Zero as _};
use chrono::NaiveDate;

use crate::{
    error::Error,
    helpers::{money, Deposit_Status},
    model::Fixed_Deposit,
};

/// Simple interest over whole months: `P * (1 + rate * months / 12)`.
pub fn maturity_amount(
    principal: &BigDecimal,
    annual_rate: &BigDecimal,
    tenure_months: u32,
) -> Result<BigDecimal, Error> {
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

    let interest = principal * annual_rate * BigDecimal::from(tenure_months)
        / BigDecimal::from(12);

    Ok(money(&(principal + interest)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Withdrawal {
    pub payout: BigDecimal,
    pub status: Deposit_Status,
}

/// Settles an active deposit on `today`.
///
/// On or after the maturity date the full maturity amount is paid out,
/// before it only the principal comes back.
pub fn withdrawal(
    deposit: &Fixed_Deposit,
    today: NaiveDate,
) -> Result<Withdrawal, Error> {
    let status = Deposit_Status::from_str(&deposit.status)?;
    if status != Deposit_Status::Active {
        return Err(Error::InvalidState(format!(
            "fixed deposit {} is {}",
            deposit.id, status
        )));
    }

    let withdrawal = if today >= deposit.maturity_date {
        Withdrawal {
            payout: money(&deposit.maturity_amount),
            status: Deposit_Status::Matured,
        }
    } else {
        Withdrawal {
            payout: money(&deposit.principal),
            status: Deposit_Status::Early_Withdrawn,
        }
    };

    Ok(withdrawal)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn decimal(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn deposit(status: Deposit_Status) -> Fixed_Deposit {
        Fixed_Deposit {
            id: Uuid::new_v4(),
            account_number: String::from("1000000001"),
            principal: decimal("10000.00"),
            tenure_months: 12,
            interest_rate: decimal("0.05"),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            maturity_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            maturity_amount: decimal("10500.00"),
            status: status.to_string(),
            payout: None,
            created_at: Utc::now(),
            closed_at: None,
        }
    }

    #[test]
    fn test_maturity_amount() {
        let amount =
            maturity_amount(&decimal("10000"), &decimal("0.05"), 12).unwrap();
        assert_eq!(amount.to_string(), "10500.00");

        let amount =
            maturity_amount(&decimal("5000"), &decimal("0.05"), 6).unwrap();
        assert_eq!(amount.to_string(), "5125.00");

        let amount =
            maturity_amount(&decimal("1000"), &decimal("0.05"), 1).unwrap();
        assert_eq!(amount.to_string(), "1004.17");
    }

    #[test]
    fn test_maturity_amount_rejects_zero_tenure() {
        let result = maturity_amount(&decimal("10000"), &decimal("0.05"), 0);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_withdrawal_at_maturity_pays_interest() {
        let deposit = deposit(Deposit_Status::Active);
        let result = withdrawal(&deposit, deposit.maturity_date).unwrap();

        assert_eq!(result.payout, decimal("10500.00"));
        assert_eq!(result.status, Deposit_Status::Matured);
    }

    #[test]
    fn test_withdrawal_before_maturity_returns_principal() {
        let deposit = deposit(Deposit_Status::Active);
        let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let result = withdrawal(&deposit, today).unwrap();

        assert_eq!(result.payout, decimal("10000.00"));
        assert_eq!(result.status, Deposit_Status::Early_Withdrawn);
    }

    #[test]
    fn test_withdrawal_of_closed_deposit_fails() {
        for status in [Deposit_Status::Matured, Deposit_Status::Early_Withdrawn] {
            let deposit = deposit(status);
            let result = withdrawal(&deposit, deposit.maturity_date);
            assert!(matches!(result, Err(Error::InvalidState(_))));
        }
    }
}
