use std::str::FromStr as _;

use bigdecimal::{BigDecimal, Zero as _};
use chrono::NaiveDate;

use crate::{
    error::Error,
    helpers::{money, Loan_Status},
    model::Loan,
};

use super::calendar::add_months;

#[derive(Debug, Clone, PartialEq)]
pub struct Repayment {
    pub paid: BigDecimal,
    pub total_paid: BigDecimal,
    pub balance_remaining: BigDecimal,
    pub status: Loan_Status,
    pub next_due_date: Option<NaiveDate>,
    pub installments_paid: i32,
}

/// Applies one payment to a disbursed loan.
///
/// Without an explicit amount the installment is paid, capped at what is
/// still owed. Each payment moves the due date forward by one month and
/// puts an overdue loan back to active; the status refresher flags it
/// again if the new due date is still behind. Due dates are counted from
/// the disbursement date, matching the amortization schedule.
pub fn repay(
    loan: &Loan,
    requested: Option<&BigDecimal>,
    today: NaiveDate,
) -> Result<Repayment, Error> {
    let status = Loan_Status::from_str(&loan.status)?;
    match status {
        Loan_Status::Active | Loan_Status::Overdue => {},
        _ => {
            return Err(Error::InvalidState(format!(
                "loan {} is {}",
                loan.id, status
            )));
        },
    }

    let remaining = money(&loan.balance_remaining);
    if remaining <= BigDecimal::zero() {
        return Err(Error::InvalidState(format!(
            "loan {} has nothing left to pay",
            loan.id
        )));
    }

    let paid = match requested {
        Some(amount) => {
            let amount = money(amount);
            if amount <= BigDecimal::zero() {
                return Err(Error::Validation(String::from(
                    "amount must be greater than zero",
                )));
            }
            if amount > remaining {
                return Err(Error::Validation(format!(
                    "amount {} exceeds remaining balance {}",
                    amount, remaining
                )));
            }
            amount
        },
        None => {
            let emi = money(&loan.emi_amount);
            if emi < remaining {
                emi
            } else {
                remaining.clone()
            }
        },
    };

    let total_paid = money(&(&loan.total_paid + &paid));
    let balance_remaining = money(&(&remaining - &paid));
    let installments_paid = loan.installments_paid.checked_add(1).ok_or_else(|| {
        Error::InvalidState(format!("loan {} has too many payments", loan.id))
    })?;

    if balance_remaining.is_zero() {
        return Ok(Repayment {
            paid,
            total_paid,
            balance_remaining,
            status: Loan_Status::Completed,
            next_due_date: None,
            installments_paid,
        });
    }

    let next_due_date = match loan.disbursed_at {
        Some(disbursed_at) => {
            let months = u32::try_from(installments_paid).map_err(|_| {
                Error::InvalidState(format!(
                    "loan {} has a negative payment count",
                    loan.id
                ))
            })?;
            add_months(disbursed_at.date_naive(), months + 1)?
        },
        None => add_months(today, 1)?,
    };

    Ok(Repayment {
        paid,
        total_paid,
        balance_remaining,
        status: Loan_Status::Active,
        next_due_date: Some(next_due_date),
        installments_paid,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use bigdecimal::Zero as _;
    use chrono::{TimeZone as _, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::finance::amortization_schedule;

    fn decimal(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn loan(status: Loan_Status, total_paid: &str, remaining: &str) -> Loan {
        Loan {
            id: Uuid::new_v4(),
            account_number: String::from("1000000001"),
            principal: decimal("100000.00"),
            purpose: String::from("Home renovation"),
            tenure_months: 12,
            annual_income: decimal("600000.00"),
            employment_status: String::from("employed"),
            interest_rate: decimal("0.08"),
            emi_amount: decimal("8698.84"),
            total_payable: decimal("104386.08"),
            total_paid: decimal(total_paid),
            balance_remaining: decimal(remaining),
            status: status.to_string(),
            requested_at: Utc::now(),
            disbursed_at: Some(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap()),
            next_due_date: Some(date(2024, 2, 15)),
            updated_at: Utc::now(),
            installments_paid: 0,
        }
    }

    #[test]
    fn test_default_payment_is_one_installment() {
        let loan = loan(Loan_Status::Active, "0.00", "104386.08");
        let result = repay(&loan, None, date(2024, 2, 10)).unwrap();

        assert_eq!(result.paid, decimal("8698.84"));
        assert_eq!(result.total_paid, decimal("8698.84"));
        assert_eq!(result.balance_remaining, decimal("95687.24"));
        assert_eq!(result.status, Loan_Status::Active);
        assert_eq!(result.next_due_date, Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_default_payment_is_capped_at_remaining() {
        let loan = loan(Loan_Status::Active, "104000.00", "386.08");
        let result = repay(&loan, None, date(2024, 2, 10)).unwrap();

        assert_eq!(result.paid, decimal("386.08"));
        assert_eq!(result.total_paid, decimal("104386.08"));
        assert!(result.balance_remaining.is_zero());
        assert_eq!(result.status, Loan_Status::Completed);
        assert_eq!(result.next_due_date, None);
    }

    #[test]
    fn test_explicit_payment_above_remaining_is_rejected() {
        let loan = loan(Loan_Status::Active, "104000.00", "386.08");
        let result = repay(&loan, Some(&decimal("500")), date(2024, 2, 10));

        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_explicit_partial_payment() {
        let loan = loan(Loan_Status::Active, "0.00", "104386.08");
        let result =
            repay(&loan, Some(&decimal("1000")), date(2024, 2, 10)).unwrap();

        assert_eq!(result.paid, decimal("1000.00"));
        assert_eq!(result.balance_remaining, decimal("103386.08"));
    }

    #[test]
    fn test_overdue_loan_returns_to_active() {
        let loan = loan(Loan_Status::Overdue, "0.00", "104386.08");
        let result = repay(&loan, None, date(2024, 5, 1)).unwrap();

        assert_eq!(result.next_due_date, Some(date(2024, 3, 15)));
        assert_eq!(result.status, Loan_Status::Active);
    }

    #[test]
    fn test_due_dates_follow_schedule_from_month_end() {
        let mut loan = loan(Loan_Status::Active, "0.00", "104386.08");
        loan.disbursed_at = Some(Utc.with_ymd_and_hms(2024, 1, 31, 9, 0, 0).unwrap());
        loan.next_due_date = Some(date(2024, 2, 29));

        let schedule = amortization_schedule(
            &loan.principal,
            12,
            &loan.interest_rate,
            date(2024, 1, 31),
        )
        .unwrap();

        let mut due_dates = vec![loan.next_due_date.unwrap()];
        for _ in 0..3 {
            let result = repay(&loan, None, date(2024, 2, 1)).unwrap();
            loan.total_paid = result.total_paid;
            loan.balance_remaining = result.balance_remaining;
            loan.installments_paid = result.installments_paid;
            loan.next_due_date = result.next_due_date;
            due_dates.push(result.next_due_date.unwrap());
        }

        assert_eq!(
            due_dates,
            vec![date(2024, 2, 29), date(2024, 3, 31), date(2024, 4, 30), date(2024, 5, 31)]
        );
        let expected: Vec<NaiveDate> =
            schedule.iter().take(4).map(|i| i.due_date).collect();
        assert_eq!(due_dates, expected);
        assert_eq!(loan.installments_paid, 3);
    }

    #[test]
    fn test_final_payment_counts_as_installment() {
        let mut loan = loan(Loan_Status::Active, "104000.00", "386.08");
        loan.installments_paid = 11;
        let result = repay(&loan, None, date(2024, 12, 10)).unwrap();

        assert_eq!(result.installments_paid, 12);
        assert_eq!(result.status, Loan_Status::Completed);
    }

    #[test]
    fn test_first_due_date_falls_back_to_today() {
        let mut loan = loan(Loan_Status::Active, "0.00", "104386.08");
        loan.disbursed_at = None;
        loan.next_due_date = None;
        let result = repay(&loan, None, date(2024, 1, 31)).unwrap();

        assert_eq!(result.next_due_date, Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_repay_requires_disbursed_loan() {
        for status in [
            Loan_Status::Pending,
            Loan_Status::Completed,
            Loan_Status::Rejected,
        ] {
            let loan = loan(status, "0.00", "104386.08");
            let result = repay(&loan, None, date(2024, 2, 10));
            assert!(matches!(result, Err(Error::InvalidState(_))));
        }
    }
}
