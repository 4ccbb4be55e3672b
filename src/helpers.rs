use std::{fmt, io, str::FromStr};

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::{configuration::Config, error::Error};

pub const REFERENCE_PREFIX: &str = "REF-";
pub const MAX_REFERENCE_ATTEMPTS: u8 = 5;

/// Money is persisted with exactly two fraction digits.
pub fn money(value: &BigDecimal) -> BigDecimal {
    value.round(2).with_scale(2)
}

/// Renders an amount the way receipts show it: `₱ 1,234.56`.
pub fn format_php(value: &BigDecimal) -> String {
    let text = money(value).to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}₱ {}.{}", sign, grouped, fraction)
}

/// `REF-` followed by ten digits, the first non-zero.
///
/// Not unique on its own; the history table rejects duplicates and the
/// caller draws again.
pub fn generate_reference() -> String {
    let random = Uuid::new_v4().as_u128() % 9_000_000_000;
    format!("{}{}", REFERENCE_PREFIX, 1_000_000_000 + random as u64)
}

pub fn is_reference(value: &str) -> bool {
    value
        .strip_prefix(REFERENCE_PREFIX)
        .map(|digits| {
            digits.len() == 10
                && !digits.starts_with('0')
                && digits.chars().all(|c| c.is_ascii_digit())
        })
        .unwrap_or(false)
}

pub fn authorize(auth: Option<&str>, config: &Config) -> Result<(), Error> {
    match auth {
        Some(token) if !config.auth.is_empty() && token == config.auth => {
            Ok(())
        },
        _ => Err(Error::Unauthorized()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum History_Type {
    Transfer,
    Bill_Payment,
    Loan_Disbursement,
    Loan_Payment,
    Fixed_Deposit_Open,
    Fixed_Deposit_Withdraw,
}

impl fmt::Display for History_Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            History_Type::Transfer => write!(f, "transfer"),
            History_Type::Bill_Payment => write!(f, "bill_payment"),
            History_Type::Loan_Disbursement => write!(f, "loan_disbursement"),
            History_Type::Loan_Payment => write!(f, "loan_payment"),
            History_Type::Fixed_Deposit_Open => write!(f, "fixed_deposit_open"),
            History_Type::Fixed_Deposit_Withdraw => {
                write!(f, "fixed_deposit_withdraw")
            },
        }
    }
}

impl From<History_Type> for String {
    fn from(value: History_Type) -> Self {
        value.to_string()
    }
}

impl FromStr for History_Type {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<History_Type, Self::Err> {
        match value {
            "transfer" => Ok(History_Type::Transfer),
            "bill_payment" => Ok(History_Type::Bill_Payment),
            "loan_disbursement" => Ok(History_Type::Loan_Disbursement),
            "loan_payment" => Ok(History_Type::Loan_Payment),
            "fixed_deposit_open" => Ok(History_Type::Fixed_Deposit_Open),
            "fixed_deposit_withdraw" => Ok(History_Type::Fixed_Deposit_Withdraw),
            _ => Err(io::Error::other("History type not supported")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loan_Status {
    Pending,
    Active,
    Completed,
    Overdue,
    Rejected,
}

impl fmt::Display for Loan_Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Loan_Status::Pending => write!(f, "pending"),
            Loan_Status::Active => write!(f, "active"),
            Loan_Status::Completed => write!(f, "completed"),
            Loan_Status::Overdue => write!(f, "overdue"),
            Loan_Status::Rejected => write!(f, "rejected"),
        }
    }
}

impl From<Loan_Status> for String {
    fn from(value: Loan_Status) -> Self {
        value.to_string()
    }
}

impl FromStr for Loan_Status {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<Loan_Status, Self::Err> {
        match value {
            "pending" => Ok(Loan_Status::Pending),
            "active" => Ok(Loan_Status::Active),
            "completed" => Ok(Loan_Status::Completed),
            "overdue" => Ok(Loan_Status::Overdue),
            "rejected" => Ok(Loan_Status::Rejected),
            _ => Err(io::Error::other("Loan status not supported")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deposit_Status {
    Active,
    Matured,
    Early_Withdrawn,
}

impl fmt::Display for Deposit_Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Deposit_Status::Active => write!(f, "active"),
            Deposit_Status::Matured => write!(f, "matured"),
            Deposit_Status::Early_Withdrawn => write!(f, "early_withdrawn"),
        }
    }
}

impl From<Deposit_Status> for String {
    fn from(value: Deposit_Status) -> Self {
        value.to_string()
    }
}

impl FromStr for Deposit_Status {
    type Err = io::Error;

    fn from_str(value: &str) -> Result<Deposit_Status, Self::Err> {
        match value {
            "active" => Ok(Deposit_Status::Active),
            "matured" => Ok(Deposit_Status::Matured),
            "early_withdrawn" => Ok(Deposit_Status::Early_Withdrawn),
            _ => Err(io::Error::other("Deposit status not supported")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn decimal(value: &str) -> BigDecimal {
        BigDecimal::from_str(value).unwrap()
    }

    #[test]
    fn test_money_rounds_to_two_digits() {
        assert_eq!(money(&decimal("10.456")).to_string(), "10.46");
        assert_eq!(money(&decimal("7")).to_string(), "7.00");
        assert_eq!(money(&decimal("0.1")).to_string(), "0.10");
    }

    #[test]
    fn test_format_php() {
        assert_eq!(format_php(&decimal("0")), "₱ 0.00");
        assert_eq!(format_php(&decimal("999.5")), "₱ 999.50");
        assert_eq!(format_php(&decimal("1000")), "₱ 1,000.00");
        assert_eq!(format_php(&decimal("1234567.891")), "₱ 1,234,567.89");
        assert_eq!(format_php(&decimal("-25000.1")), "-₱ 25,000.10");
    }

    #[test]
    fn test_generate_reference_format() {
        for _ in 0..1_000 {
            let reference = generate_reference();
            assert!(is_reference(&reference), "bad reference {}", reference);
        }
    }

    #[test]
    fn test_references_are_not_assumed_unique() {
        // Draws spread out, but a collision is possible and handled by the
        // history table, so only the spread is checked here.
        let drawn: HashSet<String> =
            (0..100).map(|_| generate_reference()).collect();
        assert!(drawn.len() > 90);
    }

    #[test]
    fn test_is_reference_rejects_malformed() {
        assert!(is_reference("REF-1234567890"));
        assert!(!is_reference("REF-0234567890"));
        assert!(!is_reference("REF-123456789"));
        assert!(!is_reference("REF-12345678901"));
        assert!(!is_reference("REF-12345a7890"));
        assert!(!is_reference("1234567890"));
    }

    #[test]
    fn test_status_round_trip_through_strings() {
        for status in [
            Loan_Status::Pending,
            Loan_Status::Active,
            Loan_Status::Completed,
            Loan_Status::Overdue,
            Loan_Status::Rejected,
        ] {
            assert_eq!(Loan_Status::from_str(&status.to_string()).unwrap(), status);
        }

        assert_eq!(
            Deposit_Status::from_str("early_withdrawn").unwrap(),
            Deposit_Status::Early_Withdrawn
        );
        assert_eq!(
            History_Type::from_str("bill_payment").unwrap(),
            History_Type::Bill_Payment
        );
        assert!(History_Type::from_str("cash_in").is_err());
    }
}
