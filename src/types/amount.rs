use std::str::FromStr as _;

use bigdecimal::{BigDecimal, Zero as _};

use crate::{error::Error, helpers::money};

/// `NUMERIC(20, 2)` leaves eighteen digits before the point.
pub const MAX_INTEGER_DIGITS: usize = 18;

/// Parses a client supplied amount: numeric, positive, at most two
/// fraction digits. `field` names the offending input in the error.
pub fn parse_amount(field: &str, value: &str) -> Result<BigDecimal, Error> {
    let amount = parse_decimal(field, value)?;

    if amount <= BigDecimal::zero() {
        return Err(Error::Validation(format!(
            "{} must be greater than zero",
            field
        )));
    }

    Ok(amount)
}

/// Same as [`parse_amount`] but zero is accepted.
pub fn parse_balance(field: &str, value: &str) -> Result<BigDecimal, Error> {
    let amount = parse_decimal(field, value)?;

    if amount < BigDecimal::zero() {
        return Err(Error::Validation(format!(
            "{} must not be negative",
            field
        )));
    }

    Ok(amount)
}

fn parse_decimal(field: &str, value: &str) -> Result<BigDecimal, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }

    // Plain decimal notation only: an exponent lets a few bytes expand
    // into millions of digits.
    let unsigned = value
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(value);
    if !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(Error::Validation(format!(
            "{} must be a plain decimal number, got {}",
            field, value
        )));
    }

    let integer_digits = unsigned
        .split('.')
        .next()
        .unwrap_or_default()
        .trim_start_matches('0')
        .len();
    if integer_digits > MAX_INTEGER_DIGITS {
        return Err(Error::Validation(format!(
            "{} must have at most {} integer digits",
            field, MAX_INTEGER_DIGITS
        )));
    }

    let amount = BigDecimal::from_str(value).map_err(|_| {
        Error::Validation(format!("{} must be a number, got {}", field, value))
    })?;

    if money(&amount) != amount {
        return Err(Error::Validation(format!(
            "{} must have at most two fraction digits",
            field
        )));
    }

    Ok(money(&amount))
}

/// Column widths of the text fields clients fill in.
pub const ACCOUNT_NUMBER_LENGTH: usize = 32;
pub const NAME_LENGTH: usize = 128;
pub const EMAIL_LENGTH: usize = 256;
pub const MOBILE_LENGTH: usize = 32;
pub const USER_ID_LENGTH: usize = 128;
pub const BILLER_LENGTH: usize = 128;
pub const PURPOSE_LENGTH: usize = 256;
pub const EMPLOYMENT_STATUS_LENGTH: usize = 64;

/// Trimmed, non-empty and at most `max_length` characters.
pub fn require(
    field: &str,
    value: &str,
    max_length: usize,
) -> Result<String, Error> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max_length {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, max_length
        )));
    }

    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use bigdecimal::Zero as _;

    use super::*;

    #[test]
    fn test_parse_amount_accepts_cents() {
        assert_eq!(parse_amount("amount", "12.5").unwrap().to_string(), "12.50");
        assert_eq!(parse_amount("amount", " 100 ").unwrap().to_string(), "100.00");
        assert_eq!(parse_amount("amount", "0.01").unwrap().to_string(), "0.01");
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        for value in ["", "  ", "abc", "12,50", "0", "-1", "0.001", "1e-3"] {
            let result = parse_amount("amount", value);
            assert!(
                matches!(result, Err(Error::Validation(_))),
                "accepted {:?}",
                value
            );
        }
    }

    #[test]
    fn test_parse_amount_rejects_exponent_notation() {
        for value in ["1e3000000", "1e40", "1E2", "5e0"] {
            let result = parse_amount("amount", value);
            assert!(
                matches!(result, Err(Error::Validation(_))),
                "accepted {:?}",
                value
            );
        }
    }

    #[test]
    fn test_parse_amount_caps_integer_digits() {
        let largest = "999999999999999999.99";
        assert_eq!(parse_amount("amount", largest).unwrap().to_string(), largest);
        assert_eq!(
            parse_amount("amount", "000000000000000000001.00").unwrap().to_string(),
            "1.00"
        );

        let result = parse_amount("amount", "1000000000000000000");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_amount_names_field() {
        let error = parse_amount("annual_income", "x").unwrap_err();
        assert!(error.to_string().contains("annual_income"));
    }

    #[test]
    fn test_parse_balance_accepts_zero() {
        assert!(parse_balance("initial_balance", "0").unwrap().is_zero());
        assert!(parse_balance("initial_balance", "-0.01").is_err());
    }

    #[test]
    fn test_require_trims() {
        assert_eq!(require("name", "  Juan ", NAME_LENGTH).unwrap(), "Juan");
        assert!(require("name", " ", NAME_LENGTH).is_err());
    }

    #[test]
    fn test_require_limits_length() {
        let biller = "B".repeat(BILLER_LENGTH);
        assert_eq!(require("biller", &biller, BILLER_LENGTH).unwrap(), biller);

        let result = require("biller", &"B".repeat(200), BILLER_LENGTH);
        assert!(
            matches!(result, Err(Error::Validation(message)) if message.contains("biller"))
        );

        // Characters, not bytes.
        let name = "ñ".repeat(NAME_LENGTH);
        assert!(require("name", &name, NAME_LENGTH).is_ok());
    }
}
