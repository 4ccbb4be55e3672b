use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::Error, model::Account};

use super::amount::{
    parse_balance, require, ACCOUNT_NUMBER_LENGTH, EMAIL_LENGTH, MOBILE_LENGTH,
    NAME_LENGTH, USER_ID_LENGTH,
};

#[derive(Debug, Deserialize)]
pub struct OpenAccountRequest {
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub date_of_birth: NaiveDate,
    pub initial_balance: Option<String>,
}

impl OpenAccountRequest {
    pub fn validate(&self) -> Result<OpenAccount, Error> {
        let account_number = require("account_number", &self.account_number, ACCOUNT_NUMBER_LENGTH)?;
        if !account_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::Validation(String::from(
                "account_number must contain digits only",
            )));
        }

        let initial_balance = match &self.initial_balance {
            Some(value) => parse_balance("initial_balance", value)?,
            None => BigDecimal::from(0),
        };

        Ok(OpenAccount {
            account_number,
            name: require("name", &self.name, NAME_LENGTH)?,
            email: require("email", &self.email, EMAIL_LENGTH)?,
            mobile: require("mobile", &self.mobile, MOBILE_LENGTH)?,
            date_of_birth: self.date_of_birth,
            initial_balance,
        })
    }
}

#[derive(Debug)]
pub struct OpenAccount {
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub date_of_birth: NaiveDate,
    pub initial_balance: BigDecimal,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub account_number: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub date_of_birth: NaiveDate,
}

impl RegisterRequest {
    pub fn user_id(&self) -> Result<String, Error> {
        require("user_id", &self.user_id, USER_ID_LENGTH)
    }

    /// Name of the first holder detail that differs from `account`.
    ///
    /// Name and email compare case-insensitively, mobile numbers ignore
    /// spaces and dashes.
    pub fn mismatch(&self, account: &Account) -> Option<&'static str> {
        if !self.name.trim().eq_ignore_ascii_case(account.name.trim()) {
            return Some("name");
        }
        if !self.email.trim().eq_ignore_ascii_case(account.email.trim()) {
            return Some("email");
        }
        if digits(&self.mobile) != digits(&account.mobile) {
            return Some("mobile");
        }
        if self.date_of_birth != account.date_of_birth {
            return Some("date_of_birth");
        }

        None
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use chrono::Utc;

    use super::*;

    fn account() -> Account {
        Account {
            account_number: String::from("1000000001"),
            name: String::from("Maria Santos"),
            email: String::from("maria@example.com"),
            mobile: String::from("+63 917 123 4567"),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            balance: BigDecimal::from_str("0.00").unwrap(),
            user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request() -> RegisterRequest {
        RegisterRequest {
            user_id: String::from("uid-1"),
            account_number: String::from("1000000001"),
            name: String::from("maria santos"),
            email: String::from("Maria@Example.com "),
            mobile: String::from("+63-917-123-4567"),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        }
    }

    #[test]
    fn test_matching_details() {
        assert_eq!(request().mismatch(&account()), None);
    }

    #[test]
    fn test_first_mismatch_is_reported() {
        let mut request = request();
        request.mobile = String::from("+63 917 000 0000");
        request.date_of_birth = NaiveDate::from_ymd_opt(1991, 5, 17).unwrap();
        assert_eq!(request.mismatch(&account()), Some("mobile"));

        let mut request = self::request();
        request.date_of_birth = NaiveDate::from_ymd_opt(1991, 5, 17).unwrap();
        assert_eq!(request.mismatch(&account()), Some("date_of_birth"));
    }

    #[test]
    fn test_open_account_validation() {
        let request = OpenAccountRequest {
            account_number: String::from("12AB"),
            name: String::from("Maria"),
            email: String::from("maria@example.com"),
            mobile: String::from("0917"),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            initial_balance: None,
        };
        assert!(matches!(request.validate(), Err(Error::Validation(_))));

        let request = OpenAccountRequest {
            account_number: String::from("1000000001"),
            initial_balance: Some(String::from("2500.5")),
            ..request
        };
        let account = request.validate().unwrap();
        assert_eq!(account.initial_balance.to_string(), "2500.50");
    }

    #[test]
    fn test_open_account_text_fits_columns() {
        let request = OpenAccountRequest {
            account_number: "1".repeat(ACCOUNT_NUMBER_LENGTH + 1),
            name: String::from("Maria"),
            email: String::from("maria@example.com"),
            mobile: String::from("0917"),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            initial_balance: None,
        };
        assert!(matches!(request.validate(), Err(Error::Validation(_))));

        let request = OpenAccountRequest {
            account_number: String::from("1000000001"),
            name: "M".repeat(NAME_LENGTH + 1),
            ..request
        };
        assert!(matches!(request.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_register_user_id() {
        let mut request = request();
        request.user_id = String::from("  uid-1 ");
        assert_eq!(request.user_id().unwrap(), "uid-1");

        request.user_id = "u".repeat(USER_ID_LENGTH + 1);
        assert!(matches!(request.user_id(), Err(Error::Validation(_))));
    }
}
