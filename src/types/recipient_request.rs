use serde::Deserialize;

use crate::error::Error;

use super::amount::{require, ACCOUNT_NUMBER_LENGTH, NAME_LENGTH};

#[derive(Debug, Deserialize)]
pub struct RecipientRequest {
    pub name: String,
    pub account_number: String,
}

impl RecipientRequest {
    /// Trimmed `(name, account_number)`.
    pub fn validate(&self, owner: &str) -> Result<(String, String), Error> {
        let name = require("name", &self.name, NAME_LENGTH)?;
        let account_number = require("account_number", &self.account_number, ACCOUNT_NUMBER_LENGTH)?;

        if account_number == owner {
            return Err(Error::Validation(String::from(
                "cannot save your own account as a recipient",
            )));
        }

        Ok((name, account_number))
    }
}
