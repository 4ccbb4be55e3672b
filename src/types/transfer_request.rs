use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::error::Error;

use super::amount::{parse_amount, require, ACCOUNT_NUMBER_LENGTH};

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub to_account: String,
    pub amount: String,
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub struct Transfer {
    pub to_account: String,
    pub amount: BigDecimal,
    pub request_id: Option<String>,
}

impl TransferRequest {
    pub fn validate(&self, from_account: &str) -> Result<Transfer, Error> {
        let to_account = require("to_account", &self.to_account, ACCOUNT_NUMBER_LENGTH)?;
        if to_account == from_account {
            return Err(Error::Validation(String::from(
                "cannot transfer to the same account",
            )));
        }

        Ok(Transfer {
            to_account,
            amount: parse_amount("amount", &self.amount)?,
            request_id: request_id(&self.request_id)?,
        })
    }
}

/// Blank ids count as absent; long ones are rejected.
pub fn request_id(value: &Option<String>) -> Result<Option<String>, Error> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(id) if id.len() > 64 => Err(Error::Validation(String::from(
            "request_id must be at most 64 characters",
        ))),
        Some(id) => Ok(Some(id.to_owned())),
    }
}
