use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::error::Error;

use super::{amount::parse_amount, transfer_request::request_id};

pub const MAX_DEPOSIT_TENURE_MONTHS: u32 = 120;

#[derive(Debug, Deserialize)]
pub struct FixedDepositOpenRequest {
    pub amount: String,
    pub tenure_months: u32,
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub struct FixedDepositOpen {
    pub principal: BigDecimal,
    pub tenure_months: u32,
    pub request_id: Option<String>,
}

impl FixedDepositOpenRequest {
    pub fn validate(&self) -> Result<FixedDepositOpen, Error> {
        if !(1..=MAX_DEPOSIT_TENURE_MONTHS).contains(&self.tenure_months) {
            return Err(Error::Validation(format!(
                "tenure_months must be between 1 and {}",
                MAX_DEPOSIT_TENURE_MONTHS
            )));
        }

        Ok(FixedDepositOpen {
            principal: parse_amount("amount", &self.amount)?,
            tenure_months: self.tenure_months,
            request_id: request_id(&self.request_id)?,
        })
    }
}
