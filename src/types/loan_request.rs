use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::error::Error;

use super::{
    amount::{
        parse_amount, require, EMPLOYMENT_STATUS_LENGTH, PURPOSE_LENGTH,
    },
    transfer_request::request_id,
};

pub const MAX_LOAN_TENURE_MONTHS: u32 = 360;

#[derive(Debug, Deserialize)]
pub struct LoanApplicationRequest {
    pub amount: String,
    pub purpose: String,
    pub tenure_months: u32,
    pub annual_income: String,
    pub employment_status: String,
}

#[derive(Debug)]
pub struct LoanApplication {
    pub principal: BigDecimal,
    pub purpose: String,
    pub tenure_months: u32,
    pub annual_income: BigDecimal,
    pub employment_status: String,
}

impl LoanApplicationRequest {
    pub fn validate(&self) -> Result<LoanApplication, Error> {
        Ok(LoanApplication {
            principal: parse_amount("amount", &self.amount)?,
            purpose: require("purpose", &self.purpose, PURPOSE_LENGTH)?,
            tenure_months: loan_tenure(self.tenure_months)?,
            annual_income: parse_amount("annual_income", &self.annual_income)?,
            employment_status: require(
                "employment_status",
                &self.employment_status,
                EMPLOYMENT_STATUS_LENGTH,
            )?,
        })
    }
}

pub fn loan_tenure(tenure_months: u32) -> Result<u32, Error> {
    if !(1..=MAX_LOAN_TENURE_MONTHS).contains(&tenure_months) {
        return Err(Error::Validation(format!(
            "tenure_months must be between 1 and {}",
            MAX_LOAN_TENURE_MONTHS
        )));
    }

    Ok(tenure_months)
}

#[derive(Debug, Deserialize)]
pub struct LoanPaymentRequest {
    pub amount: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub struct LoanPayment {
    pub amount: Option<BigDecimal>,
    pub request_id: Option<String>,
}

impl LoanPaymentRequest {
    pub fn validate(&self) -> Result<LoanPayment, Error> {
        let amount = match self.amount.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_amount("amount", value)?),
        };

        Ok(LoanPayment {
            amount,
            request_id: request_id(&self.request_id)?,
        })
    }
}
