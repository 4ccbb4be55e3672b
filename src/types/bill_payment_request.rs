use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::{error::Error, helpers::money};

use super::{
    amount::{parse_amount, require, ACCOUNT_NUMBER_LENGTH, BILLER_LENGTH},
    transfer_request::request_id,
};

#[derive(Debug, Deserialize)]
pub struct BillPaymentRequest {
    pub biller: String,
    pub amount: String,
    pub receiver_account: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub struct BillPayment {
    pub biller: String,
    pub amount: BigDecimal,
    pub fee: BigDecimal,
    pub receiver_account: Option<String>,
    pub request_id: Option<String>,
}

impl BillPaymentRequest {
    pub fn validate(
        &self,
        from_account: &str,
        fee_rate: &BigDecimal,
    ) -> Result<BillPayment, Error> {
        let biller = require("biller", &self.biller, BILLER_LENGTH)?;
        let amount = parse_amount("amount", &self.amount)?;
        let fee = money(&(&amount * fee_rate));

        let receiver_account = match self.receiver_account.as_deref().map(str::trim)
        {
            None | Some("") => None,
            Some(account) if account == from_account => {
                return Err(Error::Validation(String::from(
                    "receiver_account must differ from the paying account",
                )));
            },
            Some(account) if account.chars().count() > ACCOUNT_NUMBER_LENGTH => {
                return Err(Error::Validation(format!(
                    "receiver_account must be at most {} characters",
                    ACCOUNT_NUMBER_LENGTH
                )));
            },
            Some(account) => Some(account.to_owned()),
        };

        Ok(BillPayment {
            biller,
            amount,
            fee,
            receiver_account,
            request_id: request_id(&self.request_id)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    fn request(amount: &str, receiver: Option<&str>) -> BillPaymentRequest {
        BillPaymentRequest {
            biller: String::from("Meralco"),
            amount: amount.to_owned(),
            receiver_account: receiver.map(str::to_owned),
            request_id: None,
        }
    }

    #[test]
    fn test_fee_is_a_rounded_percentage() {
        let rate = BigDecimal::from_str("0.01").unwrap();

        let payment = request("1500", None).validate("1001", &rate).unwrap();
        assert_eq!(payment.fee.to_string(), "15.00");

        let payment = request("123.45", None).validate("1001", &rate).unwrap();
        assert_eq!(payment.fee.to_string(), "1.23");
    }

    #[test]
    fn test_receiver_account() {
        let rate = BigDecimal::from_str("0.01").unwrap();

        let payment = request("10", Some(" ")).validate("1001", &rate).unwrap();
        assert_eq!(payment.receiver_account, None);

        let payment = request("10", Some("2002")).validate("1001", &rate).unwrap();
        assert_eq!(payment.receiver_account.as_deref(), Some("2002"));

        let result = request("10", Some("1001")).validate("1001", &rate);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_biller_is_required() {
        let rate = BigDecimal::from_str("0.01").unwrap();
        let mut request = request("10", None);
        request.biller = String::new();
        assert!(request.validate("1001", &rate).is_err());
    }

    #[test]
    fn test_long_biller_is_a_validation_error() {
        let rate = BigDecimal::from_str("0.01").unwrap();
        let mut request = request("10", None);
        request.biller = "Manila Electric Company ".repeat(9);

        let result = request.validate("1001", &rate);
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
