pub use self::{
    account_request::{OpenAccount, OpenAccountRequest, RegisterRequest},
    amount::{parse_amount, parse_balance},
    bill_payment_request::{BillPayment, BillPaymentRequest},
    fixed_deposit_request::{
        FixedDepositOpen, FixedDepositOpenRequest, MAX_DEPOSIT_TENURE_MONTHS,
    },
    loan_request::{
        loan_tenure, LoanApplication, LoanApplicationRequest, LoanPayment,
        LoanPaymentRequest, MAX_LOAN_TENURE_MONTHS,
    },
    recipient_request::RecipientRequest,
    transfer_request::{Transfer, TransferRequest},
};

mod account_request;
mod amount;
mod bill_payment_request;
mod fixed_deposit_request;
mod loan_request;
mod recipient_request;
mod transfer_request;
