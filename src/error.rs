use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use anyhow::Error as ANYHOW_ERROR;
use bigdecimal::{BigDecimal, ParseBigDecimalError as BIG_DECIMAL_ERROR};
use sqlx::error::Error as SQL_ERROR;
use std::{
    env::VarError, io::Error as IO_ERROR, num::ParseIntError,
};
use thiserror::Error;
use tokio::task::JoinError;
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    SQL(#[from] SQL_ERROR),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    BigDecimalError(#[from] BIG_DECIMAL_ERROR),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Loan not found: {0}")]
    LoanNotFound(String),

    #[error("Fixed deposit not found: {0}")]
    FixedDepositNotFound(String),

    #[error("History record not found: {0}")]
    HistoryNotFound(String),

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: BigDecimal,
        available: BigDecimal,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized")]
    Unauthorized(),

    #[error("Could not allocate a free reference after {0} attempts")]
    ReferenceExhausted(u8),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Server end with error: {0}")]
    ServerError(String),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("{0}")]
    AnyHowError(#[from] ANYHOW_ERROR),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::DuplicateField(_)
            | Error::INT(_)
            | Error::BigDecimalError(_) => StatusCode::BAD_REQUEST,

            Error::AccountNotFound(_)
            | Error::LoanNotFound(_)
            | Error::FixedDepositNotFound(_)
            | Error::HistoryNotFound(_) => StatusCode::NOT_FOUND,

            Error::InsufficientFunds { .. } => StatusCode::UNPROCESSABLE_ENTITY,

            Error::InvalidState(_) => StatusCode::CONFLICT,

            Error::Unauthorized() => StatusCode::UNAUTHORIZED,

            Error::Io(_)
            | Error::SQL(_)
            | Error::VAR(_)
            | Error::TokioJoinError(_)
            | Error::ReferenceExhausted(_)
            | Error::ConfigurationError(_)
            | Error::ServerError(_)
            | Error::SetGlobalDefaultError(_)
            | Error::AnyHowError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = serde_json::json!({
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": self.to_string(),
            "status": status.as_u16(),
        });
        HttpResponse::build(status).json(body)
    }
}
