pub mod account;
pub mod bill_payment;
pub mod fixed_deposit;
pub mod loan;
pub mod loan_status;
pub mod recipient;
pub mod transfer;

use crate::{dao::DUPLICATE_ERROR, error::Error};

/// Unique violations become `DuplicateField(field)`, anything else stays a
/// store error.
pub(crate) fn map_duplicate(error: sqlx::Error, field: &str) -> Error {
    match &error {
        sqlx::Error::Database(db)
            if db.code().as_deref() == Some(DUPLICATE_ERROR) =>
        {
            Error::DuplicateField(field.to_owned())
        },
        _ => Error::SQL(error),
    }
}
