//! Row types and the typed table handle the DAO layer hangs its queries on.

mod account;
mod fixed_deposit;
mod history;
mod loan;
mod recipient;
mod table;

pub use account::{Account, Account_Balance};
pub use fixed_deposit::Fixed_Deposit;
pub use history::History;
pub use loan::Loan;
pub use recipient::Recipient;
pub use table::Table;
