pub mod accounts;
pub mod bills;
pub mod fixed_deposits;
pub mod history;
pub mod loans;
pub mod recipients;
pub mod transfers;
pub mod version;
