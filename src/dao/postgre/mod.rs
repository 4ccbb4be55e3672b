pub use self::types::{
    DataBase, PoolOption, PoolType, QueryResult, DUPLICATE_ERROR,
};

mod account;
mod fixed_deposit;
mod history;
mod loan;
mod recipient;
mod types;
