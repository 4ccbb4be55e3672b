use crate::{
    configuration::Config,
    dao::{PoolOption, PoolType},
    error::Error,
    model::{Account, Fixed_Deposit, History, Loan, Recipient, Table},
};

#[derive(Debug)]
pub struct DatabasePool {
    pub account: Table<Account>,
    pub loan: Table<Loan>,
    pub fixed_deposit: Table<Fixed_Deposit>,
    pub history: Table<History>,
    pub recipient: Table<Recipient>,
    pub pool: PoolType,
}

impl DatabasePool {
    pub async fn new(config: &Config) -> Result<DatabasePool, Error> {
        let pool = PoolOption::new()
            .max_connections(config.database_max_connections)
            .connect(config.database_url.as_str())
            .await?;

        tracing::info!(
            "Database pool ready with up to {} connections",
            config.database_max_connections
        );

        Ok(DatabasePool {
            account: Table::new(pool.clone()),
            loan: Table::new(pool.clone()),
            fixed_deposit: Table::new(pool.clone()),
            history: Table::new(pool.clone()),
            recipient: Table::new(pool.clone()),
            pool,
        })
    }

    pub fn get_pool(&self) -> &PoolType {
        &self.pool
    }
}
