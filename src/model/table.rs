use std::marker::PhantomData;

use crate::dao::PoolType;

/// One handle per table; `impl Table<Row>` blocks in `dao::postgre` carry the SQL.
#[derive(Debug)]
pub struct Table<T> {
    pub pool: PoolType,
    _row: PhantomData<T>,
}

impl<T> Table<T> {
    pub fn new(pool: PoolType) -> Self {
        Table {
            pool,
            _row: PhantomData,
        }
    }
}
