use chrono::Utc;
use sqlx::{types::BigDecimal, Error, Transaction};

use crate::model::{Account, Account_Balance, Table};

use super::DataBase;

impl Table<Account> {
    pub async fn insert(
        &self,
        data: &Account,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        INSERT INTO "account" (
            "account_number",
            "name",
            "email",
            "mobile",
            "date_of_birth",
            "balance",
            "user_id",
            "created_at",
            "updated_at"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#;

        sqlx::query(SQL)
            .bind(&data.account_number)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.mobile)
            .bind(data.date_of_birth)
            .bind(&data.balance)
            .bind(&data.user_id)
            .bind(data.created_at)
            .bind(data.updated_at)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }

    pub async fn get(
        &self,
        account_number: &str,
    ) -> Result<Option<Account>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "account"
        WHERE "account_number" = $1
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn is_exists(&self, account_number: &str) -> Result<bool, Error> {
        const SQL: &str = r#"
        SELECT EXISTS(
            SELECT
            FROM "account"
            WHERE "account_number" = $1
        )
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .fetch_one(&self.pool)
            .await
            .map(|(result,)| result)
    }

    /// Full row under `FOR UPDATE`, held until the transaction ends.
    pub async fn get_for_update(
        &self,
        account_number: &str,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<Option<Account>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "account"
        WHERE "account_number" = $1
        FOR UPDATE
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .fetch_optional(&mut **transaction)
            .await
    }

    pub async fn lock_balance(
        &self,
        account_number: &str,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<Option<Account_Balance>, Error> {
        const SQL: &str = r#"
        SELECT
            "account_number",
            "name",
            "balance"
        FROM "account"
        WHERE "account_number" = $1
        FOR UPDATE
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .fetch_optional(&mut **transaction)
            .await
    }

    pub async fn update_balance(
        &self,
        account_number: &str,
        balance: &BigDecimal,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        UPDATE "account"
        SET
            "balance" = $1,
            "updated_at" = $2
        WHERE "account_number" = $3
        "#;

        sqlx::query(SQL)
            .bind(balance)
            .bind(Utc::now())
            .bind(account_number)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }

    pub async fn link_user(
        &self,
        account_number: &str,
        user_id: &str,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        UPDATE "account"
        SET
            "user_id" = $1,
            "updated_at" = $2
        WHERE "account_number" = $3
        "#;

        sqlx::query(SQL)
            .bind(user_id)
            .bind(Utc::now())
            .bind(account_number)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }
}
