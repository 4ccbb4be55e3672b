use sqlx::{Error, Transaction};

use crate::model::{Recipient, Table};

use super::DataBase;

impl Table<Recipient> {
    /// Returns `None` when the owner already saved this account.
    pub async fn insert(
        &self,
        account_number: &str,
        name: &str,
        recipient_account: &str,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<Option<Recipient>, Error> {
        const SQL: &str = r#"
        INSERT INTO "recipient" (
            "account_number",
            "name",
            "recipient_account"
        )
        VALUES ($1, $2, $3)
        ON CONFLICT ("account_number", "recipient_account") DO NOTHING
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .bind(name)
            .bind(recipient_account)
            .fetch_optional(&mut **transaction)
            .await
    }

    /// Case-insensitive match on name or account number.
    pub async fn get(
        &self,
        account_number: &str,
        search: Option<&str>,
    ) -> Result<Vec<Recipient>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "recipient"
        WHERE
            "account_number" = $1 AND
            (
                $2::VARCHAR IS NULL OR
                "name" ILIKE '%' || $2 || '%' OR
                "recipient_account" ILIKE '%' || $2 || '%'
            )
        ORDER BY "name" ASC
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .bind(search)
            .fetch_all(&self.pool)
            .await
    }
}
