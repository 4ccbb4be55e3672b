use sqlx::{Error, Transaction};

use crate::{
    ledger::History_Entry,
    model::{History, Table},
};

use super::DataBase;

impl Table<History> {
    /// Appends `data` under `reference`.
    ///
    /// Returns `None` when the reference is already taken; the statement
    /// does not abort the surrounding transaction in that case.
    pub async fn insert(
        &self,
        reference: &str,
        data: &History_Entry,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<Option<History>, Error> {
        const SQL: &str = r#"
        INSERT INTO "history" (
            "reference",
            "account_number",
            "kind",
            "amount",
            "fee",
            "balance_after",
            "counterparty",
            "detail",
            "request_id"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT ("reference") DO NOTHING
        RETURNING *
        "#;

        sqlx::query_as(SQL)
            .bind(reference)
            .bind(&data.account_number)
            .bind(String::from(data.kind))
            .bind(&data.amount)
            .bind(&data.fee)
            .bind(&data.balance_after)
            .bind(&data.counterparty)
            .bind(&data.detail)
            .bind(&data.request_id)
            .fetch_optional(&mut **transaction)
            .await
    }

    pub async fn get_by_request_id(
        &self,
        account_number: &str,
        request_id: &str,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<Option<History>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "history"
        WHERE
            "account_number" = $1 AND
            "request_id" = $2
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .bind(request_id)
            .fetch_optional(&mut **transaction)
            .await
    }

    pub async fn get_by_reference(
        &self,
        account_number: &str,
        reference: &str,
    ) -> Result<Option<History>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "history"
        WHERE
            "account_number" = $1 AND
            "reference" = $2
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .bind(reference)
            .fetch_optional(&self.pool)
            .await
    }

    /// Newest first. A `None` kind lists every kind.
    pub async fn get(
        &self,
        account_number: &str,
        kind: Option<String>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<History>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "history"
        WHERE
            "account_number" = $1 AND
            ($2::VARCHAR IS NULL OR "kind" = $2)
        ORDER BY "created_at" DESC, "id" DESC
        OFFSET $3
        LIMIT $4
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .bind(kind)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
    }
}
