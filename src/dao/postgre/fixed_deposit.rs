use chrono::Utc;
use sqlx::{types::BigDecimal, Error, Transaction};
use uuid::Uuid;

use crate::{
    helpers::Deposit_Status,
    model::{Fixed_Deposit, Table},
};

use super::DataBase;

impl Table<Fixed_Deposit> {
    pub async fn insert(
        &self,
        data: &Fixed_Deposit,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        INSERT INTO "fixed_deposit" (
            "id",
            "account_number",
            "principal",
            "tenure_months",
            "interest_rate",
            "start_date",
            "maturity_date",
            "maturity_amount",
            "status",
            "payout",
            "created_at",
            "closed_at"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#;

        sqlx::query(SQL)
            .bind(data.id)
            .bind(&data.account_number)
            .bind(&data.principal)
            .bind(data.tenure_months)
            .bind(&data.interest_rate)
            .bind(data.start_date)
            .bind(data.maturity_date)
            .bind(&data.maturity_amount)
            .bind(&data.status)
            .bind(&data.payout)
            .bind(data.created_at)
            .bind(data.closed_at)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }

    pub async fn get_for_update(
        &self,
        id: Uuid,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<Option<Fixed_Deposit>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "fixed_deposit"
        WHERE "id" = $1
        FOR UPDATE
        "#;

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&mut **transaction)
            .await
    }

    pub async fn get_by_account(
        &self,
        account_number: &str,
    ) -> Result<Vec<Fixed_Deposit>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "fixed_deposit"
        WHERE "account_number" = $1
        ORDER BY "created_at" DESC
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn close(
        &self,
        id: Uuid,
        status: Deposit_Status,
        payout: &BigDecimal,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        UPDATE "fixed_deposit"
        SET
            "status" = $1,
            "payout" = $2,
            "closed_at" = $3
        WHERE "id" = $4
        "#;

        sqlx::query(SQL)
            .bind(String::from(status))
            .bind(payout)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }
}
