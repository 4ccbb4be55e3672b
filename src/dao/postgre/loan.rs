use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{types::BigDecimal, Error, Transaction};
use uuid::Uuid;

use crate::{
    helpers::Loan_Status,
    model::{Loan, Table},
};

use super::{DataBase, QueryResult};

impl Table<Loan> {
    pub async fn insert(
        &self,
        data: &Loan,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        INSERT INTO "loan" (
            "id",
            "account_number",
            "principal",
            "purpose",
            "tenure_months",
            "annual_income",
            "employment_status",
            "interest_rate",
            "emi_amount",
            "total_payable",
            "total_paid",
            "balance_remaining",
            "status",
            "requested_at",
            "disbursed_at",
            "next_due_date",
            "updated_at",
            "installments_paid"
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
        "#;

        sqlx::query(SQL)
            .bind(data.id)
            .bind(&data.account_number)
            .bind(&data.principal)
            .bind(&data.purpose)
            .bind(data.tenure_months)
            .bind(&data.annual_income)
            .bind(&data.employment_status)
            .bind(&data.interest_rate)
            .bind(&data.emi_amount)
            .bind(&data.total_payable)
            .bind(&data.total_paid)
            .bind(&data.balance_remaining)
            .bind(&data.status)
            .bind(data.requested_at)
            .bind(data.disbursed_at)
            .bind(data.next_due_date)
            .bind(data.updated_at)
            .bind(data.installments_paid)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Loan>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "loan"
        WHERE "id" = $1
        "#;

        sqlx::query_as(SQL).bind(id).fetch_optional(&self.pool).await
    }

    pub async fn get_for_update(
        &self,
        id: Uuid,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<Option<Loan>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "loan"
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
    ) -> Result<Vec<Loan>, Error> {
        const SQL: &str = r#"
        SELECT *
        FROM "loan"
        WHERE "account_number" = $1
        ORDER BY "requested_at" DESC
        "#;

        sqlx::query_as(SQL)
            .bind(account_number)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn disburse(
        &self,
        id: Uuid,
        disbursed_at: DateTime<Utc>,
        next_due_date: NaiveDate,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        UPDATE "loan"
        SET
            "status" = $1,
            "disbursed_at" = $2,
            "next_due_date" = $3,
            "updated_at" = $2
        WHERE "id" = $4
        "#;

        sqlx::query(SQL)
            .bind(String::from(Loan_Status::Active))
            .bind(disbursed_at)
            .bind(next_due_date)
            .bind(id)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: Loan_Status,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        UPDATE "loan"
        SET
            "status" = $1,
            "updated_at" = $2
        WHERE "id" = $3
        "#;

        sqlx::query(SQL)
            .bind(String::from(status))
            .bind(Utc::now())
            .bind(id)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }

    pub async fn update_progress(
        &self,
        id: Uuid,
        total_paid: &BigDecimal,
        balance_remaining: &BigDecimal,
        status: Loan_Status,
        next_due_date: Option<NaiveDate>,
        installments_paid: i32,
        transaction: &mut Transaction<'_, DataBase>,
    ) -> Result<(), Error> {
        const SQL: &str = r#"
        UPDATE "loan"
        SET
            "total_paid" = $1,
            "balance_remaining" = $2,
            "status" = $3,
            "next_due_date" = $4,
            "installments_paid" = $5,
            "updated_at" = $6
        WHERE "id" = $7
        "#;

        sqlx::query(SQL)
            .bind(total_paid)
            .bind(balance_remaining)
            .bind(String::from(status))
            .bind(next_due_date)
            .bind(installments_paid)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut **transaction)
            .await
            .map(drop)
    }

    /// Flags active loans whose due date has passed.
    pub async fn mark_overdue(&self, today: NaiveDate) -> Result<u64, Error> {
        const SQL: &str = r#"
        UPDATE "loan"
        SET
            "status" = $1,
            "updated_at" = $2
        WHERE
            "status" = $3 AND
            "next_due_date" < $4
        "#;

        sqlx::query(SQL)
            .bind(String::from(Loan_Status::Overdue))
            .bind(Utc::now())
            .bind(String::from(Loan_Status::Active))
            .bind(today)
            .execute(&self.pool)
            .await
            .map(|result: QueryResult| result.rows_affected())
    }
}
