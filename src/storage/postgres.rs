//! PostgreSQL storage backend using sqlx.
//!
//! Provides [`PostgresStore`], a [`BizStore`] implementation backed by a
//! PostgreSQL database via `sqlx::PgPool`. Every operation is a single
//! parameterized statement; referential integrity and cascades come from the
//! schema (see `migrations/`), not from handler logic.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! biztime = { version = "0.1", features = ["postgres"] }
//! ```

use crate::core::error::StoreError;
use crate::core::model::{Company, CompanySummary, Industry, Invoice, InvoiceSummary};
use crate::core::store::BizStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Biztime store backed by PostgreSQL.
///
/// The pool is owned by the process lifecycle: built once at startup and
/// shared across all in-flight requests.
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Flattened row for the invoice/company inner join.
///
/// The company columns are aliased next to the invoice columns in one row;
/// `into_parts` splits them back into the two domain structs.
#[derive(sqlx::FromRow)]
struct InvoiceCompanyRow {
    id: i32,
    comp_code: String,
    amt: f64,
    paid: bool,
    add_date: DateTime<Utc>,
    paid_date: Option<DateTime<Utc>>,
    code: String,
    name: String,
    description: Option<String>,
}

impl InvoiceCompanyRow {
    fn into_parts(self) -> (Invoice, Company) {
        (
            Invoice {
                id: self.id,
                comp_code: self.comp_code,
                amt: self.amt,
                paid: self.paid,
                add_date: self.add_date,
                paid_date: self.paid_date,
            },
            Company {
                code: self.code,
                name: self.name,
                description: self.description,
            },
        )
    }
}

#[async_trait]
impl BizStore for PostgresStore {
    async fn list_companies(&self) -> Result<Vec<CompanySummary>, StoreError> {
        let companies = sqlx::query_as::<_, CompanySummary>("SELECT code, name FROM companies")
            .fetch_all(&self.pool)
            .await?;

        Ok(companies)
    }

    async fn get_company(&self, code: &str) -> Result<Option<Company>, StoreError> {
        let company = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, StoreError> {
        let ids = sqlx::query_scalar::<_, i32>("SELECT id FROM invoices WHERE comp_code = $1")
            .bind(code)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn industries_for_company(&self, code: &str) -> Result<Vec<String>, StoreError> {
        let industries = sqlx::query_scalar::<_, String>(
            "SELECT i.industry
             FROM company_industries ci
             JOIN industries i ON ci.industry_code = i.code
             WHERE ci.comp_code = $1",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;

        Ok(industries)
    }

    async fn insert_company(&self, company: Company) -> Result<Company, StoreError> {
        let created = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (code, name, description)
             VALUES ($1, $2, $3)
             RETURNING code, name, description",
        )
        .bind(&company.code)
        .bind(&company.name)
        .bind(&company.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn attach_industry(
        &self,
        comp_code: &str,
        industry_code: &str,
    ) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO company_industries (comp_code, industry_code) VALUES ($1, $2)")
            .bind(comp_code)
            .bind(industry_code)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_company(
        &self,
        code: &str,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Company>, StoreError> {
        let updated = sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = $1, description = $2
             WHERE code = $3
             RETURNING code, name, description",
        )
        .bind(&name)
        .bind(&description)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_company(&self, code: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, StoreError> {
        let invoices =
            sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices")
                .fetch_all(&self.pool)
                .await?;

        Ok(invoices)
    }

    async fn get_invoice_with_company(
        &self,
        id: i32,
    ) -> Result<Option<(Invoice, Company)>, StoreError> {
        let row = sqlx::query_as::<_, InvoiceCompanyRow>(
            "SELECT i.id, i.comp_code, i.amt, i.paid, i.add_date, i.paid_date,
                    c.code, c.name, c.description
             FROM invoices AS i
             JOIN companies AS c ON i.comp_code = c.code
             WHERE i.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(InvoiceCompanyRow::into_parts))
    }

    async fn insert_invoice(&self, comp_code: &str, amt: f64) -> Result<Invoice, StoreError> {
        let invoice = sqlx::query_as::<_, Invoice>(
            "INSERT INTO invoices (comp_code, amt)
             VALUES ($1, $2)
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(comp_code)
        .bind(amt)
        .fetch_one(&self.pool)
        .await?;

        Ok(invoice)
    }

    async fn update_invoice(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        paid_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Invoice>, StoreError> {
        let updated = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET amt = $1, paid = $2, paid_date = $3
             WHERE id = $4
             RETURNING id, comp_code, amt, paid, add_date, paid_date",
        )
        .bind(amt)
        .bind(paid)
        .bind(paid_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_invoice(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_industry(&self, industry: Industry) -> Result<Industry, StoreError> {
        let created = sqlx::query_as::<_, Industry>(
            "INSERT INTO industries (code, industry)
             VALUES ($1, $2)
             RETURNING code, industry",
        )
        .bind(&industry.code)
        .bind(&industry.industry)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }
}
