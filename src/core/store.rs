//! Storage trait for the biztime service
//!
//! The service is agnostic to the underlying storage mechanism: handlers talk
//! to a [`BizStore`] and never see connection handles or SQL. Every method
//! maps to a single parameterized statement in the PostgreSQL backend; errors
//! propagate unmodified as [`StoreError`].

use crate::core::error::StoreError;
use crate::core::model::{
    Company, CompanySummary, Industry, Invoice, InvoiceSummary,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage operations backing the company and invoice resources.
///
/// Lookups return `Ok(None)` / `Ok(false)` when no row matched; the handler
/// decides whether that is a 404. Constraint violations (unknown `comp_code`,
/// unknown industry code, duplicate company code) surface as
/// [`StoreError::Integrity`] — handler logic never pre-validates them.
#[async_trait]
pub trait BizStore: Send + Sync {
    // -- companies ---------------------------------------------------------

    /// List all companies in the narrow `code`/`name` projection.
    /// Ordering is store-default; no pagination.
    async fn list_companies(&self) -> Result<Vec<CompanySummary>, StoreError>;

    /// Fetch a single company row by exact code match
    async fn get_company(&self, code: &str) -> Result<Option<Company>, StoreError>;

    /// Ids of all invoices whose `comp_code` is the given code
    async fn invoice_ids_for_company(&self, code: &str) -> Result<Vec<i32>, StoreError>;

    /// Display names of all industries associated with the given company,
    /// joined through the association relation
    async fn industries_for_company(&self, code: &str) -> Result<Vec<String>, StoreError>;

    /// Insert a company row and return it as stored
    async fn insert_company(&self, company: Company) -> Result<Company, StoreError>;

    /// Insert one association row linking a company to an industry.
    ///
    /// Both sides must already exist; a missing industry code is an
    /// integrity error, not a validation error.
    async fn attach_industry(
        &self,
        comp_code: &str,
        industry_code: &str,
    ) -> Result<(), StoreError>;

    /// Overwrite `name` and `description` of the company with the given
    /// code. Returns `None` if no row matched.
    async fn update_company(
        &self,
        code: &str,
        name: String,
        description: Option<String>,
    ) -> Result<Option<Company>, StoreError>;

    /// Delete a company by code, cascading its invoices and association
    /// rows. Returns `false` if no row matched.
    async fn delete_company(&self, code: &str) -> Result<bool, StoreError>;

    // -- invoices ----------------------------------------------------------

    /// List all invoices in the narrow `id`/`comp_code` projection
    async fn list_invoices(&self) -> Result<Vec<InvoiceSummary>, StoreError>;

    /// Fetch an invoice together with its owning company (inner join).
    /// Returns `None` if the invoice does not exist.
    async fn get_invoice_with_company(
        &self,
        id: i32,
    ) -> Result<Option<(Invoice, Company)>, StoreError>;

    /// Insert an invoice. The store defaults `paid = false`,
    /// `add_date = now`, and `paid_date = null`.
    async fn insert_invoice(&self, comp_code: &str, amt: f64) -> Result<Invoice, StoreError>;

    /// Overwrite `amt`, `paid`, and `paid_date` of the invoice with the
    /// given id. The caller derives `paid_date`; the store just writes it.
    /// Returns `None` if no row matched.
    async fn update_invoice(
        &self,
        id: i32,
        amt: f64,
        paid: bool,
        paid_date: Option<DateTime<Utc>>,
    ) -> Result<Option<Invoice>, StoreError>;

    /// Delete an invoice by id. Returns `false` if no row matched.
    async fn delete_invoice(&self, id: i32) -> Result<bool, StoreError>;

    // -- industries --------------------------------------------------------

    /// Insert an industry row. Industries have no HTTP surface; this exists
    /// for seeding and tests.
    async fn insert_industry(&self, industry: Industry) -> Result<Industry, StoreError>;
}
