//! Core domain types: models, errors, slug derivation, and the storage trait

pub mod error;
pub mod model;
pub mod slug;
pub mod store;

pub use error::{ApiError, ErrorBody, StoreError};
pub use model::{
    Company, CompanyDetail, CompanySummary, Industry, Invoice, InvoiceDetail, InvoiceSummary,
};
pub use slug::Slugifier;
pub use store::BizStore;
