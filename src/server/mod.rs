//! HTTP layer: shared state, resource handlers, and router assembly

pub mod companies;
pub mod invoices;
pub mod router;

use crate::core::store::BizStore;
use std::sync::Arc;

/// Application state shared across handlers
///
/// Handlers hold no other state between requests; the store is the sole
/// owner of durable data.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BizStore>,
}

impl AppState {
    /// Create app state around a storage backend
    pub fn new(store: Arc<dyn BizStore>) -> Self {
        Self { store }
    }
}
