//! Shared helpers for HTTP-level integration tests
//!
//! Tests run the full router against the in-memory store, which mirrors the
//! relational semantics of the PostgreSQL backend (serial ids, referential
//! integrity, cascades).

#![allow(dead_code)]

use axum_test::TestServer;
use biztime::core::model::{Company, Industry};
use biztime::core::store::BizStore;
use biztime::server::router::build_router;
use biztime::server::AppState;
use biztime::storage::InMemoryStore;
use std::sync::Arc;

/// Build a test server over a fresh in-memory store.
///
/// Returns the store handle as well so tests can seed rows that have no
/// HTTP surface (industries) or assert on persisted state directly.
pub fn test_server() -> (TestServer, Arc<dyn BizStore>) {
    let store: Arc<dyn BizStore> = Arc::new(InMemoryStore::new());
    let app = build_router(AppState::new(store.clone()));
    let server = TestServer::try_new(app).expect("failed to build test server");
    (server, store)
}

/// Seed a company row directly at the store layer
pub async fn seed_company(
    store: &Arc<dyn BizStore>,
    code: &str,
    name: &str,
    description: Option<&str>,
) -> Company {
    store
        .insert_company(Company {
            code: code.to_string(),
            name: name.to_string(),
            description: description.map(String::from),
        })
        .await
        .expect("failed to seed company")
}

/// Seed an industry row directly at the store layer
pub async fn seed_industry(store: &Arc<dyn BizStore>, code: &str, industry: &str) -> Industry {
    store
        .insert_industry(Industry {
            code: code.to_string(),
            industry: industry.to_string(),
        })
        .await
        .expect("failed to seed industry")
}
