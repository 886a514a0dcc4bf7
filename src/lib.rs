//! # Biztime
//!
//! A REST API for tracking companies, the invoices they accumulate, and the
//! industries they belong to.
//!
//! ## Architecture
//!
//! - **core**: domain models, the [`core::store::BizStore`] trait, slug
//!   derivation, and the typed error hierarchy
//! - **storage**: backends implementing the store trait — PostgreSQL via
//!   sqlx (feature `postgres`) and an in-memory store for tests and
//!   development (feature `in-memory`, default)
//! - **server**: axum handlers and router assembly
//! - **config**: YAML file + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use biztime::server::{router::build_router, AppState};
//! use biztime::storage::InMemoryStore;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let state = AppState::new(Arc::new(InMemoryStore::new()));
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
