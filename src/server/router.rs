//! Router assembly for the biztime API
//!
//! Binds HTTP verbs and path templates to resource handlers. The route
//! table is the compatibility contract; the path templates must not change.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::AppState;
use super::companies;
use super::invoices;

/// Build the application router.
///
/// Routes:
/// - GET/POST /companies, GET/PUT/DELETE /companies/{code}
/// - GET/POST /invoices, GET/PUT/DELETE /invoices/{id}
/// - GET /health
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/companies",
            get(companies::list_companies).post(companies::create_company),
        )
        .route(
            "/companies/{code}",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        .route(
            "/invoices",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route(
            "/invoices/{id}",
            get(invoices::get_invoice)
                .put(invoices::update_invoice)
                .delete(invoices::delete_invoice),
        )
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "biztime"
    }))
}
