//! HTTP handlers for the invoice resource

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::AppState;
use crate::core::error::ApiError;
use crate::core::model::{Invoice, InvoiceDetail, InvoiceSummary};

/// Response for the invoice list endpoint
#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<InvoiceSummary>,
}

/// Response wrapping a full invoice row (create and update)
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub invoice: Invoice,
}

/// Response wrapping the company-enriched detail view (get by id)
#[derive(Debug, Serialize)]
pub struct InvoiceDetailResponse {
    pub invoice: InvoiceDetail,
}

/// Request body for creating an invoice.
///
/// No presence validation beyond deserialization: an unknown `comp_code`
/// violates referential integrity at the store and surfaces as an internal
/// error, not a 400.
#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub comp_code: String,
    pub amt: f64,
}

/// Request body for updating an invoice
#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub amt: f64,
    pub paid: bool,
}

/// GET /invoices
pub async fn list_invoices(
    State(state): State<AppState>,
) -> Result<Json<InvoiceListResponse>, ApiError> {
    let invoices = state.store.list_invoices().await?;

    Ok(Json(InvoiceListResponse { invoices }))
}

/// GET /invoices/{id}
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<InvoiceDetailResponse>, ApiError> {
    let (invoice, company) = state
        .store
        .get_invoice_with_company(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Invoice"))?;

    Ok(Json(InvoiceDetailResponse {
        invoice: InvoiceDetail::from_parts(invoice, company),
    }))
}

/// POST /invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let invoice = state
        .store
        .insert_invoice(&payload.comp_code, payload.amt)
        .await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse { invoice })))
}

/// PUT /invoices/{id}
///
/// `paid_date` is derived here, not supplied by the caller: `paid == true`
/// stamps the current time on every update (a PAID→PAID update re-stamps),
/// `paid == false` clears it.
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateInvoiceRequest>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let paid_date = payload.paid.then(Utc::now);

    let invoice = state
        .store
        .update_invoice(id, payload.amt, payload.paid, paid_date)
        .await?
        .ok_or_else(|| ApiError::not_found("Invoice"))?;

    Ok(Json(InvoiceResponse { invoice }))
}

/// DELETE /invoices/{id}
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete_invoice(id).await? {
        return Err(ApiError::not_found("Invoice"));
    }

    Ok(Json(json!({ "status": "deleted" })))
}
