//! HTTP handlers for the company resource

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::AppState;
use crate::core::error::ApiError;
use crate::core::model::{Company, CompanyDetail, CompanySummary};
use crate::core::slug::Slugifier;

/// Response for the company list endpoint
#[derive(Debug, Serialize)]
pub struct CompanyListResponse {
    pub companies: Vec<CompanySummary>,
}

/// Response wrapping a bare company row (create and update)
#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub company: Company,
}

/// Response wrapping the joined detail view (get by code)
#[derive(Debug, Serialize)]
pub struct CompanyDetailResponse {
    pub company: CompanyDetail,
}

/// Request body for creating a company
#[derive(Debug, Deserialize)]
pub struct CreateCompanyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Industry codes to associate at creation time. Not validated here;
    /// unknown codes fail at the store with an integrity error.
    #[serde(default)]
    pub industries: Vec<String>,
}

/// Request body for updating a company.
///
/// Both fields overwrite unconditionally: an omitted description clears the
/// stored one.
#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: String,
    pub description: Option<String>,
}

/// GET /companies
pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<CompanyListResponse>, ApiError> {
    let companies = state.store.list_companies().await?;

    Ok(Json(CompanyListResponse { companies }))
}

/// GET /companies/{code}
///
/// The detail view joins in the ids of the company's invoices and the
/// display names of its industries.
pub async fn get_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CompanyDetailResponse>, ApiError> {
    let company = state
        .store
        .get_company(&code)
        .await?
        .ok_or_else(|| ApiError::not_found("Company"))?;

    let invoices = state.store.invoice_ids_for_company(&code).await?;
    let industries = state.store.industries_for_company(&code).await?;

    Ok(Json(CompanyDetailResponse {
        company: CompanyDetail {
            code: company.code,
            name: company.name,
            description: company.description,
            invoices,
            industries,
        },
    }))
}

/// POST /companies
///
/// Derives `code` from `name` via slugification. Association rows for any
/// supplied industry codes are inserted one statement at a time after the
/// company row; the sequence is not atomic.
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>), ApiError> {
    let name = payload
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::Validation("Name is required.".to_string()))?;

    let code = Slugifier::slugify(&name);
    let company = state
        .store
        .insert_company(Company {
            code,
            name,
            description: payload.description,
        })
        .await?;

    for industry_code in &payload.industries {
        state
            .store
            .attach_industry(&company.code, industry_code)
            .await?;
    }

    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// PUT /companies/{code}
pub async fn update_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let company = state
        .store
        .update_company(&code, payload.name, payload.description)
        .await?
        .ok_or_else(|| ApiError::not_found("Company"))?;

    Ok(Json(CompanyResponse { company }))
}

/// DELETE /companies/{code}
pub async fn delete_company(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.store.delete_company(&code).await? {
        return Err(ApiError::not_found("Company"));
    }

    Ok(Json(json!({ "status": "deleted" })))
}
