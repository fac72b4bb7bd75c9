//! Contact API handlers.
//!
//! Each handler parses its input, makes one `ContactService` call and
//! converts the outcome into a response. Failures go through [`ApiError`].

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::contacts::{Contact, ContactSummary};
use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub version: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
    })
}

pub async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.get_all().await?))
}

pub async fn create_contact(
    State(state): State<AppState>,
    payload: Result<Json<Contact>, JsonRejection>,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let Json(candidate) = payload.map_err(invalid_body)?;
    let contact = state.contacts.add(candidate).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.contacts.get_by_id(id).await?))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Contact>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_id(&id)?;
    let Json(candidate) = payload.map_err(invalid_body)?;
    Ok(Json(state.contacts.update_by_id(id, candidate).await?))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.contacts.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<ContactSummary>, ApiError> {
    Ok(Json(state.contacts.summary().await?))
}

/// `GET /contacts/search?name=...`. The service would match everything for an
/// empty query; the endpoint requires a non-empty one instead.
pub async fn search_contacts(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let query = params
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("query parameter 'name' is required".into()))?;
    Ok(Json(state.contacts.search_by_name(&query).await?))
}

pub async fn get_email_providers(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, usize>>, ApiError> {
    Ok(Json(state.contacts.email_providers().await?))
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid contact id {raw:?}")))
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("invalid request body: {}", rejection.body_text()))
}
