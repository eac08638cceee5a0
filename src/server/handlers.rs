//! HTTP handlers for entity operations
//!
//! Every handler is generic over the [`Record`] it serves; the route table
//! instantiates them once per entity.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::error::ValidationError;
use crate::core::{SearchCriteria, ShopError};
use crate::entities::record::Record;
use crate::repository::Repository;
use crate::storage::Stores;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub stores: Stores,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(stores: Stores, config: AppConfig) -> Self {
        Self {
            stores,
            config: Arc::new(config),
        }
    }

    fn repository<T: Record>(&self) -> Repository<'_, T> {
        Repository::new(&self.stores, &self.config.vocabulary)
    }
}

/// Parse a path identifier as an unsigned 32-bit integer
fn parse_id(raw: &str) -> Result<u32, ShopError> {
    raw.parse::<u32>().map_err(|_| {
        ValidationError::InvalidId {
            value: raw.to_string(),
        }
        .into()
    })
}

/// Unwrap a JSON body, mapping any parse failure to `Invalid JSON data`
fn payload<P>(body: Result<Json<P>, JsonRejection>) -> Result<P, ShopError> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "malformed request body");
        ValidationError::InvalidJson {
            message: rejection.body_text(),
        }
        .into()
    })
}

fn render<T: Record>(records: &[T]) -> Result<Vec<Value>, ShopError> {
    records.iter().map(|record| record.to_response()).collect()
}

/// `GET /{plural}`
pub async fn list<T: Record>(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, ShopError> {
    let records = state.repository::<T>().get_all().await?;
    Ok(Json(render(&records)?))
}

/// `GET /{plural}/{id}`
pub async fn get<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ShopError> {
    let id = parse_id(&id)?;
    let record = state.repository::<T>().get_by_id(id).await?;
    Ok(Json(record.to_response()?))
}

/// `GET /{plural}/search?field=value...`
pub async fn search<T: Record>(
    State(state): State<AppState>,
    Query(criteria): Query<SearchCriteria>,
) -> Result<Json<Vec<Value>>, ShopError> {
    let records = state.repository::<T>().search(&criteria).await?;
    Ok(Json(render(&records)?))
}

/// `POST /{plural}`
pub async fn create<T: Record>(
    State(state): State<AppState>,
    body: Result<Json<T::Payload>, JsonRejection>,
) -> Result<impl IntoResponse, ShopError> {
    let payload = payload(body)?;
    let record = state.repository::<T>().create(&payload).await?;

    tracing::info!(
        entity = T::resource_name_singular(),
        id = record.id(),
        "created"
    );
    Ok((StatusCode::CREATED, Json(record.to_response()?)))
}

/// `PUT /{plural}/{id}`
pub async fn update<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<T::Payload>, JsonRejection>,
) -> Result<Json<Value>, ShopError> {
    let id = parse_id(&id)?;
    let payload = payload(body)?;
    let record = state.repository::<T>().update(id, &payload).await?;
    Ok(Json(record.to_response()?))
}

/// `DELETE /{plural}/{id}`
pub async fn delete<T: Record>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ShopError> {
    let id = parse_id(&id)?;
    state.repository::<T>().delete(id).await?;

    tracing::info!(entity = T::resource_name_singular(), id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "shopfront",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_u32_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("4294967295").unwrap(), u32::MAX);
        assert!(parse_id("-1").is_err());
        assert!(parse_id("4294967296").is_err());
        assert_eq!(parse_id("abc").unwrap_err().to_string(), "Invalid ID");
    }
}
