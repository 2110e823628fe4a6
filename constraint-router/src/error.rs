use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use constraint_router_core::model::network::NetworkError;

use crate::store::StoreError;

/// Orchestrator/HTTP boundary error type. Every component-level error
/// (`NetworkError` from the graph/store layer, `StoreError` from the
/// relational store adapter) funnels into one of these variants, which maps
/// directly to the response the client receives.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("city unknown: {0}")]
    CityUnknown(String),
    #[error("no path between source and target: {0}")]
    NoPath(String),
    #[error("backing store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<NetworkError> for ApiError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::NodeNotFound(id) => ApiError::BadRequest(format!("node not found: {id}")),
            NetworkError::AttributeError(msg) => ApiError::Internal(msg),
            NetworkError::DatasetError(msg) => ApiError::StoreUnavailable(msg),
            NetworkError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::CityUnknown(city) => ApiError::CityUnknown(city),
            StoreError::Unavailable(msg) => ApiError::StoreUnavailable(msg),
            StoreError::Network(source) => source.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "bad_request", detail),
            ApiError::CityUnknown(detail) => (StatusCode::UNPROCESSABLE_ENTITY, "city_unknown", detail),
            ApiError::NoPath(detail) => (StatusCode::UNPROCESSABLE_ENTITY, "no_path", detail),
            ApiError::StoreUnavailable(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable", detail)
            }
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", detail),
        };

        (status, Json(ErrorBody { error, detail })).into_response()
    }
}
