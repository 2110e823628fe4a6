use std::sync::Arc;

use axum::extract::{FromRequest, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::orchestrator::Orchestrator;
use crate::types::{RouteRequest, RouteResult};

/// Wraps `axum::Json` so a malformed body produces the service's own
/// `{"error":"bad_request",...}` shape instead of axum's default rejection
/// body.
struct ValidatedJson<T>(T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(ValidatedJson(value))
    }
}

pub fn router(orchestrator: Arc<Orchestrator>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/route", post(route))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}

#[derive(Serialize)]
struct Health {
    ok: bool,
}

async fn healthz() -> Json<Health> {
    Json(Health { ok: true })
}

async fn route(
    State(orchestrator): State<Arc<Orchestrator>>,
    ValidatedJson(request): ValidatedJson<RouteRequest>,
) -> Result<Json<RouteResult>, ApiError> {
    let result = orchestrator.route(request).await?;
    Ok(Json(result))
}

async fn metrics(State(orchestrator): State<Arc<Orchestrator>>) -> Response {
    let body = orchestrator.metrics.render();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}
