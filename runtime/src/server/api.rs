//! Request handlers and the JSON error envelope.

use super::AppContext;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::debug;
use urlguard::{PredictionError, PredictionResult, FEATURE_DIM, SCHEMA_VERSION};

/// `{"error": "..."}` with a status code.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<PredictionError> for ApiError {
    fn from(err: PredictionError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("rejected request body: {rejection}");
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                Self::bad_request("Invalid Content-Type. Expected application/json")
            }
            _ => Self::bad_request("Invalid JSON body"),
        }
    }
}

/// Pull the `url` string out of a request body.
fn url_field(body: &Value) -> Result<&str, ApiError> {
    match body.get("url") {
        None | Some(Value::Null) => Err(PredictionError::InvalidInput.into()),
        Some(Value::String(s)) if s.is_empty() => Err(PredictionError::InvalidInput.into()),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ApiError::bad_request("URL must be a string")),
    }
}

/// POST /predict
pub async fn predict(
    State(ctx): State<AppContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(body) = body?;
    let url = url_field(&body)?;
    Ok(Json(ctx.service.handle(url)?))
}

#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    pub url: String,
    pub schema_version: u32,
    pub features: Map<String, Value>,
    pub vector: [f64; FEATURE_DIM],
}

/// POST /features
pub async fn features(
    State(ctx): State<AppContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FeaturesResponse>, ApiError> {
    let Json(body) = body?;
    let url = url_field(&body)?;

    let vector = ctx.service.extractor().extract(url);
    let features = vector
        .named()
        .iter()
        .map(|(name, value)| (name.to_string(), json!(value)))
        .collect();

    Ok(Json(FeaturesResponse {
        url: url.to_string(),
        schema_version: SCHEMA_VERSION,
        features,
        vector: vector.to_array(),
    }))
}

/// GET /health
pub async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    if ctx.service.adapter().is_available() {
        (
            StatusCode::OK,
            Json(json!({ "status": "ok", "model": "ready" })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "model": "unavailable" })),
        )
    }
}
