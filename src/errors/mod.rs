// Error types and their HTTP mapping

mod service;
mod validation;

pub use service::{ServiceError, ServiceResult};
pub use validation::ValidationError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message, error_id) = match self {
            ServiceError::Validation(e) => (e.status_code(), e.to_string(), None),
            ServiceError::NotFound(what) => {
                (StatusCode::NOT_FOUND, format!("{} not found", what), None)
            }
            ServiceError::NotSaved(what) => {
                tracing::warn!("Write rejected by repository: {}", what);
                return StatusCode::UNPROCESSABLE_ENTITY.into_response();
            }
            ServiceError::Storage(e) => {
                let error_id = Uuid::new_v4();
                tracing::error!(error_id = ?error_id, "Storage error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    Some(error_id.to_string()),
                )
            }
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": message
        });
        if let Some(error_id) = error_id {
            error_obj["error_id"] = json!(error_id);
        }

        (status, Json(json!({ "error": error_obj }))).into_response()
    }
}
