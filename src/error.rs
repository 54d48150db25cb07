use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;
use crate::normalize::NormalizeError;

/// Errors a handler can surface to the client. Bodies are always
/// `{"detail": <message>}`, which is what the frontend expects.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Component not found")]
    ComponentNotFound,

    #[error("Failed to generate ideas: {0}")]
    Generation(#[from] LlmError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::ComponentNotFound => StatusCode::NOT_FOUND,
            AppError::Generation(_) | AppError::Normalize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::ComponentNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn gateway_and_parse_failures_map_to_500() {
        let gateway = AppError::Generation(LlmError::MissingKey).into_response();
        assert_eq!(gateway.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let parse_err = serde_json::from_str::<serde_json::Value>("nope").unwrap_err();
        let normalize = AppError::Normalize(NormalizeError::InvalidJson(parse_err)).into_response();
        assert_eq!(normalize.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn messages_carry_the_underlying_cause() {
        let err = AppError::Generation(LlmError::Http("status=502 body=bad gateway".into()));
        assert_eq!(
            err.to_string(),
            "Failed to generate ideas: HTTP error: status=502 body=bad gateway"
        );
    }
}
