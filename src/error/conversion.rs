/**
 * Error Response Conversion
 *
 * Implements Axum's `IntoResponse` for [`ApiError`] so handlers can return
 * `Result<_, ApiError>` directly.
 *
 * # Response Format
 *
 * Error responses are JSON:
 * ```json
 * {
 *   "error": "Email already registered",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Json, Response},
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });
        (status, Json(body)).into_response()
    }
}
