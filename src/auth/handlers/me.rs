/**
 * Current User Handler
 *
 * Implements GET /auth/me. The authentication middleware has already
 * resolved the bearer credential (remote identity or local token) to a
 * user, so this handler only shapes the response.
 */

use axum::response::Json;

use crate::auth::handlers::types::UserResponse;
use crate::middleware::auth::AuthUser;

/// Current-user handler
pub async fn me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(user))
}
