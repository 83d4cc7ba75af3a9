/**
 * Router Configuration
 *
 * This module assembles the full application router.
 *
 * # Route Layout
 *
 * Public routes (root, register, login) are merged with a bearer-protected
 * subrouter (me, chat endpoints) wrapped in the authentication middleware.
 * A plain 404 fallback handles everything else.
 *
 * # CORS
 *
 * The permissive CORS layer is applied outermost so every response —
 * success, error, the 404 fallback, and OPTIONS preflight — carries the
 * allow-origin header.
 */

use axum::{
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::auth::handlers::{login, me, register};
use crate::chat::handlers::{clear_history, get_history, send_message};
use crate::middleware::auth::authenticate;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Routes
///
/// Public:
/// - `GET /` - liveness
/// - `POST /auth/register` - user registration
/// - `POST /auth/login` - local login
///
/// Bearer-protected:
/// - `GET /auth/me` - current user
/// - `POST /chat/send` - AI chat exchange
/// - `GET /chat/history` - history retrieval
/// - `DELETE /chat/history` - history clearing
pub fn create_router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/me", get(me))
        .route("/chat/send", post(send_message))
        .route("/chat/history", get(get_history).delete(clear_history))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            authenticate,
        ));

    Router::new()
        .route("/", get(root))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected)
        .fallback(fallback)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Liveness handler
async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "msg": "Backend running successfully!" }))
}

/// Fallback handler for unknown routes
async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 Not Found")
}
