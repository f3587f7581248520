use axum::{http::header, response::IntoResponse, Json};
use mongodb::bson::Document;
use serde_json::json;

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;

/// POST /token - sign a session token for the given identity and hand it
/// back as an HTTP-only cookie
pub async fn token_post(Json(identity): Json<Document>) -> Result<impl IntoResponse, ApiError> {
    let email = identity
        .get_str("email")
        .map_err(|_| ApiError::bad_request("email is required"))?
        .to_string();

    let claims = Claims::new(email);
    let max_age_secs = claims.exp - claims.iat;

    let token = auth::generate_jwt(claims).map_err(|e| {
        tracing::error!("failed to issue session token: {}", e);
        ApiError::internal_server_error("failed to issue token")
    })?;

    let cookie = auth::session_cookie(&token, max_age_secs, config::config().security.cookie_secure);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    ))
}

/// GET /logout - clear the session cookie immediately
pub async fn logout_get() -> impl IntoResponse {
    let cookie = auth::expired_cookie(config::config().security.cookie_secure);

    (
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    )
}
