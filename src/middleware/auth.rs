use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated identity extracted from the session cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }
}

/// Cookie auth guard: validates the session token and injects the verified
/// identity. Requests without a verifiable token never reach the handler.
pub async fn cookie_auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = auth::cookie_value(&headers, auth::AUTH_COOKIE)
        .ok_or_else(|| ApiError::unauthorized("unauthorized access"))?;

    // Signature and expiry failures are indistinguishable to the caller
    let claims =
        validate_jwt(&token).map_err(|_| ApiError::unauthorized("unauthorized access"))?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Validate the session token and extract claims
fn validate_jwt(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid session token: {}", e))?;

    Ok(token_data.claims)
}
