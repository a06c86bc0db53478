//! Authentication route handlers
//!
//! Login, logout, token refresh and token validation. Logout, refresh and
//! validate act on the presented token itself, so they take the raw Bearer
//! token instead of going through the role middleware.

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{LoginRequest, LogoutResponse, TokenResponse, ValidateResponse};
use crate::handlers::{handle_domain_error, handle_validation_error};
use crate::middleware::BearerToken;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/login
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "..." }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 3600,
///     "expires_at": "2024-01-01T12:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing username or password
/// - 401 Unauthorized: Invalid credentials
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(issued) => HttpResponse::Ok().json(TokenResponse::from(issued)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented token. Already revoked or expired tokens are
/// accepted.
///
/// ## Errors
/// - 401 Unauthorized: Missing Authorization header
pub async fn logout(state: web::Data<AppState>, token: BearerToken) -> HttpResponse {
    state.auth_service.logout(&token.0);
    HttpResponse::Ok().json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}

/// Handler for POST /api/v1/auth/refresh-token
///
/// Revokes the presented token and returns a replacement for the same user.
///
/// ## Errors
/// - 401 Unauthorized: Token malformed, already revoked or past the refresh window
pub async fn refresh_token(state: web::Data<AppState>, token: BearerToken) -> HttpResponse {
    match state.auth_service.refresh(&token.0) {
        Ok(issued) => HttpResponse::Ok().json(TokenResponse::from(issued)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/auth/validate
///
/// ```json
/// { "valid": true }
/// ```
pub async fn validate(state: web::Data<AppState>, token: BearerToken) -> HttpResponse {
    HttpResponse::Ok().json(ValidateResponse {
        valid: state.auth_service.validate(&token.0),
    })
}
