//! Conversion of domain errors into HTTP responses

use actix_web::{http::StatusCode, HttpResponse};
use tracing::{debug, error};
use urm_core::errors::{AuthError, DomainError, TokenError};
use urm_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Status code and stable error code for a domain error
pub fn classify(error: &DomainError) -> (StatusCode, &'static str) {
    match error {
        DomainError::Token(token_error) => classify_token(token_error),
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::Unauthenticated(token_error) => classify_token(token_error),
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, error_codes::INVALID_CREDENTIALS)
            }
            AuthError::Forbidden { .. }
            | AuthError::RegistrationForbidden { .. }
            | AuthError::SuperAdminExists => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
            AuthError::UserAlreadyExists { .. } => (StatusCode::BAD_REQUEST, error_codes::CONFLICT),
            AuthError::UserNotFound | AuthError::RoleNotFound { .. } => {
                (StatusCode::NOT_FOUND, error_codes::NOT_FOUND)
            }
            AuthError::UnknownRole { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::UNKNOWN_ROLE)
            }
        },
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        DomainError::Configuration { .. } | DomainError::Internal { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

fn classify_token(error: &TokenError) -> (StatusCode, &'static str) {
    match error {
        TokenError::MalformedToken => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_INVALID),
        TokenError::Expired => (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED),
        TokenError::Revoked | TokenError::AlreadyRevoked => {
            (StatusCode::UNAUTHORIZED, error_codes::TOKEN_REVOKED)
        }
        TokenError::IssueFailed { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
        }
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Server-side failures are logged in full and answered with a generic message.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = classify(error);

    let message = if status.is_server_error() {
        error!("Request failed: {}", error);
        "An internal error occurred".to_string()
    } else {
        debug!("Request rejected: {}", error);
        error.to_string()
    };

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// 400 response for request bodies that fail validation
pub fn handle_validation_error(errors: &ValidationErrors) -> HttpResponse {
    let field_errors = errors.field_errors();
    let mut fields: Vec<&str> = field_errors.keys().map(|k| k.as_ref()).collect();
    fields.sort_unstable();

    HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        format!("Invalid fields: {}", fields.join(", ")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use urm_core::domain::RoleLevel;

    #[test]
    fn test_unauthenticated_and_forbidden_are_distinct() {
        let unauthenticated: DomainError = AuthError::Unauthenticated(TokenError::Expired).into();
        let forbidden: DomainError = AuthError::Forbidden {
            required: RoleLevel::Admin,
            actual: RoleLevel::Student,
        }
        .into();

        assert_eq!(
            classify(&unauthenticated),
            (StatusCode::UNAUTHORIZED, error_codes::TOKEN_EXPIRED)
        );
        assert_eq!(
            classify(&forbidden),
            (StatusCode::FORBIDDEN, error_codes::FORBIDDEN)
        );
    }

    #[test]
    fn test_unknown_role_is_a_server_error() {
        let error: DomainError = AuthError::UnknownRole {
            role: "janitor".to_string(),
        }
        .into();
        assert_eq!(classify(&error).0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_server_errors_hide_details() {
        let error = DomainError::Configuration {
            message: "private key is garbage".to_string(),
        };
        let response = handle_domain_error(&error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_token_errors_map_to_401() {
        for token_error in [
            TokenError::MalformedToken,
            TokenError::Expired,
            TokenError::Revoked,
            TokenError::AlreadyRevoked,
        ] {
            let error: DomainError = token_error.into();
            assert_eq!(classify(&error).0, StatusCode::UNAUTHORIZED);
        }
    }

    #[actix_web::test]
    async fn test_validation_error_lists_fields() {
        use validator::ValidationError;

        let mut errors = ValidationErrors::new();
        errors.add("username", ValidationError::new("length"));
        errors.add("email", ValidationError::new("email"));

        let response = handle_validation_error(&errors);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], error_codes::VALIDATION_ERROR);
        assert_eq!(body["message"], "Invalid fields: email, username");
    }
}
