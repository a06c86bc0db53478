//! Role-checking authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the Bearer token from the Authorization header,
//! runs it through the authorization guard and injects the caller's
//! [`AuthContext`] into the request extensions. Failures are answered
//! directly: 401 when no valid session exists, 403 when the session's role
//! is too low.

use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use urm_core::domain::{Claims, RoleLevel};
use urm_core::errors::{AuthError, DomainError, TokenError};
use urm_core::services::AuthorizationGuard;

use crate::handlers::handle_domain_error;

/// Authenticated caller injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID from the token subject
    pub user_id: String,
    pub username: String,
    /// Resolved role level
    pub role: RoleLevel,
    /// The presented token, for operations that act on the session itself
    pub token: String,
}

impl AuthContext {
    fn from_claims(claims: Claims, token: String) -> Result<Self, DomainError> {
        let role = RoleLevel::from_role_id(&claims.role)?;
        Ok(Self {
            user_id: claims.sub,
            username: claims.username,
            role,
            token,
        })
    }
}

/// Middleware factory admitting callers whose role is at least `minimum`
#[derive(Clone)]
pub struct RequireRole {
    guard: AuthorizationGuard,
    minimum: RoleLevel,
}

impl RequireRole {
    pub fn new(guard: AuthorizationGuard, minimum: RoleLevel) -> Self {
        Self { guard, minimum }
    }

    /// Any authenticated caller
    pub fn authenticated(guard: AuthorizationGuard) -> Self {
        Self::new(guard, RoleLevel::Student)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            guard: self.guard.clone(),
            minimum: self.minimum,
        }))
    }
}

/// Role-checking middleware service
pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    guard: AuthorizationGuard,
    minimum: RoleLevel,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let admitted = match bearer_token(req.request()) {
            Some(token) => self
                .guard
                .require(&token, self.minimum)
                .and_then(|claims| AuthContext::from_claims(claims, token)),
            None => Err(AuthError::Unauthenticated(TokenError::MalformedToken).into()),
        };

        Box::pin(async move {
            match admitted {
                Ok(auth_context) => {
                    req.extensions_mut().insert(auth_context);
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(error) => {
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extracts the Bearer token from the Authorization header
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

/// Raw Bearer token, unvalidated.
///
/// For endpoints that act on the token itself (logout, refresh, validate)
/// and therefore must accept revoked or expired tokens.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl FromRequest for BearerToken {
    type Error = actix_web::error::InternalError<&'static str>;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = bearer_token(req).map(BearerToken).ok_or_else(|| {
            let error: DomainError = AuthError::Unauthenticated(TokenError::MalformedToken).into();
            actix_web::error::InternalError::from_response(
                "Missing bearer token",
                handle_domain_error(&error),
            )
        });
        ready(result)
    }
}
