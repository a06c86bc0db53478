use actix_web::{web, HttpResponse};

use crate::handlers::handle_domain_error;
use crate::state::AppState;

/// Handler for GET /api/v1/roles
///
/// Requires admin. Returns the role catalog, highest privilege first.
pub async fn list_roles(state: web::Data<AppState>) -> HttpResponse {
    match state.role_service.list_roles().await {
        Ok(roles) => HttpResponse::Ok().json(roles),
        Err(error) => handle_domain_error(&error),
    }
}
