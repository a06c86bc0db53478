//! User administration and profile route handlers

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::{
    ChangePasswordRequest, CreateUserRequest, RoleAssignmentRequest, SuperAdminRequest,
    UpdateUserRequest,
};
use crate::handlers::{handle_domain_error, handle_validation_error};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/users/init/superadmin
///
/// Unauthenticated bootstrap of the super administrator (id `000000`).
///
/// ## Errors
/// - 400 Bad Request: Invalid body or username taken
/// - 403 Forbidden: A super administrator already exists
pub async fn create_super_admin(
    state: web::Data<AppState>,
    request: web::Json<SuperAdminRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .user_service
        .create_super_admin_if_absent(request.into_inner().into())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(user.profile()),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST /api/v1/users (admin)
///
/// ## Errors
/// - 400 Bad Request: Invalid body or username taken
/// - 403 Forbidden: Caller is not an admin, or the role is `sadmin`
pub async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state.auth_service.register(request.into_inner().into()).await {
        Ok(user) => HttpResponse::Ok().json(user.profile()),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/users (admin)
pub async fn list_users(state: web::Data<AppState>) -> HttpResponse {
    match state.user_service.list_users().await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/users/{id} (admin)
pub async fn get_user(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    match state.user_service.find_by_id(&path).await {
        Ok(user) => HttpResponse::Ok().json(user.profile()),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/users/by-username/{username} (admin)
pub async fn get_user_by_username(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    match state.user_service.find_by_username(&path).await {
        Ok(user) => HttpResponse::Ok().json(user.profile()),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/users/{id} (admin)
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .user_service
        .update_user(&path, request.into_inner().into())
        .await
    {
        Ok(user) => HttpResponse::Ok().json(user.profile()),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for DELETE /api/v1/users/{id} (admin)
///
/// Responds with `true` when a user was deleted and `false` when none
/// existed. Admins cannot delete themselves (400).
pub async fn delete_user(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<String>,
) -> HttpResponse {
    match state.user_service.delete_user(&auth.user_id, &path).await {
        Ok(deleted) => HttpResponse::Ok().json(deleted),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/v1/users/profile
pub async fn get_profile(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.user_service.get_profile(&auth.token).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/users/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .user_service
        .update_profile(&auth.token, request.into_inner().into())
        .await
    {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/v1/users/change-password
///
/// Responds with `false` when the current password is wrong.
pub async fn change_password(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state
        .user_service
        .change_password(&auth.token, &request.old_password, &request.new_password)
        .await
    {
        Ok(changed) => HttpResponse::Ok().json(changed),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for POST and PUT /api/v1/users/{id}/roles (admin)
///
/// Responds with `false` when the user already holds the role.
pub async fn assign_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<RoleAssignmentRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return handle_validation_error(&errors);
    }

    match state.role_service.assign_role(&path, &request.role_id).await {
        Ok(assigned) => HttpResponse::Ok().json(assigned),
        Err(error) => handle_domain_error(&error),
    }
}
