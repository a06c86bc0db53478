//! Application factory
//!
//! Builds the Actix-web application with all routes and middleware.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;
use urm_core::domain::RoleLevel;
use urm_shared::{error_codes, ErrorResponse};

use crate::middleware::RequireRole;
use crate::routes::{auth, health, roles, users};
use crate::state::AppState;

/// Create and configure the application
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let authenticated = RequireRole::authenticated(app_state.guard.clone());
    let admin = RequireRole::new(app_state.guard.clone(), RoleLevel::Admin);

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        // Health check endpoint
        .route("/health", web::get().to(health::health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/login", web::post().to(auth::login))
                        .route("/logout", web::post().to(auth::logout))
                        .route("/refresh-token", web::post().to(auth::refresh_token))
                        .route("/validate", web::get().to(auth::validate)),
                )
                .service(
                    web::resource("/roles")
                        .wrap(admin.clone())
                        .route(web::get().to(roles::list_roles)),
                )
                .service(
                    web::scope("/users")
                        .route("/init/superadmin", web::post().to(users::create_super_admin))
                        .service(
                            web::resource("/profile")
                                .wrap(authenticated.clone())
                                .route(web::get().to(users::get_profile))
                                .route(web::put().to(users::update_profile)),
                        )
                        .service(
                            web::resource("/change-password")
                                .wrap(authenticated)
                                .route(web::put().to(users::change_password)),
                        )
                        .service(
                            web::resource("")
                                .wrap(admin.clone())
                                .route(web::post().to(users::create_user))
                                .route(web::get().to(users::list_users)),
                        )
                        .service(
                            web::resource("/by-username/{username}")
                                .wrap(admin.clone())
                                .route(web::get().to(users::get_user_by_username)),
                        )
                        .service(
                            web::resource("/{id}/roles")
                                .wrap(admin.clone())
                                .route(web::post().to(users::assign_role))
                                .route(web::put().to(users::assign_role)),
                        )
                        .service(
                            web::resource("/{id}")
                                .wrap(admin)
                                .route(web::get().to(users::get_user))
                                .route(web::put().to(users::update_user))
                                .route(web::delete().to(users::delete_user)),
                        ),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(|| async {
            HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::NOT_FOUND,
                "The requested resource was not found",
            ))
        }))
}
