//! Shared fixtures for the HTTP tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use urm_api::AppState;
use urm_core::domain::NewUser;
use urm_core::services::{BcryptPasswordHasher, KeyProvider, TokenServiceConfig};

pub const PRIMARY_PRIVATE_KEY: &str = include_str!("../../../testdata/keys/primary_private.b64");
pub const PRIMARY_PUBLIC_KEY: &str = include_str!("../../../testdata/keys/primary_public.b64");

pub const PASSWORD: &str = "correct horse";

/// Application state over the test key pair, with the role catalog seeded
pub async fn test_state() -> web::Data<AppState> {
    let keys = Arc::new(KeyProvider::new(PRIMARY_PRIVATE_KEY, PRIMARY_PUBLIC_KEY));
    let state = AppState::new(
        keys,
        TokenServiceConfig::default(),
        BcryptPasswordHasher::new(4),
    )
    .expect("valid state");
    state.initialize().await.expect("roles seeded");
    web::Data::new(state)
}

pub fn new_user(username: &str, role_id: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{}@example.org", username),
        name: "Test".to_string(),
        surname: "User".to_string(),
        password: PASSWORD.to_string(),
        role_id: role_id.to_string(),
    }
}

/// Registers a user and returns its id and a session token
pub async fn signed_in(state: &web::Data<AppState>, username: &str, role_id: &str) -> (String, String) {
    let user = state
        .auth_service
        .register(new_user(username, role_id))
        .await
        .expect("registered");
    let issued = state
        .auth_service
        .login(username, PASSWORD)
        .await
        .expect("logged in");
    (user.id, issued.token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
