//! Integration tests for user and role administration endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use urm_api::create_app;

use common::{bearer, signed_in, test_state, PASSWORD};

fn super_admin_body(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.org", username),
        "name": "Root",
        "surname": "Admin",
        "password": PASSWORD,
    })
}

#[actix_web::test]
async fn test_super_admin_bootstrap_happens_once() {
    let app = test::init_service(create_app(test_state().await)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/init/superadmin")
        .set_json(super_admin_body("root"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "000000");
    assert_eq!(body["role_id"], "sadmin");
    assert!(body.get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/users/init/superadmin")
        .set_json(super_admin_body("root2"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_creates_and_lists_users() {
    let state = test_state().await;
    let (_, admin_token) = signed_in(&state, "admin", "admin").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(&admin_token))
        .set_json(json!({
            "username": "bob",
            "email": "bob@example.org",
            "name": "Bob",
            "surname": "Builder",
            "password": PASSWORD,
            "role_id": "Student",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["role_id"], "student");
    let bob_id = created["id"].as_str().unwrap().to_string();
    assert_eq!(bob_id.len(), 6);

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&admin_token))
        .to_request();
    let users: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", bob_id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let bob: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bob["username"], "bob");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/by-username/bob")
        .insert_header(bearer(&admin_token))
        .to_request();
    let bob: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bob["id"], bob_id.as_str());

    let req = test::TestRequest::get()
        .uri("/api/v1/users/by-username/nobody")
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_duplicate_username_is_rejected() {
    let state = test_state().await;
    let (_, admin_token) = signed_in(&state, "admin", "admin").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(bearer(&admin_token))
        .set_json(json!({
            "username": "admin",
            "email": "other@example.org",
            "name": "Other",
            "surname": "Admin",
            "password": PASSWORD,
            "role_id": "teach",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[actix_web::test]
async fn test_student_is_forbidden_on_admin_routes() {
    let state = test_state().await;
    let (_, token) = signed_in(&state, "carol", "student").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");

    let req = test::TestRequest::get()
        .uri("/api/v1/roles")
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn test_missing_or_garbage_token_is_401() {
    let app = test::init_service(create_app(test_state().await)).await;

    let req = test::TestRequest::get().uri("/api/v1/users").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(bearer("garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_INVALID");
}

#[actix_web::test]
async fn test_profile_read_and_update() {
    let state = test_state().await;
    let (user_id, token) = signed_in(&state, "dave", "teach").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(bearer(&token))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["id"], user_id.as_str());
    assert_eq!(profile["role_id"], "teach");
    assert!(!profile["last_login_at"].is_null());

    let req = test::TestRequest::put()
        .uri("/api/v1/users/profile")
        .insert_header(bearer(&token))
        .set_json(json!({
            "username": "dave",
            "email": "dave@school.example.org",
            "name": "David",
            "surname": "Teacher",
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["email"], "dave@school.example.org");
    assert_eq!(updated["name"], "David");
    assert_eq!(updated["role_id"], "teach");
}

#[actix_web::test]
async fn test_change_password() {
    let state = test_state().await;
    let (_, token) = signed_in(&state, "erin", "student").await;
    let app = test::init_service(create_app(state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/users/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({ "old_password": "wrong", "new_password": "fresh secret" }))
        .to_request();
    let changed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(changed, json!(false));

    let req = test::TestRequest::put()
        .uri("/api/v1/users/change-password")
        .insert_header(bearer(&token))
        .set_json(json!({ "old_password": PASSWORD, "new_password": "fresh secret" }))
        .to_request();
    let changed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(changed, json!(true));

    assert!(state.auth_service.login("erin", PASSWORD).await.is_err());
    assert!(state.auth_service.login("erin", "fresh secret").await.is_ok());
}

#[actix_web::test]
async fn test_assign_role() {
    let state = test_state().await;
    let (_, admin_token) = signed_in(&state, "admin", "admin").await;
    let (student_id, _) = signed_in(&state, "frank", "student").await;
    let app = test::init_service(create_app(state.clone())).await;

    let uri = format!("/api/v1/users/{}/roles", student_id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "role_id": "teach" }))
        .to_request();
    let assigned: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(assigned, json!(true));

    // Same role again is a no-op
    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "role_id": "teach" }))
        .to_request();
    let assigned: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(assigned, json!(false));

    let user = state.user_service.find_by_id(&student_id).await.unwrap();
    assert_eq!(user.role_id, "teach");

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "role_id": "janitor" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/users/999999/roles")
        .insert_header(bearer(&admin_token))
        .set_json(json!({ "role_id": "teach" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_delete_user() {
    let state = test_state().await;
    let (admin_id, admin_token) = signed_in(&state, "admin", "admin").await;
    let (student_id, _) = signed_in(&state, "gina", "student").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", admin_id))
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/users/{}", student_id))
        .insert_header(bearer(&admin_token))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted, json!(true));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/users/{}", student_id))
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_roles_listed_highest_first() {
    let state = test_state().await;
    let (_, admin_token) = signed_in(&state, "admin", "admin").await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/roles")
        .insert_header(bearer(&admin_token))
        .to_request();
    let roles: Value = test::call_and_read_body_json(&app, req).await;
    let ids: Vec<&str> = roles
        .as_array()
        .unwrap()
        .iter()
        .map(|role| role["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sadmin", "admin", "teach", "student"]);
}

#[actix_web::test]
async fn test_unknown_route_is_404() {
    let app = test::init_service(create_app(test_state().await)).await;

    let req = test::TestRequest::get().uri("/api/v2/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
