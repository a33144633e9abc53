use std::sync::Arc;

use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE, X_FRAME_OPTIONS};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use serde_json::{json, Value};

use miniblog::config::AppConfig;
use miniblog::repositories::DataStore;
use miniblog::routes::{build_app, AppState};

fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.password.bcrypt_cost = 4;
    config
}

fn app_state() -> AppState {
    AppState::new(Arc::new(DataStore::in_memory()), &test_config())
}

fn user_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "miniblog1234",
        "nickname": "belm",
        "email": "belm@qq.com",
        "phone": "18888888888"
    })
}

macro_rules! init_app {
    () => {
        test::init_service(build_app(app_state())).await
    };
}

#[actix_web::test]
async fn health_returns_ok_status() {
    let app = init_app!();

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({"status": "OK"}));
}

#[actix_web::test]
async fn create_user_returns_empty_ok() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/v1/users")
        .set_json(user_body("belm"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(test::read_body(res).await.is_empty());
}

#[actix_web::test]
async fn duplicate_username_is_rejected() {
    let app = init_app!();

    let first = test::TestRequest::post()
        .uri("/v1/users")
        .set_json(user_body("belm"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

    let second = test::TestRequest::post()
        .uri("/v1/users")
        .insert_header(("x-request-id", "dup-1"))
        .set_json(user_body("belm"))
        .to_request();
    let res = test::call_service(&app, second).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.headers().get("x-request-id").unwrap(), "dup-1");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({"code": "FailedOperation.UserAlreadyExist", "message": "User already exist."})
    );
}

#[actix_web::test]
async fn empty_username_is_invalid_parameter() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/v1/users")
        .set_json(user_body(""))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "InvalidParameter");
    assert!(body["message"].as_str().unwrap().contains("username"));
}

#[actix_web::test]
async fn malformed_json_is_bind_error() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/v1/users")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().get("x-request-id").is_some());
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        json!({
            "code": "InvalidParameter.BindError",
            "message": "Error occurred while binding the request body to the struct."
        })
    );
}

#[actix_web::test]
async fn json_body_without_content_type_is_accepted() {
    let app = init_app!();

    let req = test::TestRequest::post()
        .uri("/v1/users")
        .set_payload(user_body("belm").to_string())
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(test::read_body(res).await.is_empty());
}

#[actix_web::test]
async fn unknown_route_and_wrong_method_are_not_found() {
    let app = init_app!();

    for req in [
        test::TestRequest::get().uri("/v1/posts").to_request(),
        test::TestRequest::get().uri("/v1/users").to_request(),
    ] {
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"code": "ResourceNotFound.PageNotFound", "message": "Page not found."})
        );
    }
}

#[actix_web::test]
async fn trailing_slash_is_normalized() {
    let app = init_app!();

    let res = test::call_service(&app, test::TestRequest::get().uri("/health/").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn request_id_is_echoed_or_generated() {
    let app = init_app!();

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("X-Request-ID", "client-supplied-1"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.headers().get("x-request-id").unwrap(), "client-supplied-1");

    let res = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;
    let generated = res.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

#[actix_web::test]
async fn every_response_carries_policy_headers() {
    let app = init_app!();

    let res = test::call_service(&app, test::TestRequest::get().uri("/nowhere").to_request()).await;

    assert_eq!(
        res.headers().get(CACHE_CONTROL).unwrap(),
        "no-cache, no-store, max-age=0, must-revalidate, value"
    );
    assert_eq!(res.headers().get(X_FRAME_OPTIONS).unwrap(), "DENY");
    assert_eq!(res.headers().get("x-content-type-options").unwrap(), "nosniff");
}

#[actix_web::test]
async fn preflight_carries_request_id() {
    let app = init_app!();

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/v1/users")
        .insert_header(("Origin", "http://localhost:3000"))
        .insert_header(("Access-Control-Request-Method", "POST"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert!(res.status().is_success());
    assert_eq!(res.headers().get("access-control-allow-origin").unwrap(), "*");
    assert!(res.headers().get("x-request-id").is_some());
}

#[actix_web::test]
async fn routes_can_be_mounted_without_middlewares() {
    let app = test::init_service(
        App::new()
            .app_data(actix_web::web::Data::new(
                miniblog::handlers::users::UserController::new(Arc::new(
                    miniblog::services::BizLayer::new(Arc::new(DataStore::in_memory()), 4),
                )),
            ))
            .configure(miniblog::routes::configure_all_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/v1/users")
        .set_json(user_body("plain"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
}
