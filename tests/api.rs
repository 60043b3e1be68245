//! End-to-end tests of the router over the in-memory store.

use axum::{
    body::Body,
    http::{
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE, ORIGIN},
        Method, Request, StatusCode,
    },
    routing::get,
    Router,
};
use clinic_api::{app, clinic_routes, with_middleware, AppState, MemoryStore};
use serde_json::{json, Value};
use tower::ServiceExt;

const BODY_LIMIT: usize = 64 * 1024;

fn test_app() -> Router {
    app(AppState::new(MemoryStore::new()), BODY_LIMIT)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn add_patient(app: &Router, first: &str, last: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/patients",
        json!({ "first_name": first, "last_name": last, "age": 33, "phone": "0599000000" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["patient_id"].as_i64().unwrap()
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn create_patient_assigns_fresh_ids() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/patients",
        json!({ "first_name": "Ali", "last_name": "Hassan", "age": "41", "phone": "0599123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["first_name"], "Ali");
    assert_eq!(body["age"], 41);
    assert!(body["created_at"].is_string());

    let first = body["patient_id"].as_i64().unwrap();
    let second = add_patient(&app, "Sara", "Ali").await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn create_patient_with_missing_field_is_rejected_without_insert() {
    let app = test_app();
    let full = json!({ "first_name": "Ali", "last_name": "Hassan", "age": 41, "phone": "0599" });
    for field in ["first_name", "last_name", "age", "phone"] {
        let mut body = full.clone();
        body.as_object_mut().unwrap().remove(field);
        let (status, body) = post_json(&app, "/patients", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "missing {}", field);
        assert!(body["error"].is_string());
    }
    let (_, list) = get_json(&app, "/patients").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn non_numeric_age_is_a_client_error() {
    let app = test_app();
    let (status, body) = post_json(
        &app,
        "/patients",
        json!({ "first_name": "Ali", "last_name": "Hassan", "age": "old", "phone": "0599" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "age must be an integer");
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/patients")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_patient_is_404_with_message() {
    let app = test_app();
    let (status, body) = get_json(&app, "/patients/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Patient not found" }));
}

#[tokio::test]
async fn non_integer_id_is_a_client_error() {
    let app = test_app();
    let (status, body) = get_json(&app, "/patients/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid id");
}

#[tokio::test]
async fn deleted_patient_is_gone() {
    let app = test_app();
    let id = add_patient(&app, "Ali", "Hassan").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/patients/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Patient deleted successfully");
    assert_eq!(body["deletedPatient"]["patient_id"], id);

    let (status, _) = get_json(&app, &format!("/patients/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, &format!("/patients/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = test_app();
    let a = add_patient(&app, "Ali", "Hassan").await;
    let b = add_patient(&app, "Sara", "Ali").await;
    let (status, body) = get_json(&app, "/patients").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["patient_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![b, a]);
}

#[tokio::test]
async fn search_is_case_insensitive_over_both_names() {
    let app = test_app();
    add_patient(&app, "Ali", "Hassan").await;
    add_patient(&app, "Sara", "Ali").await;
    add_patient(&app, "Omar", "Khaled").await;

    let (status, body) = get_json(&app, "/patients/search/ali").await;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<String> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| format!("{} {}", p["first_name"].as_str().unwrap(), p["last_name"].as_str().unwrap()))
        .collect();
    names.sort();
    assert_eq!(names, vec!["Ali Hassan", "Sara Ali"]);

    let (_, body) = get_json(&app, "/patients/search/KHAL").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = test_app();
    let id = add_patient(&app, "Ali", "Hassan").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/patients/{}", id),
        Some(json!({ "first_name": "Ali", "last_name": "Hassan", "age": 34, "phone": "0599999999" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 34);
    assert_eq!(body["phone"], "0599999999");
    assert_eq!(body["patient_id"], id);
}

#[tokio::test]
async fn partial_update_reaches_the_store_and_fails_there() {
    let app = test_app();
    let id = add_patient(&app, "Ali", "Hassan").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/patients/{}", id),
        Some(json!({ "first_name": "Ali" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server Error");
    assert!(body["details"].as_str().unwrap().contains("not-null"));
}

#[tokio::test]
async fn update_of_unknown_patient_is_404() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/patients/42",
        Some(json!({ "first_name": "A", "last_name": "B", "age": 1, "phone": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Patient not found");
}

#[tokio::test]
async fn doctor_requires_both_names_and_defaults_specialty() {
    let app = test_app();
    let (status, body) = post_json(&app, "/doctors", json!({ "first_name": "Sara" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) =
        post_json(&app, "/doctors", json!({ "first_name": "Sara", "last_name": "Ali" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["specialty"], clinic_api::model::DEFAULT_SPECIALTY);
    assert_eq!(body["phone"], Value::Null);

    let (_, list) = get_json(&app, "/doctors").await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn todays_appointments_join_names() {
    let app = test_app();
    get_json(&app, "/setup-db").await;
    let patient = add_patient(&app, "Ali", "Hassan").await;

    let (status, created) = post_json(
        &app,
        "/appointments",
        json!({ "patient_id": patient, "doctor_id": 1, "appointment_date": today() }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "scheduled");
    post_json(
        &app,
        "/appointments",
        json!({ "patient_id": patient, "doctor_id": 2, "appointment_date": "2000-01-01" }),
    )
    .await;

    let (status, body) = get_json(&app, "/appointments/today").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["patient_first"], "Ali");
    assert_eq!(rows[0]["patient_last"], "Hassan");
    assert_eq!(rows[0]["doctor_first"], "Ahmed");
    assert_eq!(rows[0]["appointment_date"], today());
}

#[tokio::test]
async fn appointment_with_unknown_doctor_is_a_store_error() {
    let app = test_app();
    let patient = add_patient(&app, "Ali", "Hassan").await;
    let (status, body) = post_json(
        &app,
        "/appointments",
        json!({ "patient_id": patient, "doctor_id": 77, "appointment_date": today() }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server Error");
}

#[tokio::test]
async fn stats_match_row_counts() {
    let app = test_app();
    let (status, body) = get_json(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "totalPatients": 0, "appointmentsToday": 0, "availableDoctors": 0 })
    );

    get_json(&app, "/setup-db").await;
    let patient = add_patient(&app, "Ali", "Hassan").await;
    post_json(
        &app,
        "/appointments",
        json!({ "patient_id": patient, "doctor_id": 3, "appointment_date": today() }),
    )
    .await;

    let (_, body) = get_json(&app, "/stats").await;
    assert_eq!(
        body,
        json!({ "totalPatients": 4, "appointmentsToday": 1, "availableDoctors": 3 })
    );
}

#[tokio::test]
async fn setup_is_idempotent() {
    let app = test_app();
    let (status, body) = get_json(&app, "/setup-db").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
    let (status, _) = get_json(&app, "/setup-db").await;
    assert_eq!(status, StatusCode::OK);

    let (_, patients) = get_json(&app, "/patients").await;
    let (_, doctors) = get_json(&app, "/doctors").await;
    assert_eq!(patients.as_array().unwrap().len(), 3);
    assert_eq!(doctors.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn setup_only_seeds_empty_tables() {
    let app = test_app();
    add_patient(&app, "Ali", "Hassan").await;
    get_json(&app, "/setup-db").await;
    let (_, patients) = get_json(&app, "/patients").await;
    let (_, doctors) = get_json(&app, "/doctors").await;
    assert_eq!(patients.as_array().unwrap().len(), 1);
    assert_eq!(doctors.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn health_answers_without_the_store() {
    let app = app(AppState::new(MemoryStore::unreachable()), BODY_LIMIT);
    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["status"].is_string());
    assert!(body["timestamp"].is_string());

    let (status, body) = get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn store_failures_are_500_with_details() {
    let app = app(AppState::new(MemoryStore::unreachable()), BODY_LIMIT);
    for uri in ["/patients", "/doctors", "/appointments/today", "/stats", "/patients/1"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{}", uri);
        assert_eq!(body["error"], "Server Error");
        assert!(body["details"].is_string());
    }
    let (status, body) = get_json(&app, "/setup-db").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database setup failed");
}

#[tokio::test]
async fn ready_reports_ok_when_store_answers() {
    let app = test_app();
    let (status, body) = get_json(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": "ok" }));
}

#[tokio::test]
async fn version_reports_crate_metadata() {
    let app = test_app();
    let (status, body) = get_json(&app, "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "clinic-api");
}

#[tokio::test]
async fn unmatched_route_names_the_path() {
    let app = test_app();
    let (status, body) = get_json(&app, "/nurses/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found", "path": "/nurses/3" }));
}

async fn boom() -> &'static str {
    panic!("boom")
}

#[tokio::test]
async fn handler_panic_becomes_generic_500() {
    let routes = clinic_routes(AppState::new(MemoryStore::new())).route("/boom", get(boom));
    let app = with_middleware(routes, BODY_LIMIT);
    let (status, body) = get_json(&app, "/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(!body.to_string().contains("boom"));

    let (status, _) = get_json(&app, "/doctors").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn wrong_method_on_known_path_is_json_404() {
    let app = test_app();
    let (status, body) = send(&app, Method::DELETE, "/doctors", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Route not found", "path": "/doctors" }));

    let (status, body) = send(&app, Method::POST, "/health", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/health");

    let (status, body) = send(&app, Method::PATCH, "/patients/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["path"], "/patients/1");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/patients")
        .header(ORIGIN, "http://localhost:3000")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));

    let request = Request::builder()
        .uri("/health")
        .header(ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn oversized_body_is_json_413() {
    let app = app(AppState::new(MemoryStore::new()), 64);
    let (status, body) = post_json(
        &app,
        "/patients",
        json!({ "first_name": "A".repeat(200), "last_name": "Hassan", "age": 30, "phone": "0599" }),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"].is_string());

    let (_, list) = get_json(&app, "/patients").await;
    assert_eq!(list, json!([]));
}
