//! HTTP-level tests for the query endpoint.
//!
//! Drives the Axum router in-process with `oneshot`; the registry is
//! disabled so every RUC lookup falls back to the sample store.

#![cfg(feature = "server")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sunat_lookup::{server, LookupService, RecordStore, NAME_SEARCH_DISCLAIMER};
use tower::ServiceExt;

async fn get(uri: &str) -> (StatusCode, Value) {
    let app = server::router(LookupService::offline(RecordStore::sample()));

    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn ruc_lookup_returns_record() {
    let (status, body) = get("/api/sunat?type=ruc&value=20131312955").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["ruc"], "20131312955");
    assert_eq!(body["record"]["source"], "sample");
    assert!(body["record"]["refreshedAt"].is_string());
}

#[tokio::test]
async fn short_ruc_is_rejected_with_format_message() {
    let (status, body) = get("/api/sunat?type=ruc&value=123").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].as_str().unwrap().contains("RUC"));
}

#[tokio::test]
async fn unknown_ruc_with_registry_unreachable_is_404() {
    let (status, body) = get("/api/sunat?type=ruc&value=99999999999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().unwrap().contains("SUNAT"));
}

#[tokio::test]
async fn name_search_returns_sample_matches() {
    let (status, body) = get("/api/sunat?type=name&value=superintendencia").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["records"][0]["ruc"], "20131312955");
    assert!(body["records"][0]["razonSocial"]
        .as_str()
        .unwrap()
        .contains("SUPERINTENDENCIA"));
    assert_eq!(body["disclaimer"], NAME_SEARCH_DISCLAIMER);
}

#[tokio::test]
async fn name_search_is_case_insensitive() {
    let (_, lower) = get("/api/sunat?type=name&value=sunat").await;
    let (_, upper) = get("/api/sunat?type=name&value=SUNAT").await;

    assert_eq!(lower["records"], upper["records"]);
    assert_eq!(lower["total"], 1);
}

#[tokio::test]
async fn encoded_name_value_is_trimmed() {
    let (status, body) = get("/api/sunat?type=name&value=%20%20banco%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn missing_params_default_to_ruc_and_require_value() {
    let (status, body) = get("/api/sunat").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "Ingrese un valor de búsqueda.");
}

#[tokio::test]
async fn overlong_name_is_rejected() {
    let uri = format!("/api/sunat?type=name&value={}", "a".repeat(121));
    let (status, body) = get(&uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "El valor ingresado es demasiado largo.");
}

#[tokio::test]
async fn unknown_type_is_rejected() {
    let (status, body) = get("/api/sunat?type=dni&value=12345678").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "Parámetros inválidos.");
}

#[tokio::test]
async fn repeated_value_uses_first_occurrence() {
    let (status, body) = get("/api/sunat?type=ruc&value=20131312955&value=x").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["ruc"], "20131312955");
}

#[tokio::test]
async fn repeated_value_invalid_first_is_json_400() {
    let (status, body) = get("/api/sunat?value=x&value=20131312955").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "Ingresa un RUC válido de 11 dígitos.");
}

#[tokio::test]
async fn repeated_type_uses_first_occurrence() {
    let (status, body) = get("/api/sunat?type=name&type=ruc&value=banco").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn unknown_type_with_missing_value_reports_value() {
    let (status, body) = get("/api/sunat?type=dni").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0], "Ingrese un valor de búsqueda.");
}

#[tokio::test]
async fn health_reports_store_size() {
    let (status, body) = get("/api/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "OK");
    assert_eq!(body["data"]["records"], RecordStore::sample().len());
    assert_eq!(body["data"]["external"], false);
}
