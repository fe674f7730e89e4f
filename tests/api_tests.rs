//! HTTP API tests
//!
//! Requests go straight through the router with `tower::ServiceExt::oneshot`;
//! no socket is bound.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use quoteforge::api::build_router;
use quoteforge::api::server::AppState;
use quoteforge::delivery::XLSX_MIME;
use quoteforge::excel::{QuotationInspector, TemplateGenerator};
use quoteforge::layout::{CellRef, TemplateLayout};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

fn app(template: PathBuf) -> Router {
    build_router(Arc::new(AppState::new(template)))
}

/// Router whose default template is a freshly generated one
fn app_with_template(layout: TemplateLayout) -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("template.xlsx");
    TemplateGenerator::new(layout).generate(&path).unwrap();
    let router = app(path);
    (temp_dir, router)
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn cell(address: &str) -> CellRef {
    CellRef::parse(address).unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// INFO ENDPOINTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_health() {
    let response = app(PathBuf::from("template.xlsx"))
        .oneshot(get("/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_version_lists_layouts() {
    let response = app(PathBuf::from("template.xlsx"))
        .oneshot(get("/version"))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["data"]["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["data"]["layouts"][1], "cost-margin");
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let response = app(PathBuf::from("template.xlsx"))
        .oneshot(get("/"))
        .await
        .unwrap();

    let json = body_json(response).await;
    let paths: Vec<&str> = json["data"]["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/api/v1/render/upload"));
}

#[tokio::test]
async fn test_builtin_layout_endpoint() {
    let response = app(PathBuf::from("template.xlsx"))
        .oneshot(get("/api/v1/layouts/cost-margin"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "cost_margin");
    assert_eq!(json["data"]["totals"]["grand_total"], "F31");
}

#[tokio::test]
async fn test_unknown_layout_endpoint() {
    let response = app(PathBuf::from("template.xlsx"))
        .oneshot(get("/api/v1/layouts/fancy"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "layout");
}

// ═══════════════════════════════════════════════════════════════════════════
// JSON RENDER
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_render_returns_workbook() {
    let (_dir, router) = app_with_template(TemplateLayout::simple());
    let request = post_json(
        "/api/v1/render",
        serde_json::json!({
            "quotation": {
                "customer": {"name": "Cadex", "quotation_date": "2026-10-16"},
                "items": [
                    {"brand": "DELL", "model": "T2", "quantity": 1, "unit_price": 100},
                    {"brand": "HP", "model": "Z2", "quantity": 2, "unit_price": 50}
                ]
            }
        }),
    );

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_MIME);

    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("quotation_Cadex_"));

    let sheet = QuotationInspector::from_bytes(body_bytes(response).await).unwrap();
    assert_eq!(sheet.text(cell("B12")), "Cadex");
    assert_eq!(sheet.number(cell("F21")), Some(100.0));
    assert_eq!(sheet.number(cell("F22")), Some(100.0));
}

#[tokio::test]
async fn test_render_unicode_file_name() {
    let (_dir, router) = app_with_template(TemplateLayout::simple());
    let request = post_json(
        "/api/v1/render",
        serde_json::json!({"quotation": {"customer": {"name": "凱德科技"}}}),
    );

    let response = router.oneshot(request).await.unwrap();
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("filename*=UTF-8''quotation_%E5%87%B1"));
}

#[tokio::test]
async fn test_render_cost_margin() {
    let (_dir, router) = app_with_template(TemplateLayout::cost_margin());
    let request = post_json(
        "/api/v1/render",
        serde_json::json!({
            "layout": "cost-margin",
            "quotation": {
                "customer": {"name": "Cadex"},
                "salesperson": {"name": "Alice"},
                "items": [
                    {"brand": "DELL", "model": "T2", "quantity": 1, "unit_price": 31000, "unit_cost": 22500},
                    {"brand": "Service", "model": "NBD", "quantity": 1, "unit_price": 0, "unit_cost": 2600}
                ]
            }
        }),
    );

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sheet = QuotationInspector::from_bytes(body_bytes(response).await).unwrap();
    assert_eq!(sheet.text(cell("B38")), "Alice");
    assert_eq!(sheet.number(cell("F31")), Some(32550.0));
    assert_eq!(sheet.number(cell("H30")), Some(5900.0));
}

#[tokio::test]
async fn test_render_missing_template_is_404() {
    let temp_dir = TempDir::new().unwrap();
    let router = app(temp_dir.path().join("template.xlsx"));
    let request = post_json(
        "/api/v1/render",
        serde_json::json!({"quotation": {"customer": {"name": "Cadex"}}}),
    );

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["data"]["kind"], "io");
}

#[tokio::test]
async fn test_render_unknown_layout_is_400() {
    let (_dir, router) = app_with_template(TemplateLayout::simple());
    let request = post_json(
        "/api/v1/render",
        serde_json::json!({"layout": "fancy", "quotation": {}}),
    );

    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["data"]["kind"], "layout");
}

#[tokio::test]
async fn test_render_malformed_template_is_422() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("template.xlsx");
    std::fs::write(&path, b"not a workbook").unwrap();

    let request = post_json("/api/v1/render", serde_json::json!({"quotation": {}}));
    let response = app(path).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["data"]["kind"], "malformed_template");
}

#[tokio::test]
async fn test_render_layout_path_is_not_read() {
    let (dir, router) = app_with_template(TemplateLayout::simple());
    let secret = dir.path().join("secret.txt");
    std::fs::write(&secret, "db-password-hunter2\n").unwrap();

    let request = post_json(
        "/api/v1/render",
        serde_json::json!({"layout": secret.to_str().unwrap(), "quotation": {}}),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"]["kind"], "layout");
    assert!(!body.contains("hunter2"));
}

#[tokio::test]
async fn test_render_template_path_outside_template_dir_rejected() {
    let (dir, router) = app_with_template(TemplateLayout::simple());
    let outside = dir.path().join("..").join("elsewhere.xlsx");

    for template_path in [outside.to_str().unwrap(), "../template.xlsx"] {
        let request = post_json(
            "/api/v1/render",
            serde_json::json!({"template_path": template_path, "quotation": {}}),
        );
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["data"]["kind"], "invalid_data");
    }
}

#[tokio::test]
async fn test_render_named_template_in_template_dir() {
    let (dir, router) = app_with_template(TemplateLayout::simple());
    TemplateGenerator::new(TemplateLayout::cost_margin())
        .generate(&dir.path().join("cost.xlsx"))
        .unwrap();

    let request = post_json(
        "/api/v1/render",
        serde_json::json!({
            "layout": "cost-margin",
            "template_path": "cost.xlsx",
            "quotation": {"customer": {"name": "Cadex"}}
        }),
    );
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let sheet = QuotationInspector::from_bytes(body_bytes(response).await).unwrap();
    assert_eq!(sheet.text(cell("B9")), "Cadex");
}

// ═══════════════════════════════════════════════════════════════════════════
// MULTIPART UPLOAD
// ═══════════════════════════════════════════════════════════════════════════

const BOUNDARY: &str = "quoteforge-test-boundary";

fn multipart_body(template: Option<&[u8]>, quotation: &str, layout: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    if let Some(bytes) = template {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"template\"; filename=\"template.xlsx\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, XLSX_MIME
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"quotation\"\r\n\r\n{}\r\n",
            BOUNDARY, quotation
        )
        .as_bytes(),
    );
    if let Some(name) = layout {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"layout\"\r\n\r\n{}\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn post_multipart(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/render/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_renders_with_uploaded_template() {
    let template = TemplateGenerator::new(TemplateLayout::cost_margin())
        .to_bytes()
        .unwrap();
    let quotation = "customer:\n  name: Cadex\nitems:\n  - {brand: DELL, model: T2, quantity: 2, unit_price: 10, unit_cost: 4}\n";

    // The server default does not exist; only the upload can satisfy the request
    let router = app(PathBuf::from("/nonexistent/template.xlsx"));
    let body = multipart_body(Some(&template), quotation, Some("cost-margin"));
    let response = router.oneshot(post_multipart(body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], XLSX_MIME);

    let sheet = QuotationInspector::from_bytes(body_bytes(response).await).unwrap();
    assert_eq!(sheet.text(cell("B9")), "Cadex");
    assert_eq!(sheet.number(cell("F20")), Some(20.0));
    assert_eq!(sheet.number(cell("H29")), Some(8.0));
}

#[tokio::test]
async fn test_upload_without_template_uses_default() {
    let (_dir, router) = app_with_template(TemplateLayout::simple());
    let body = multipart_body(None, r#"{"customer": {"name": "Cadex"}}"#, None);

    let response = router.oneshot(post_multipart(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_upload_invalid_quotation_is_400() {
    let (_dir, router) = app_with_template(TemplateLayout::simple());
    let body = multipart_body(None, "items: [unterminated", None);

    let response = router.oneshot(post_multipart(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["data"]["kind"], "order");
}

#[tokio::test]
async fn test_upload_garbage_template_is_422() {
    let (_dir, router) = app_with_template(TemplateLayout::simple());
    let body = multipart_body(Some(b"not a workbook"), "customer: {name: Cadex}", None);

    let response = router.oneshot(post_multipart(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
