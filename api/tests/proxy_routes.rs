mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ayuni_api::{proxy_router, ProxyState};
use common::{build_pdf, post_json, send, serve};
use serde_json::json;
use std::time::Duration;
use tutor_system::proxy_service::known_files;
use tutor_system::ProxyService;

async fn app() -> Router {
    let tunnel = Router::new()
        .route("/", get(|| async { "ok" }))
        .route(
            "/fisica_api/tipler.pdf",
            get(|| async { build_pdf(&["Vectores", "Cinemática"]).into_response() }),
        )
        .route(
            "/civil_api/hibbeler.pdf",
            get(|| async { build_pdf(&["Estática", "Fuerzas", "Momentos", "Armaduras"]).into_response() }),
        )
        .route(
            "/fisica_api/",
            get(|| async { Json(json!(["tipler.pdf", "sears.pdf"])) }),
        );
    let base = serve(tunnel).await;
    proxy_router(ProxyState::new(
        ProxyService::new(base, Duration::from_secs(5)).unwrap(),
    ))
}

#[tokio::test]
async fn buscar_pdf_uses_default_folder() {
    let (status, body) = send(app().await, post_json("/buscar-pdf", json!({"archivo": "tipler.pdf"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["archivo"], "tipler.pdf");
    assert_eq!(body["paginas"], 2);
    assert!(body["contenido"].as_str().unwrap().contains("--- Página 2 ---"));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn buscar_pdf_honors_folder_and_budget() {
    let request = post_json(
        "/buscar-pdf",
        json!({"archivo": "hibbeler.pdf", "carpeta": "civil_api", "max_caracteres": 25}),
    );
    let (_, body) = send(app().await, request).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["paginas"], 4);
    assert!(body["contenido"].as_str().unwrap().chars().count() <= 25);
}

#[tokio::test]
async fn buscar_pdf_reports_missing_file() {
    let (status, body) = send(app().await, post_json("/buscar-pdf", json!({"archivo": "nada.pdf"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["paginas"], 0);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("PDF no encontrado: 404"));
}

#[tokio::test]
async fn buscar_pdf_rejects_blank_name() {
    let (status, body) = send(app().await, post_json("/buscar-pdf", json!({"archivo": " "}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn buscar_pdf_requires_archivo() {
    let (status, _) = send(app().await, post_json("/buscar-pdf", json!({"carpeta": "civil_api"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn archivos_disponibles_reads_remote_listing() {
    let (status, body) = send(app().await, common::get("/archivos-disponibles")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["carpeta"], "fisica_api");
    assert_eq!(body["fuente"], "remoto");
    assert_eq!(body["archivos"], json!(["tipler.pdf", "sears.pdf"]));
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn archivos_disponibles_falls_back_to_table() {
    let (_, body) = send(app().await, common::get("/archivos-disponibles?carpeta=civil_api")).await;
    assert_eq!(body["carpeta"], "civil_api");
    assert_eq!(body["fuente"], "local");
    assert_eq!(body["archivos"], json!(known_files("civil_api")));
}

#[tokio::test]
async fn test_ngrok_reports_online() {
    let (status, body) = send(app().await, common::get("/test-ngrok")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estado"], "online");
    assert_eq!(body["status_code"], 200);
}

#[tokio::test]
async fn test_ngrok_reports_unreachable_tunnel() {
    let app = proxy_router(ProxyState::new(
        ProxyService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap(),
    ));
    let (_, body) = send(app, common::get("/test-ngrok")).await;
    assert_eq!(body["estado"], "error");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn root_points_at_the_tunnel() {
    let (_, body) = send(app().await, common::get("/")).await;
    assert!(body["ngrok_url"].as_str().unwrap().starts_with("http://127.0.0.1:"));
    assert_eq!(body["endpoints"]["buscar_pdf"], "POST /buscar-pdf");
}
