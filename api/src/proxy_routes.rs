use crate::error::ApiError;
use crate::pdf_request::{ArchivosQuery, BuscarPdfRequest};
use crate::responses::{ArchivosResponse, BuscarPdfResponse, TunnelResponse};
use crate::ProxyState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde_json::{json, Value};
use tutor_system::TunnelStatus;

pub async fn root(State(state): State<ProxyState>) -> Json<Value> {
    Json(json!({
        "mensaje": "📚 Proxy de PDFs - Profesor Ayuni",
        "version": env!("CARGO_PKG_VERSION"),
        "ngrok_url": state.proxy.base_url(),
        "endpoints": {
            "buscar_pdf": "POST /buscar-pdf",
            "archivos_disponibles": "GET /archivos-disponibles?carpeta=",
            "test_ngrok": "GET /test-ngrok"
        }
    }))
}

/// POST /buscar-pdf: fetch a PDF through the tunnel and return its text.
pub async fn buscar_pdf(
    State(state): State<ProxyState>,
    payload: Result<Json<BuscarPdfRequest>, JsonRejection>,
) -> Result<Json<BuscarPdfResponse>, ApiError> {
    let Json(request) = payload?;
    log::info!(
        "PDF requested: {}/{} (max {} chars)",
        request.carpeta,
        request.archivo,
        request.max_caracteres
    );

    let response = match state
        .proxy
        .search_pdf(&request.archivo, &request.carpeta, request.max_caracteres)
        .await
    {
        Ok(content) => {
            log::info!(
                "Served {} ({} pages)",
                content.filename,
                content.page_count
            );
            BuscarPdfResponse::found(content)
        }
        Err(e) => {
            log::warn!("Could not serve {}: {}", request.archivo, e);
            BuscarPdfResponse::failed(request.archivo, e.to_string())
        }
    };

    Ok(Json(response))
}

pub async fn archivos_disponibles(
    State(state): State<ProxyState>,
    query: Result<Query<ArchivosQuery>, QueryRejection>,
) -> Result<Json<ArchivosResponse>, ApiError> {
    let Query(query) = query?;
    let listing = state.proxy.list_files(query.folder()).await;
    Ok(Json(listing.into()))
}

pub async fn test_ngrok(State(state): State<ProxyState>) -> Json<TunnelResponse> {
    let url = state.proxy.base_url().to_string();
    let response = match state.proxy.probe_tunnel().await {
        TunnelStatus::Online { status_code } => TunnelResponse {
            estado: "online".to_string(),
            url,
            status_code: Some(status_code),
            error: None,
        },
        TunnelStatus::Error { message } => {
            log::warn!("Tunnel probe failed: {}", message);
            TunnelResponse {
                estado: "error".to_string(),
                url,
                status_code: None,
                error: Some(message),
            }
        }
    };
    Json(response)
}
