use crate::auth_request::N8nAuthRequest;
use crate::error::ApiError;
use crate::pregunta_request::PreguntaRequest;
use crate::responses::{EstadoResponse, Failure, N8nAuthResponse, PreguntaResponse};
use crate::AnswerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

pub async fn root() -> Json<Value> {
    Json(json!({
        "mensaje": "🚀 Profesor Ayuni - Sistema Autónomo ACTIVO",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "preguntar": "POST /preguntar",
            "n8n_autenticar": "POST /n8n-autenticar",
            "estado": "GET /estado"
        }
    }))
}

pub async fn estado(State(state): State<AnswerState>) -> Json<EstadoResponse> {
    Json(EstadoResponse {
        estado: "🟢 FUNCIONANDO".to_string(),
        gemini_configurado: state.answers.gemini().is_configured(),
        pdfs_configurados: state.answers.library().is_configured(),
        total_usuarios: state.credentials.len(),
    })
}

/// POST /preguntar: authenticate, pick a book, read it, ask Gemini.
pub async fn preguntar(
    State(state): State<AnswerState>,
    payload: Result<Json<PreguntaRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let request_id = Uuid::new_v4();
    log::info!(
        "[{}] Question from {}: {}",
        request_id,
        request.usuario,
        request.pregunta
    );

    if !state.credentials.authenticate(&request.usuario, &request.clave) {
        log::warn!("[{}] Invalid credentials for {}", request_id, request.usuario);
        return Ok(Json(Failure::new("❌ Credenciales inválidas")).into_response());
    }

    match state
        .answers
        .answer(&request.pregunta, &request.usuario)
        .await
    {
        Ok(answer) => {
            log::info!("[{}] Answered from {}", request_id, answer.document_label);
            Ok(Json(PreguntaResponse {
                success: true,
                usuario: request.usuario,
                pregunta: request.pregunta,
                respuesta: answer.answer,
                libro_consultado: answer.document_label.to_string(),
            })
            .into_response())
        }
        Err(e) => {
            log::error!("[{}] Could not read the book: {}", request_id, e);
            Ok(Json(Failure::new(format!("❌ Error procesando PDF: {e}"))).into_response())
        }
    }
}

pub async fn n8n_autenticar(
    State(state): State<AnswerState>,
    payload: Result<Json<N8nAuthRequest>, JsonRejection>,
) -> Result<Json<N8nAuthResponse>, ApiError> {
    let Json(request) = payload?;

    let response = if state.credentials.authenticate(&request.usuario, &request.clave) {
        log::info!("n8n authentication succeeded for {}", request.usuario);
        N8nAuthResponse {
            success: true,
            usuario_id: Some(request.usuario),
            mensaje: "Autenticación exitosa".to_string(),
        }
    } else {
        log::warn!("n8n authentication failed for {}", request.usuario);
        N8nAuthResponse {
            success: false,
            usuario_id: None,
            mensaje: "Credenciales inválidas".to_string(),
        }
    };

    Ok(Json(response))
}
