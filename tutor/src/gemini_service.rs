use crate::config::Settings;
use crate::error::{TutorError, TutorResult};
use crate::models::*;
use reqwest::Client;
use std::fmt;

pub const NO_ANSWER: &str = "No se generó respuesta";

/// Single-shot text generation against the Gemini REST API.
///
/// [`complete`](Self::complete) never fails: any problem is reported back as the
/// answer text itself.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl fmt::Debug for GeminiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiService")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl GeminiService {
    pub fn new(api_key: Option<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.gemini_api_key.clone(),
            settings.gemini_model.clone(),
            settings.gemini_base_url.clone(),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn complete(&self, context: &str, question: &str, user: &str) -> String {
        log::info!("Asking Gemini ({}) on behalf of {}", self.model, user);
        match self.generate(&build_prompt(context, question, user)).await {
            Ok(answer) => {
                log::info!("Gemini answered with {} characters", answer.chars().count());
                answer
            }
            Err(e) => {
                log::error!("Gemini request failed: {}", e);
                format!("❌ Error en Gemini: {e}")
            }
        }
    }

    pub async fn generate(&self, prompt: &str) -> TutorResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TutorError::Completion("GEMINI_API_KEY no está configurada".to_string()))?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: 0.3,
                max_output_tokens: 2048,
            }),
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TutorError::Completion(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TutorError::Completion(format!(
                "la API respondió {status}: {error_text}"
            )));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| TutorError::Completion(format!("respuesta ilegible: {}", e.without_url())))?;

        let answer = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_ANSWER.to_string());

        Ok(answer)
    }
}

pub fn build_prompt(context: &str, question: &str, user: &str) -> String {
    format!(
        r#"Eres el "Profesor Ayuni", un mentor virtual especializado en ingeniería mecánico-eléctrica.

CONTENIDO DEL LIBRO DE CONSULTA:
{context}

PREGUNTA DEL ESTUDIANTE {user}:
{question}

Por favor responde:
- De manera pedagógica pero técnica
- Basándote en el contenido del libro proporcionado
- Con ejemplos prácticos cuando sea posible
- En español claro y profesional
- Citando conceptos específicos del libro cuando sea relevante

Si la información no está en el libro, sé honesto y sugiere dónde podría encontrarse."#
    )
}
