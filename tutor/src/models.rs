use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiCandidate {
    pub content: Option<GeminiContent>,
}

/// Outcome of the answer pipeline, before it is shaped into a response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    pub document_label: &'static str,
}

/// Outcome of a proxied PDF lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfContent {
    pub filename: String,
    pub text: String,
    pub page_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingSource {
    Remoto,
    Local,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListing {
    pub folder: String,
    pub files: Vec<String>,
    pub source: ListingSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TunnelStatus {
    Online { status_code: u16 },
    Error { message: String },
}
