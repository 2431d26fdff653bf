use thiserror::Error;

/// Failures produced by the tutor pipelines.
///
/// Authentication failures are not errors: `CredentialStore::authenticate`
/// answers with a plain `bool` and handlers shape the payload themselves.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("error de red al descargar {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("PDF no encontrado: {status} en {url}")]
    HttpStatus { status: u16, url: String },

    #[error("PDF inválido: {0}")]
    Parse(String),

    #[error("{0}")]
    Completion(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("URL inválida: {0}")]
    InvalidUrl(String),

    #[error("configuración inválida: {0}")]
    Config(String),
}

pub type TutorResult<T> = Result<T, TutorError>;

impl From<lopdf::Error> for TutorError {
    fn from(err: lopdf::Error) -> Self {
        TutorError::Parse(err.to_string())
    }
}
