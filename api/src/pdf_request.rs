use serde::Deserialize;
use tutor_system::proxy_service::{DEFAULT_FOLDER, DEFAULT_MAX_CHARS};

#[derive(Debug, Deserialize)]
pub struct BuscarPdfRequest {
    pub archivo: String,
    #[serde(default = "default_folder")]
    pub carpeta: String,
    #[serde(default = "default_max_chars")]
    pub max_caracteres: usize,
}

#[derive(Debug, Deserialize)]
pub struct ArchivosQuery {
    pub carpeta: Option<String>,
}

impl ArchivosQuery {
    pub fn folder(&self) -> &str {
        self.carpeta
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_FOLDER)
    }
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}
