use serde::Serialize;
use tutor_system::{FileListing, ListingSource, PdfContent};

#[derive(Debug, Serialize)]
pub struct Failure {
    pub success: bool,
    pub error: String,
}

impl Failure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreguntaResponse {
    pub success: bool,
    pub usuario: String,
    pub pregunta: String,
    pub respuesta: String,
    pub libro_consultado: String,
}

#[derive(Debug, Serialize)]
pub struct N8nAuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario_id: Option<String>,
    pub mensaje: String,
}

#[derive(Debug, Serialize)]
pub struct EstadoResponse {
    pub estado: String,
    pub gemini_configurado: bool,
    pub pdfs_configurados: bool,
    pub total_usuarios: usize,
}

#[derive(Debug, Serialize)]
pub struct BuscarPdfResponse {
    pub success: bool,
    pub contenido: String,
    pub archivo: String,
    pub paginas: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BuscarPdfResponse {
    pub fn found(content: PdfContent) -> Self {
        Self {
            success: true,
            contenido: content.text,
            archivo: content.filename,
            paginas: content.page_count,
            error: None,
        }
    }

    pub fn failed(archivo: String, error: String) -> Self {
        Self {
            success: false,
            contenido: String::new(),
            archivo,
            paginas: 0,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArchivosResponse {
    pub carpeta: String,
    pub total: usize,
    pub archivos: Vec<String>,
    pub fuente: ListingSource,
}

impl From<FileListing> for ArchivosResponse {
    fn from(listing: FileListing) -> Self {
        Self {
            carpeta: listing.folder,
            total: listing.files.len(),
            archivos: listing.files,
            fuente: listing.source,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TunnelResponse {
    pub estado: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
