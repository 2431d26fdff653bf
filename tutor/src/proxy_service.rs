use crate::config::Settings;
use crate::document_fetcher::{tunnel_file_url, DocumentFetcher};
use crate::error::{TutorError, TutorResult};
use crate::models::{FileListing, ListingSource, PdfContent, TunnelStatus};
use crate::pdf_extractor::PdfExtractor;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_FOLDER: &str = "fisica_api";
pub const DEFAULT_MAX_CHARS: usize = 4000;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Files known to live behind the tunnel, used when the remote listing fails.
const KNOWN_FILES: &[(&str, &[&str])] = &[
    (
        "fisica_api",
        &[
            "tipler_fisica_vol1.pdf",
            "tipler_fisica_vol2.pdf",
            "sears_zemansky_fisica_universitaria.pdf",
        ],
    ),
    (
        "civil_api",
        &["hibbeler_estatica.pdf", "hibbeler_mecanica_materiales.pdf"],
    ),
    ("admin_api", &["manual_administracion.pdf"]),
];

pub fn known_files(folder: &str) -> Vec<String> {
    KNOWN_FILES
        .iter()
        .find(|(name, _)| *name == folder)
        .map(|(_, files)| files.iter().map(|f| f.to_string()).collect())
        .unwrap_or_default()
}

/// Reads PDFs from a file host exposed through an ngrok tunnel.
pub struct ProxyService {
    base_url: String,
    fetcher: DocumentFetcher,
    prober: DocumentFetcher,
    extractor: PdfExtractor,
}

impl ProxyService {
    pub fn new(base_url: impl Into<String>, fetch_timeout: Duration) -> TutorResult<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetcher: DocumentFetcher::for_tunnel(fetch_timeout)?,
            prober: DocumentFetcher::for_tunnel(PROBE_TIMEOUT)?,
            extractor: PdfExtractor::new(),
        })
    }

    pub fn from_settings(settings: &Settings) -> TutorResult<Self> {
        Self::new(settings.ngrok_url.clone(), settings.fetch_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Downloads `{base}/{folder}/{filename}` and extracts every page.
    pub async fn search_pdf(
        &self,
        filename: &str,
        folder: &str,
        max_chars: usize,
    ) -> TutorResult<PdfContent> {
        validate_segment("archivo", filename)?;
        validate_segment("carpeta", folder)?;

        let url = tunnel_file_url(&self.base_url, folder, filename)?;
        let bytes = self.fetcher.fetch(&url).await?;
        let extracted = self.extractor.extract_owned(bytes, None, max_chars).await?;

        Ok(PdfContent {
            filename: filename.to_string(),
            text: extracted.text,
            page_count: extracted.page_count,
        })
    }

    /// Asks the file host for the folder index and falls back to [`known_files`].
    pub async fn list_files(&self, folder: &str) -> FileListing {
        match self.remote_listing(folder).await {
            Ok(files) if !files.is_empty() => {
                log::info!("Remote listing of {} returned {} files", folder, files.len());
                return FileListing {
                    folder: folder.to_string(),
                    files,
                    source: ListingSource::Remoto,
                };
            }
            Ok(_) => log::info!("Remote listing of {} had no PDFs, using local table", folder),
            Err(e) => log::warn!("Remote listing of {} failed: {}", folder, e),
        }

        FileListing {
            folder: folder.to_string(),
            files: known_files(folder),
            source: ListingSource::Local,
        }
    }

    async fn remote_listing(&self, folder: &str) -> TutorResult<Vec<String>> {
        validate_segment("carpeta", folder)?;
        let url = tunnel_file_url(&self.base_url, folder, "")?;
        let bytes = self.prober.fetch(&url).await?;
        Ok(parse_listing(&String::from_utf8_lossy(&bytes)))
    }

    pub async fn probe_tunnel(&self) -> TunnelStatus {
        match self.prober.probe(&self.base_url).await {
            Ok(status_code) => TunnelStatus::Online { status_code },
            Err(TutorError::HttpStatus { status, .. }) => TunnelStatus::Error {
                message: format!("el túnel respondió {status}"),
            },
            Err(e) => TunnelStatus::Error {
                message: e.to_string(),
            },
        }
    }
}

fn validate_segment(field: &str, value: &str) -> TutorResult<()> {
    if value.trim().is_empty() {
        return Err(TutorError::InvalidRequest(format!(
            "El campo '{field}' es obligatorio"
        )));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(TutorError::InvalidRequest(format!(
            "El campo '{field}' no puede contener rutas"
        )));
    }
    Ok(())
}

fn pdf_link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)href\s*=\s*["']([^"'?#]+\.pdf)["']"#).expect("listing pattern is valid")
    })
}

/// Accepts a JSON array of names or an HTML directory index.
pub fn parse_listing(body: &str) -> Vec<String> {
    let candidates: Vec<String> = match serde_json::from_str::<Vec<String>>(body) {
        Ok(names) => names,
        Err(_) => pdf_link_pattern()
            .captures_iter(body)
            .map(|c| c[1].to_string())
            .collect(),
    };

    let mut files: Vec<String> = Vec::new();
    for candidate in candidates {
        let name = candidate.rsplit('/').next().unwrap_or_default();
        let name = urlencoding::decode(name)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| name.to_string());
        if name.to_lowercase().ends_with(".pdf") && !files.contains(&name) {
            files.push(name);
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_pdf, serve};
    use axum::http::StatusCode;
    use axum::response::{Html, IntoResponse};
    use axum::routing::get;
    use axum::Router;

    async fn tunnel() -> ProxyService {
        let router = Router::new()
            .route("/", get(|| async { "ngrok ok" }))
            .route(
                "/fisica_api/tipler.pdf",
                get(|| async { build_pdf(&["Cinemática", "Dinámica", "Energía"]).into_response() }),
            )
            .route(
                "/fisica_api/roto.pdf",
                get(|| async { b"no soy un pdf".to_vec().into_response() }),
            )
            .route(
                "/civil_api/",
                get(|| async {
                    Html(r#"<ul><li><a href="hibbeler%20estatica.pdf">hibbeler estatica.pdf</a></li><li><a href="notas.txt">notas.txt</a></li></ul>"#)
                }),
            )
            .route("/admin_api/", get(|| async { StatusCode::BAD_GATEWAY }));
        let base = serve(router).await;
        ProxyService::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn reads_all_pages_of_a_tunnel_pdf() {
        let content = tunnel()
            .await
            .search_pdf("tipler.pdf", DEFAULT_FOLDER, DEFAULT_MAX_CHARS)
            .await
            .unwrap();
        assert_eq!(content.filename, "tipler.pdf");
        assert_eq!(content.page_count, 3);
        assert!(content.text.contains("--- Página 3 ---"));
        assert!(content.text.chars().count() <= DEFAULT_MAX_CHARS);
    }

    #[tokio::test]
    async fn missing_pdf_reports_not_found() {
        let err = tunnel()
            .await
            .search_pdf("nada.pdf", DEFAULT_FOLDER, 3000)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("PDF no encontrado: 404"), "{err}");
    }

    #[tokio::test]
    async fn corrupted_pdf_is_a_parse_error() {
        let err = tunnel()
            .await
            .search_pdf("roto.pdf", DEFAULT_FOLDER, 3000)
            .await
            .unwrap_err();
        assert!(matches!(err, TutorError::Parse(_)));
    }

    #[tokio::test]
    async fn rejects_path_like_names() {
        let proxy = tunnel().await;
        for (file, folder) in [("", DEFAULT_FOLDER), ("../secreto.pdf", DEFAULT_FOLDER), ("a.pdf", "..")] {
            let err = proxy.search_pdf(file, folder, 3000).await.unwrap_err();
            assert!(matches!(err, TutorError::InvalidRequest(_)));
        }
    }

    #[tokio::test]
    async fn listing_prefers_remote_index() {
        let listing = tunnel().await.list_files("civil_api").await;
        assert_eq!(listing.source, ListingSource::Remoto);
        assert_eq!(listing.files, vec!["hibbeler estatica.pdf".to_string()]);
    }

    #[tokio::test]
    async fn listing_falls_back_to_known_files() {
        let proxy = tunnel().await;
        let listing = proxy.list_files("admin_api").await;
        assert_eq!(listing.source, ListingSource::Local);
        assert_eq!(listing.files, known_files("admin_api"));

        let unknown = proxy.list_files("quimica_api").await;
        assert_eq!(unknown.source, ListingSource::Local);
        assert!(unknown.files.is_empty());
    }

    #[tokio::test]
    async fn probe_reports_online_tunnel() {
        let status = tunnel().await.probe_tunnel().await;
        assert_eq!(status, TunnelStatus::Online { status_code: 200 });
    }

    #[tokio::test]
    async fn probe_reports_unreachable_tunnel() {
        let proxy = ProxyService::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert!(matches!(proxy.probe_tunnel().await, TunnelStatus::Error { .. }));
    }

    #[test]
    fn parses_json_listing() {
        let files = parse_listing(r#"["a.pdf", "b.PDF", "c.txt", "a.pdf", "sub/d.pdf"]"#);
        assert_eq!(files, vec!["a.pdf", "b.PDF", "d.pdf"]);
    }

    #[test]
    fn parses_html_listing() {
        let html = r#"<a href="tipler%20vol1.pdf">x</a> <A HREF='/fisica_api/sears.pdf'>y</A> <a href="readme.md">z</a>"#;
        assert_eq!(parse_listing(html), vec!["tipler vol1.pdf", "sears.pdf"]);
    }
}
