use crate::error::{TutorError, TutorResult};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use std::time::Duration;

/// Single-shot GET of a remote document. No retries; any non-2xx status is an error.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    pub fn new(timeout: Duration) -> TutorResult<Self> {
        Self::build(timeout, HeaderMap::new())
    }

    /// Fetcher for files served through an ngrok tunnel. The extra header keeps
    /// free tunnels from answering with their browser warning page.
    pub fn for_tunnel(timeout: Duration) -> TutorResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("ngrok-skip-browser-warning", HeaderValue::from_static("true"));
        Self::build(timeout, headers)
    }

    fn build(timeout: Duration, headers: HeaderMap) -> TutorResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| TutorError::Config(format!("no se pudo crear el cliente HTTP: {e}")))?;
        Ok(Self { client })
    }

    pub async fn fetch(&self, url: &str) -> TutorResult<Vec<u8>> {
        log::info!("Downloading document from {}", url);

        let response = self.get(url).await?;
        let bytes = response.bytes().await.map_err(|source| TutorError::Fetch {
            url: url.to_string(),
            source,
        })?;

        log::info!("Downloaded {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    /// GETs `url` and reports the status code, discarding the body.
    pub async fn probe(&self, url: &str) -> TutorResult<u16> {
        Ok(self.get(url).await?.status().as_u16())
    }

    async fn get(&self, url: &str) -> TutorResult<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| TutorError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Remote host answered {} for {}", status, url);
            return Err(TutorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }
}

/// `{download_url}?export=download&id={document_id}`
pub fn drive_download_url(download_url: &str, document_id: &str) -> TutorResult<String> {
    Url::parse_with_params(download_url, &[("export", "download"), ("id", document_id)])
        .map(String::from)
        .map_err(|e| TutorError::InvalidUrl(format!("{download_url}: {e}")))
}

/// `{base}/{folder}/{filename}` with each segment percent-encoded.
pub fn tunnel_file_url(base: &str, folder: &str, filename: &str) -> TutorResult<String> {
    let mut url = Url::parse(base).map_err(|e| TutorError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| TutorError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push(folder)
        .push(filename);
    Ok(url.into())
}
