use crate::credentials::CredentialStore;
use crate::error::{TutorError, TutorResult};
use crate::library::{Category, Library};
use std::env;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_DRIVE_DOWNLOAD_URL: &str = "https://drive.google.com/uc";
pub const DEFAULT_NGROK_URL: &str = "http://localhost:8080";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Process-wide settings, read once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct Settings {
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub drive_download_url: String,
    pub ngrok_url: String,
    pub fetch_timeout: Duration,
    pub library: Library,
    pub credentials: CredentialStore,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("port", &self.port)
            .field("gemini_configured", &self.gemini_configured())
            .field("gemini_model", &self.gemini_model)
            .field("drive_download_url", &self.drive_download_url)
            .field("ngrok_url", &self.ngrok_url)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("library", &self.library)
            .field("credentials", &self.credentials)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> TutorResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> TutorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| TutorError::Config(format!("PORT no es un puerto válido: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let fetch_timeout = match get("FETCH_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(TutorError::Config(
                        "FETCH_TIMEOUT_SECS debe ser mayor que cero".to_string(),
                    ))
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(_) => {
                    return Err(TutorError::Config(format!(
                        "FETCH_TIMEOUT_SECS no es un número: {raw}"
                    )))
                }
            },
            None => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        };

        let defaults = Library::default();
        let library = Library::new(
            get("BIBLIOTECA_FISICA_ID").unwrap_or_else(|| defaults.id(Category::Fisica).to_string()),
            get("BIBLIOTECA_CIVIL_ID").unwrap_or_else(|| defaults.id(Category::Civil).to_string()),
            get("BIBLIOTECA_ADMIN_ID").unwrap_or_else(|| defaults.id(Category::Admin).to_string()),
        );

        let credentials = match get("AYUNI_USUARIOS") {
            Some(raw) => CredentialStore::parse(&raw)?,
            None => CredentialStore::default(),
        };

        Ok(Self {
            port,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            drive_download_url: get("DRIVE_DOWNLOAD_URL")
                .unwrap_or_else(|| DEFAULT_DRIVE_DOWNLOAD_URL.to_string()),
            ngrok_url: get("NGROK_URL")
                .unwrap_or_else(|| DEFAULT_NGROK_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            fetch_timeout,
            library,
            credentials,
        })
    }

    pub fn gemini_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}
