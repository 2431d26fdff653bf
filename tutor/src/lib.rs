pub mod answer_service;
pub mod config;
pub mod credentials;
pub mod document_fetcher;
pub mod error;
pub mod gemini_service;
pub mod library;
pub mod models;
pub mod pdf_extractor;
pub mod proxy_service;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use answer_service::AnswerService;
pub use config::Settings;
pub use credentials::CredentialStore;
pub use document_fetcher::DocumentFetcher;
pub use error::{TutorError, TutorResult};
pub use gemini_service::GeminiService;
pub use library::{Category, Library};
pub use models::*;
pub use pdf_extractor::{ExtractedText, PdfExtractor};
pub use proxy_service::ProxyService;
