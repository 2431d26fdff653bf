use crate::config::Settings;
use crate::document_fetcher::{drive_download_url, DocumentFetcher};
use crate::error::TutorResult;
use crate::gemini_service::GeminiService;
use crate::library::Library;
use crate::models::Answer;
use crate::pdf_extractor::PdfExtractor;

/// Pages of the consulted book that make it into the prompt.
pub const ANSWER_MAX_PAGES: usize = 5;
/// Character budget for the extracted context.
pub const ANSWER_MAX_CHARS: usize = 10_000;

/// Question → book → extracted text → Gemini answer.
pub struct AnswerService {
    library: Library,
    download_url: String,
    fetcher: DocumentFetcher,
    extractor: PdfExtractor,
    gemini: GeminiService,
}

impl AnswerService {
    pub fn new(
        library: Library,
        download_url: impl Into<String>,
        fetcher: DocumentFetcher,
        gemini: GeminiService,
    ) -> Self {
        Self {
            library,
            download_url: download_url.into(),
            fetcher,
            extractor: PdfExtractor::new(),
            gemini,
        }
    }

    pub fn from_settings(settings: &Settings) -> TutorResult<Self> {
        Ok(Self::new(
            settings.library.clone(),
            settings.drive_download_url.clone(),
            DocumentFetcher::new(settings.fetch_timeout)?,
            GeminiService::from_settings(settings),
        ))
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn gemini(&self) -> &GeminiService {
        &self.gemini
    }

    /// Fetch and parse failures abort the pipeline; completion failures do not,
    /// they come back as the answer text.
    pub async fn answer(&self, question: &str, user: &str) -> TutorResult<Answer> {
        let document_id = self.library.select(question);
        let document_label = self.library.label_for(document_id);
        log::info!("Question from {} routed to {}", user, document_label);

        let url = drive_download_url(&self.download_url, document_id)?;
        let bytes = self.fetcher.fetch(&url).await?;
        let extracted = self
            .extractor
            .extract_owned(bytes, Some(ANSWER_MAX_PAGES), ANSWER_MAX_CHARS)
            .await?;

        let answer = self.gemini.complete(&extracted.text, question, user).await;

        Ok(Answer {
            answer,
            document_label,
        })
    }
}
