use crate::error::{TutorError, TutorResult};
use lopdf::Document;
use serde::Serialize;
use std::fmt::Write;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    /// Pages in the source document, not the number of pages read.
    pub page_count: usize,
}

/// Turns PDF bytes into page-marked plain text.
///
/// Pages are read one by one with `lopdf` so that a broken page only loses its
/// own text. When the requested pages yield nothing at all (unusual font
/// encodings, mostly) those pages alone are handed to `pdf-extract` as a second
/// opinion.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(
        &self,
        bytes: &[u8],
        max_pages: Option<usize>,
        max_chars: usize,
    ) -> TutorResult<ExtractedText> {
        self.extract_with(bytes, max_pages, max_chars, extract_with_pdf_extract)
    }

    fn extract_with<F>(
        &self,
        bytes: &[u8],
        max_pages: Option<usize>,
        max_chars: usize,
        fallback: F,
    ) -> TutorResult<ExtractedText>
    where
        F: FnOnce(&[u8]) -> Option<Vec<String>>,
    {
        let document = guarded(|| Document::load_mem(bytes))
            .ok_or_else(|| TutorError::Parse("el lector de PDF abortó".to_string()))??;

        let pages: Vec<u32> = document.get_pages().keys().copied().collect();
        let page_count = pages.len();
        let wanted = max_pages.map_or(page_count, |limit| limit.min(page_count));

        let mut page_texts: Vec<String> = pages[..wanted]
            .iter()
            .map(|&number| read_page(&document, number))
            .collect();

        if wanted > 0 && page_texts.iter().all(|t| t.trim().is_empty()) {
            // Never let the second opinion walk pages past the requested ones.
            let second_opinion = if wanted < page_count {
                leading_pages(&document, &pages[wanted..]).and_then(|trimmed| fallback(&trimmed))
            } else {
                fallback(bytes)
            };
            if let Some(fallback_texts) = second_opinion {
                page_texts = (0..wanted)
                    .map(|i| fallback_texts.get(i).cloned().unwrap_or_default())
                    .collect();
            }
        }

        let mut text = String::new();
        for (index, page_text) in page_texts.iter().enumerate() {
            let _ = write!(text, "--- Página {} ---\n{}\n\n", index + 1, page_text);
        }

        log::info!(
            "PDF processed: {} characters from {} of {} pages",
            text.chars().count(),
            wanted,
            page_count
        );

        Ok(ExtractedText {
            text: truncate_chars(&text, max_chars),
            page_count,
        })
    }

    /// Runs [`extract`](Self::extract) on the blocking pool.
    pub async fn extract_owned(
        &self,
        bytes: Vec<u8>,
        max_pages: Option<usize>,
        max_chars: usize,
    ) -> TutorResult<ExtractedText> {
        let extractor = *self;
        tokio::task::spawn_blocking(move || extractor.extract(&bytes, max_pages, max_chars))
            .await
            .map_err(|e| TutorError::Parse(format!("extracción interrumpida: {e}")))?
    }
}

/// Serializes a copy of `document` without the `dropped` pages.
fn leading_pages(document: &Document, dropped: &[u32]) -> Option<Vec<u8>> {
    let outcome = guarded(|| {
        let mut trimmed = document.clone();
        trimmed.delete_pages(dropped);
        trimmed.prune_objects();
        let mut buffer = Vec::new();
        trimmed.save_to(&mut buffer).map(|_| buffer)
    });
    match outcome {
        Some(Ok(buffer)) => Some(buffer),
        Some(Err(e)) => {
            log::warn!("Could not cut the document down to its first pages: {}", e);
            None
        }
        None => {
            log::warn!("Cutting the document down to its first pages panicked");
            None
        }
    }
}

fn read_page(document: &Document, number: u32) -> String {
    match guarded(|| document.extract_text(&[number])) {
        Some(Ok(text)) => text,
        Some(Err(e)) => {
            log::warn!("Page {} has no extractable text: {}", number, e);
            String::new()
        }
        None => {
            log::warn!("Text extraction panicked on page {}", number);
            String::new()
        }
    }
}

fn extract_with_pdf_extract(bytes: &[u8]) -> Option<Vec<String>> {
    match guarded(|| pdf_extract::extract_text_from_mem_by_pages(bytes)) {
        Some(Ok(pages)) => Some(pages),
        Some(Err(e)) => {
            log::warn!("pdf-extract could not read the document: {}", e);
            None
        }
        None => {
            log::warn!("pdf-extract panicked while reading the document");
            None
        }
    }
}

fn guarded<T>(f: impl FnOnce() -> T) -> Option<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).ok()
}

/// Cuts `text` to at most `max_chars` characters, ignoring word boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
