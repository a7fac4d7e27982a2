//! Text extraction collaborator: turns an uploaded document into plain text.
//!
//! The extraction core never calls this; only the upload handler does.
//! `AppState` holds an `Arc<dyn TextExtractor>` so tests can swap in a fake.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, bytes: Bytes) -> Result<String>;
}

/// PDF text via `pdf-extract`. Parsing is CPU-bound, so it runs on the
/// blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract_text(&self, bytes: Bytes) -> Result<String> {
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .context("PDF extraction task did not complete")?
            .map_err(|e| anyhow!("Failed to extract text from PDF: {e:?}"))?;
        Ok(text)
    }
}
