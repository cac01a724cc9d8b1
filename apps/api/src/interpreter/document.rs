//! Resume document fetching.
//!
//! The interpreter itself is pure; fetching and decoding the uploaded
//! document is the only I/O on its path, so it sits behind a trait carried in
//! `AppState` as `Arc<dyn DocumentFetcher>`. Tests substitute an in-memory
//! fetcher. Every failure on this path is `DocumentUnavailable`: the caller
//! never sees a partial parse.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetches the document at `url` and returns its plain text.
    async fn fetch_text(&self, url: &str) -> Result<String, AppError>;
}

/// Default fetcher: HTTP GET via `reqwest`, with PDF payloads run through
/// `pdf-extract` and everything else decoded as UTF-8.
pub struct HttpDocumentFetcher {
    client: reqwest::Client,
}

impl HttpDocumentFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::DocumentUnavailable(e.to_string()))?;

        let is_pdf = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/pdf"))
            .unwrap_or(false)
            || url.to_lowercase().ends_with(".pdf");

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::DocumentUnavailable(e.to_string()))?;

        if is_pdf {
            decode_pdf(body).await
        } else {
            String::from_utf8(body.to_vec())
                .map_err(|e| AppError::DocumentUnavailable(format!("not valid UTF-8: {e}")))
        }
    }
}

/// PDF text extraction is CPU-bound; run it off the async worker threads.
async fn decode_pdf(body: Bytes) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&body)
            .map_err(|e| AppError::DocumentUnavailable(format!("PDF decode failed: {e}")))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF decode task panicked: {e}")))?
}
