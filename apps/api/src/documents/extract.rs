//! PDF text extraction.
//!
//! A thin layer over `pdf-extract`: pages are decoded individually so blank
//! pages can be dropped instead of leaving empty lines behind.

use std::any::Any;
use std::panic;

use thiserror::Error;

/// The payload could not be decoded as a PDF.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Error reading PDF: {0}")]
    Malformed(String),

    /// `pdf-extract` panicked on the input instead of returning an error.
    #[error("Error reading PDF: decoder aborted ({0})")]
    Aborted(String),
}

/// Decodes `bytes` and returns the text of every page, in page order.
/// Pages without recoverable text come back as empty or whitespace-only strings.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|payload| DecodeError::Aborted(panic_message(payload)))?
        .map_err(|e| DecodeError::Malformed(e.to_string()))
}

/// Joins page texts with a single newline, skipping pages that carry no text.
/// Leading and trailing line breaks on each page are dropped.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| page.as_ref().trim_matches(&['\n', '\r'][..]))
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full document text. An empty string means the PDF decoded but had no text.
pub fn extract_text(bytes: &[u8]) -> Result<String, DecodeError> {
    let pages = extract_pages(bytes)?;
    Ok(join_pages(&pages))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return (*msg).to_string();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "unknown panic".to_string()
}
