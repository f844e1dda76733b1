//! Document intake: fetching, PDF text extraction and the analysis pipeline.

pub mod extract;
pub mod fetch;
pub mod handlers;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;
