//! Resolves a `pdf_url` reference to document bytes.
//!
//! `http://` and `https://` references are downloaded. Anything else is a
//! path relative to the configured document root; without a root, local
//! references are refused.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::AppError;

/// Source of document bytes for reference-based requests.
///
/// Carried in `AppState` as `Arc<dyn DocumentFetcher>`.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, reference: &str) -> Result<Bytes, AppError>;
}

/// How a reference string will be resolved.
#[derive(Debug, PartialEq, Eq)]
pub enum DocumentRef<'a> {
    Remote(&'a str),
    Local(&'a Path),
}

impl<'a> DocumentRef<'a> {
    pub fn parse(reference: &'a str) -> Self {
        let lower = reference.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentRef::Remote(reference)
        } else {
            DocumentRef::Local(Path::new(reference))
        }
    }
}

/// Default fetcher: HTTP(S) via `reqwest`, local files confined to a root.
pub struct ReferenceFetcher {
    http: Client,
    local_root: Option<PathBuf>,
    max_bytes: usize,
}

impl ReferenceFetcher {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.fetch_timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            local_root: config.local_document_root.clone(),
            max_bytes: config.max_document_bytes,
        })
    }

    async fn fetch_remote(&self, url: &str) -> Result<Bytes, AppError> {
        debug!(url, "Fetching remote document");
        let mut response = self.http.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "Remote fetch failed");
            AppError::InputMissing(format!("Failed to fetch PDF from the provided URL: {e}"))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(url, %status, "Remote fetch returned non-200 status");
            return Err(AppError::InputMissing(format!(
                "Failed to fetch PDF from the provided URL (status {status})."
            )));
        }
        if response
            .content_length()
            .is_some_and(|len| len > self.max_bytes as u64)
        {
            return Err(self.too_large());
        }

        // Content-Length can be absent or wrong; enforce the cap while streaming.
        let mut body = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            AppError::InputMissing(format!("Failed to read PDF from the provided URL: {e}"))
        })? {
            if body.len() + chunk.len() > self.max_bytes {
                warn!(url, max_bytes = self.max_bytes, "Remote document exceeds size limit");
                return Err(self.too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body.freeze())
    }

    async fn read_local(&self, path: &Path) -> Result<Bytes, AppError> {
        let root = self.local_root.as_ref().ok_or_else(|| {
            AppError::Validation("Local document paths are disabled on this server.".to_string())
        })?;

        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(outside_root());
        }

        let root = tokio::fs::canonicalize(root)
            .await
            .with_context(|| format!("Document root {} is not accessible", root.display()))?;
        let resolved = tokio::fs::canonicalize(root.join(path))
            .await
            .map_err(|_| AppError::InputMissing(format!("Document not found: {}", path.display())))?;
        // Symlinks inside the root may still point elsewhere.
        if !resolved.starts_with(&root) {
            return Err(outside_root());
        }

        let metadata = tokio::fs::metadata(&resolved)
            .await
            .map_err(|e| AppError::InputMissing(format!("Could not read document: {e}")))?;
        if !metadata.is_file() {
            return Err(AppError::InputMissing(format!(
                "Document not found: {}",
                path.display()
            )));
        }
        if metadata.len() > self.max_bytes as u64 {
            return Err(self.too_large());
        }

        debug!(path = %resolved.display(), "Reading local document");
        let data = tokio::fs::read(&resolved)
            .await
            .map_err(|e| AppError::InputMissing(format!("Could not read document: {e}")))?;
        Ok(Bytes::from(data))
    }

    fn too_large(&self) -> AppError {
        AppError::Validation(format!(
            "Document exceeds the {} byte limit.",
            self.max_bytes
        ))
    }
}

#[async_trait]
impl DocumentFetcher for ReferenceFetcher {
    async fn fetch(&self, reference: &str) -> Result<Bytes, AppError> {
        match DocumentRef::parse(reference) {
            DocumentRef::Remote(url) => self.fetch_remote(url).await,
            DocumentRef::Local(path) => self.read_local(path).await,
        }
    }
}

fn outside_root() -> AppError {
    AppError::Validation("Document path is outside the allowed directory.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn fetcher(root: Option<&Path>) -> ReferenceFetcher {
        ReferenceFetcher::new(&Config {
            local_document_root: root.map(Path::to_path_buf),
            fetch_timeout: Duration::from_secs(2),
            max_document_bytes: 64,
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_parse_reference_kinds() {
        assert_eq!(
            DocumentRef::parse("https://cdn.example.com/cv.pdf"),
            DocumentRef::Remote("https://cdn.example.com/cv.pdf")
        );
        assert_eq!(
            DocumentRef::parse("HTTP://example.com/cv.pdf"),
            DocumentRef::Remote("HTTP://example.com/cv.pdf")
        );
        assert_eq!(
            DocumentRef::parse("resumes/cv.pdf"),
            DocumentRef::Local(Path::new("resumes/cv.pdf"))
        );
    }

    #[tokio::test]
    async fn test_local_paths_disabled_without_root() {
        let err = fetcher(None).fetch("cv.pdf").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_reads_file_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/cv.pdf"), b"%PDF-1.4 stub").unwrap();

        let bytes = fetcher(Some(dir.path()))
            .fetch("./nested/cv.pdf")
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"%PDF-1.4 stub");
    }

    #[tokio::test]
    async fn test_missing_file_is_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = fetcher(Some(dir.path())).fetch("nope.pdf").await.unwrap_err();
        assert!(matches!(err, AppError::InputMissing(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_directory_is_input_missing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("folder.pdf")).unwrap();
        let err = fetcher(Some(dir.path())).fetch("folder.pdf").await.unwrap_err();
        assert!(matches!(err, AppError::InputMissing(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_traversal_and_absolute_paths_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let f = fetcher(Some(dir.path()));
        for reference in ["../secret.pdf", "nested/../../secret.pdf", "/etc/passwd"] {
            let err = f.fetch(reference).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{reference}: {err:?}");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escaping_root_rejected() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.pdf"), b"secret").unwrap();
        let root = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(
            outside.path().join("secret.pdf"),
            root.path().join("link.pdf"),
        )
        .unwrap();

        let err = fetcher(Some(root.path())).fetch("link.pdf").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_oversized_local_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("big.pdf"), vec![b'x'; 65]).unwrap();
        let err = fetcher(Some(dir.path())).fetch("big.pdf").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{err:?}");
    }

    /// Serves one canned HTTP response on a local port and returns its URL
    /// along with a handle reporting how many body bytes were written.
    async fn serve_once(head: &'static str, body: Vec<Vec<u8>>) -> (String, JoinHandle<usize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            if socket.write_all(head.as_bytes()).await.is_err() {
                return 0;
            }
            let mut written = 0;
            for part in body {
                if socket.write_all(&part).await.is_err() {
                    break;
                }
                written += part.len();
            }
            let _ = socket.shutdown().await;
            written
        });
        (format!("http://{addr}/resume.pdf"), handle)
    }

    fn chunked(payloads: usize, size: usize) -> Vec<Vec<u8>> {
        let mut parts: Vec<Vec<u8>> = (0..payloads)
            .map(|_| {
                let mut part = format!("{size:x}\r\n").into_bytes();
                part.extend(std::iter::repeat(b'x').take(size));
                part.extend_from_slice(b"\r\n");
                part
            })
            .collect();
        parts.push(b"0\r\n\r\n".to_vec());
        parts
    }

    #[tokio::test]
    async fn test_remote_non_200_is_input_missing() {
        let (url, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            vec![],
        )
        .await;
        let err = fetcher(None).fetch(&url).await.unwrap_err();
        assert!(matches!(err, AppError::InputMissing(_)), "{err:?}");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_remote_declared_length_over_limit_rejected() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 100000\r\nConnection: close\r\n\r\n",
            vec![vec![b'x'; 128]],
        )
        .await;
        let err = fetcher(None).fetch(&url).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{err:?}");
        server.abort();
    }

    #[tokio::test]
    async fn test_remote_small_body_is_returned() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
            chunked(2, 16),
        )
        .await;
        let bytes = fetcher(None).fetch(&url).await.unwrap();
        assert_eq!(bytes.len(), 32);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_remote_chunked_body_stops_at_limit() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
            chunked(2048, 1024),
        )
        .await;
        let err = fetcher(None).fetch(&url).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{err:?}");

        // Dropping the response closes the connection, so the server gives up
        // long before it has pushed the whole 2 MiB body.
        let written = tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .unwrap()
            .unwrap();
        assert!(written < 2048 * 1024, "server wrote {written} bytes");
    }

    #[tokio::test]
    async fn test_unreachable_url_is_input_missing() {
        let err = fetcher(None)
            .fetch("http://127.0.0.1:9/resume.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InputMissing(_)), "{err:?}");
    }
}
