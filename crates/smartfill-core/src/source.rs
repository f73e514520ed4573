//! Fetching a record set from its source.
//!
//! `http://` and `https://` sources are fetched with a GET; `file://` URLs and
//! bare paths are read from disk. The body must be a JSON object; the array
//! under the configured key becomes the record set.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::LoadError;
use crate::record::RecordSet;

/// Default request timeout for HTTP sources.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A `(source, key)` pair: where to fetch, and which member holds the records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    pub source: String,
    pub key: String,
}

impl SourceSpec {
    pub fn new(source: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            key: key.into(),
        }
    }

    fn location(&self) -> Location {
        let source = self.source.trim();
        if source.starts_with("http://") || source.starts_with("https://") {
            Location::Http(source.to_string())
        } else if let Some(path) = source.strip_prefix("file://") {
            Location::File(PathBuf::from(path))
        } else {
            Location::File(PathBuf::from(source))
        }
    }
}

enum Location {
    Http(String),
    File(PathBuf),
}

/// Build the HTTP client used for record loads.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("smartfill/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Fetch and extract the record set for `spec`.
///
/// Shape mismatches (non-object body, missing key, non-array value) produce an
/// empty set. Transport, IO and JSON syntax failures are errors.
pub async fn load(client: &reqwest::Client, spec: &SourceSpec) -> Result<RecordSet, LoadError> {
    let body = match spec.location() {
        Location::Http(url) => fetch_http(client, &url).await?,
        Location::File(path) => read_file(path).await?,
    };
    Ok(RecordSet::from_response(body, &spec.key))
}

/// Like [`load`], but gives up with [`LoadError::Cancelled`] once `cancel` fires.
pub async fn load_cancellable(
    client: &reqwest::Client,
    spec: &SourceSpec,
    cancel: &CancellationToken,
) -> Result<RecordSet, LoadError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LoadError::Cancelled),
        result = load(client, spec) => result,
    }
}

async fn fetch_http(client: &reqwest::Client, url: &str) -> Result<Value, LoadError> {
    tracing::debug!(url, "fetching records");
    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn read_file(path: PathBuf) -> Result<Value, LoadError> {
    tracing::debug!(path = %path.display(), "reading records");
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| LoadError::Io { path, source })?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_locations() {
        assert!(matches!(
            SourceSpec::new("https://example.com/u.json", "u").location(),
            Location::Http(_)
        ));
        assert!(matches!(
            SourceSpec::new("file:///tmp/u.json", "u").location(),
            Location::File(p) if p == PathBuf::from("/tmp/u.json")
        ));
        assert!(matches!(
            SourceSpec::new("data/u.json", "u").location(),
            Location::File(p) if p == PathBuf::from("data/u.json")
        ));
    }
}
