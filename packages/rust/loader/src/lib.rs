//! Chapter list loading.
//!
//! The journal is a single static JSON array, served over HTTP or read from
//! disk. It is loaded once per page view with no retries; any failure along
//! the way (transport, status, I/O, decode) surfaces as
//! [`VoyageLogError::DataUnavailable`].

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

use voyagelog_shared::{ChapterRecord, Result, SourceConfig, VoyageLogError};

/// Maximum number of redirects to follow when fetching the journal.
const MAX_REDIRECTS: usize = 3;

/// Maximum response size we consider valid (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// User-Agent string for journal requests.
const USER_AGENT: &str = concat!("VoyageLog/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// ChapterSource
// ---------------------------------------------------------------------------

/// Where the journal JSON lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterSource {
    Http(Url),
    File(PathBuf),
}

impl ChapterSource {
    /// `http://` and `https://` locations are fetched; anything else is a path.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Http(url),
            _ => Self::File(PathBuf::from(location)),
        }
    }
}

impl std::fmt::Display for ChapterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// Configuration for loading the journal.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Timeout for HTTP requests in seconds; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&SourceConfig::default())
    }
}

impl From<&SourceConfig> for LoadOptions {
    fn from(source: &SourceConfig) -> Self {
        Self {
            timeout_secs: source.timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Load and decode the chapter list from `source`.
#[instrument(skip_all, fields(source = %source))]
pub async fn load_chapters(
    source: &ChapterSource,
    opts: &LoadOptions,
) -> Result<Vec<ChapterRecord>> {
    let body = match source {
        ChapterSource::Http(url) => match build_client(opts) {
            Ok(client) => fetch(&client, url).await,
            Err(e) => Err(e),
        },
        ChapterSource::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| VoyageLogError::io(path, e)),
    }
    .map_err(|e| unavailable(source, e))?;

    let chapters = decode_chapters(&body).map_err(|e| unavailable(source, e))?;

    info!(chapters = chapters.len(), "chapter list loaded");
    Ok(chapters)
}

/// Decode the journal JSON: a top-level array of chapter objects.
pub fn decode_chapters(body: &str) -> Result<Vec<ChapterRecord>> {
    serde_json::from_str(body)
        .map_err(|e| VoyageLogError::parse(format!("invalid journal JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unavailable(source: &ChapterSource, err: VoyageLogError) -> VoyageLogError {
    match err {
        VoyageLogError::DataUnavailable { .. } => err,
        other => VoyageLogError::data_unavailable(source.to_string(), other.to_string()),
    }
}

/// Build a reqwest client with appropriate settings.
fn build_client(opts: &LoadOptions) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

    if let Some(secs) = opts.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| VoyageLogError::Network(format!("failed to build HTTP client: {e}")))
}

/// Fetch the journal body, rejecting error statuses and oversized responses.
async fn fetch(client: &Client, url: &Url) -> Result<String> {
    debug!(%url, "fetching journal");

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| VoyageLogError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(VoyageLogError::Network(format!("{url}: HTTP {status}")));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(VoyageLogError::Network(format!(
                "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
            )));
        }
    }

    response
        .text()
        .await
        .map_err(|e| VoyageLogError::Network(format!("{url}: failed to read body: {e}")))
}
