//! Getting page HTML: over HTTP from the reference sites, or from a page
//! saved earlier (a file, or standard input with `-`).

use std::fs;
use std::io::{self, Read};
use std::path::Path;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::{Client, header};
#[cfg(feature = "fetch")]
use url::Url;

use crate::{LinguaError, Result};

/// Marker for "read the page from standard input".
pub const STDIN_MARKER: &str = "-";

#[cfg(feature = "fetch")]
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8";
#[cfg(feature = "fetch")]
const ACCEPT_ITALIAN: &str = "it-IT,it;q=0.9";

/// Request settings for [`fetch_url`].
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Whole-request limit, in seconds.
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Lingua/1.0)".to_string() }
    }
}

#[cfg(feature = "fetch")]
fn build_client(config: &FetchConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .user_agent(config.user_agent.as_str())
        .build()?)
}

/// Downloads an entry page.
///
/// Only `http` and `https` are accepted. A status outside 2xx is an error:
/// Treccani answers unknown words with 404, and that page is not an entry.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let target = Url::parse(url).map_err(|e| LinguaError::InvalidUrl(format!("{}: {}", url, e)))?;
    if !matches!(target.scheme(), "http" | "https") {
        return Err(LinguaError::InvalidUrl(format!("{}: only http and https pages can be fetched", url)));
    }

    tracing::debug!(url = %target, timeout = config.timeout, "fetching page");

    let as_lingua_error = |e: reqwest::Error| {
        if e.is_timeout() { LinguaError::Timeout { timeout: config.timeout } } else { LinguaError::HttpError(e) }
    };

    let response = build_client(config)?
        .get(target)
        .header(header::ACCEPT, ACCEPT_HTML)
        .header(header::ACCEPT_LANGUAGE, ACCEPT_ITALIAN)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(as_lingua_error)?;

    let body = response.text().await.map_err(as_lingua_error)?;
    tracing::debug!(bytes = body.len(), "page downloaded");
    Ok(body)
}

/// Reads a saved page from disk.
pub fn fetch_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LinguaError::FileNotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

/// Reads a saved page piped on standard input.
pub fn fetch_stdin() -> Result<String> {
    let mut page = String::new();
    io::stdin().lock().read_to_string(&mut page)?;
    Ok(page)
}

/// Reads a saved page from `input`: standard input for [`STDIN_MARKER`],
/// otherwise a file path.
pub fn read_page(input: &str) -> Result<String> {
    if input == STDIN_MARKER { fetch_stdin() } else { fetch_file(input) }
}
