//! Fetching directory HTML over HTTP, from files, or from stdin.
//!
//! This path serves pages whose full card list is present in the initial
//! HTML. Script-rendered directories need the `webdriver` adapter instead;
//! a fetched document never grows, so the convergence loop will simply
//! converge on whatever the markup already contains.
//!
//! # Example
//!
//! ```rust,no_run
//! use expositor_core::fetch::fetch_url;
//! use expositor_core::{Harvester, StaticPage};
//!
//! # fn main() {
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let html = fetch_url("https://directory.imts.com/8_0/explore/exhibitor-gallery.cfm").await.unwrap();
//! let harvest = Harvester::new().run(&StaticPage::new(html)).await.unwrap();
//! println!("{} exhibitors", harvest.records.len());
//! # });
//! # }
//! ```

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::Result;
use crate::error::ExpositorError;

/// Configuration for HTTP fetching.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,

    /// User-Agent header sent with the request.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Expositor/0.5; +https://github.com/expositor-rs/expositor)"
                .to_string(),
        }
    }
}

/// Fetches HTML from a URL with the default configuration.
pub async fn fetch_url(url: &str) -> Result<String> {
    fetch_url_with_config(url, &FetchConfig::default()).await
}

/// Fetches HTML from a URL.
///
/// Only `http` and `https` URLs are accepted. Timeouts are reported as
/// [`ExpositorError::Timeout`]; other transport failures and non-success
/// status codes surface as [`ExpositorError::HttpError`].
pub async fn fetch_url_with_config(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| ExpositorError::InvalidUrl(url.to_string()))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ExpositorError::InvalidUrl(url.to_string()));
    }

    let client = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout)).build()?;

    let response = client
        .get(parsed)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.5")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ExpositorError::Timeout { timeout: config.timeout }
            } else {
                e.into()
            }
        })?
        .error_for_status()?;

    response.text().await.map_err(|e| {
        if e.is_timeout() { ExpositorError::Timeout { timeout: config.timeout } } else { e.into() }
    })
}

/// Reads HTML from a local file.
pub fn fetch_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExpositorError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Reads HTML from standard input.
pub fn fetch_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}
