use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

const USER_AGENT: &str = concat!("sportsfr-scraping/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Plain HTTP client for calendar pages.  No cookies, no redirect tricks;
/// the calendar is public and every page is a single unauthenticated GET.
pub struct SportsClient {
    client: reqwest::Client,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server returned {status} for {url}")]
    Status { status: StatusCode, url: Url },
}

impl SportsClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads one page and returns its HTML.  Any transport error or
    /// non-success status is fatal to the crawl; there is no retry.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        debug!("GET {url}");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.clone(),
            });
        }
        Ok(response.text().await?)
    }
}
