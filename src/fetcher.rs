use log::info;
use reqwest::blocking::Client;
use scraper::Html;
use std::time::Duration;

use crate::error::{Result, ScrapeError};

/// Source of page bodies. The pipelines only ever ask for whole pages by
/// URL, one at a time.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String>;

    fn fetch_document(&self, url: &str) -> Result<Html> {
        let body = self.fetch(url)?;
        Ok(Html::parse_document(&body))
    }
}

/// Plain blocking GET with the client's default headers. No timeout and no
/// retry: a failed request ends the run.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        // The blocking client times out after 30s unless told otherwise.
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(HttpFetcher { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        info!("Visiting: {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| ScrapeError::Http { url: url.to_string(), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ScrapeError::Status { url: url.to_string(), status: status.as_u16() });
        }

        resp.text()
            .map_err(|source| ScrapeError::Http { url: url.to_string(), source })
    }
}
