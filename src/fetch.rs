use std::time::Instant;

use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::FetchError;

/// Thin wrapper over one reqwest client with the 30 s request timeout baked
/// in. Non-2xx responses are failures; callers decide what a failure means
/// (end-of-list for the listing walk, item skip for details).
pub struct Fetcher {
    client: Client,
    listing_url: String,
    detail_url: String,
}

impl Fetcher {
    pub fn new(cfg: &Config) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(cfg.request_timeout).build()?;
        Ok(Self {
            client,
            listing_url: cfg.listing_url.clone(),
            detail_url: cfg.detail_url.clone(),
        })
    }

    pub async fn listing_page(&self, page: u32) -> Result<String, FetchError> {
        self.get(&self.listing_url, ("pagina", page.to_string())).await
    }

    pub async fn detail_page(&self, code: &str) -> Result<String, FetchError> {
        self.get(&self.detail_url, ("cod_produto", code.to_string())).await
    }

    async fn get(&self, url: &str, query: (&str, String)) -> Result<String, FetchError> {
        let start = Instant::now();
        let resp = self.client.get(url).query(&[query]).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            });
        }
        let body = resp.text().await?;
        debug!("GET {} ({} ms)", url, start.elapsed().as_millis());
        Ok(body)
    }
}
