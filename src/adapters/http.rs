use crate::domain::ports::Transport;
use crate::utils::error::{MenuError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Skips TLS certificate verification; some menu hosts serve broken chains.
    pub fn with_invalid_certs_accepted() -> Result<Self> {
        let client = Client::builder().danger_accept_invalid_certs(true).build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let now = Instant::now();
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("GET {} returned {}", url, status);
            return Err(MenuError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        tracing::debug!("GET {} ({} bytes) in {:.2?}", url, body.len(), now.elapsed());
        Ok(body)
    }
}
