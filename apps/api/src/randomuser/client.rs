/// Outbound client for the RandomUser API.
///
/// One GET per call, no retry and no timeout: a hung upstream only holds up
/// the request that triggered it.
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const RANDOM_USER_API_URL: &str = "https://randomuser.me/api/";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can hand back one raw, unvalidated RandomUser payload.
#[async_trait]
pub trait PersonSource: Send + Sync {
    async fn fetch(&self) -> Result<Value, FetchError>;
}

#[derive(Clone)]
pub struct RandomUserClient {
    client: Client,
    url: String,
}

impl RandomUserClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl Default for RandomUserClient {
    fn default() -> Self {
        Self::new(RANDOM_USER_API_URL)
    }
}

#[async_trait]
impl PersonSource for RandomUserClient {
    async fn fetch(&self) -> Result<Value, FetchError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("RandomUser API responded with {} bytes", body.len());

        Ok(serde_json::from_str(&body)?)
    }
}
