use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::core::error::{AnalyzerError, AnalyzerResult};

/// Byte source for remote artifacts and descriptors.
///
/// One call is one attempt; retrying is left to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> AnalyzerResult<Vec<u8>>;
}

/// `Fetcher` backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> AnalyzerResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalyzerError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// In-memory fetcher keyed by URL. Unknown URLs answer HTTP 404.
    #[derive(Default)]
    pub struct MemoryFetcher {
        bodies: HashMap<String, Vec<u8>>,
        requests: Mutex<Vec<String>>,
    }

    impl MemoryFetcher {
        pub fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.bodies.insert(url.to_string(), body.to_vec());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requests.lock().map(|r| r.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl Fetcher for MemoryFetcher {
        async fn fetch(&self, url: &str) -> AnalyzerResult<Vec<u8>> {
            if let Ok(mut requests) = self.requests.lock() {
                requests.push(url.to_string());
            }
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| AnalyzerError::DownloadFailed {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }
}
