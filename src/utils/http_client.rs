use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Response};
use tracing::debug;

use crate::errors::{AppError, AppResult, SourceError, SourceResult};
use crate::utils::decompression::{CompressionFormat, DecompressionService};
use crate::utils::url::UrlUtils;

/// HTTP client returning decompressed response bodies
#[derive(Debug, Clone)]
pub struct StandardHttpClient {
    client: Client,
}

impl StandardHttpClient {
    /// Create a client bounded by a connection timeout and a total request
    /// timeout
    pub fn with_timeouts(connect_timeout: Duration, request_timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch a URL and return its body, decompressed when needed
    pub async fn fetch_bytes(&self, url: &str) -> SourceResult<Bytes> {
        debug!("Fetching content from: {}", UrlUtils::obfuscate_credentials(url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(&UrlUtils::obfuscate_credentials(url), e))?;

        Self::process_response_to_bytes(response, url).await
    }

    async fn process_response_to_bytes(response: Response, url: &str) -> SourceResult<Bytes> {
        let url = UrlUtils::obfuscate_credentials(url);
        if !response.status().is_success() {
            return Err(SourceError::HttpStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::from_reqwest(&url, e))?;

        debug!("Fetched {} bytes of raw content", bytes.len());

        let compression_format = DecompressionService::detect_compression_format(&bytes);
        debug!("Detected compression format: {:?}", compression_format);

        let decompressed = match compression_format {
            CompressionFormat::Uncompressed => bytes,
            _ => DecompressionService::decompress(bytes)?,
        };

        debug!(
            "Successfully processed {} bytes of content (compression: {:?})",
            decompressed.len(),
            compression_format
        );
        Ok(decompressed)
    }
}
