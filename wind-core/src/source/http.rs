use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::FetchError;

use super::ForecastSource;

/// Reads a forecast body with a single `GET`.
///
/// No client-side timeout is configured; the transport defaults apply.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    http: Client,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ForecastSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        debug!(url = %self.url, "requesting forecast");

        let res = self.http.get(self.url.clone()).send().await?;

        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        debug!(url = %self.url, bytes = body.len(), "forecast body received");
        Ok(body.to_vec())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
