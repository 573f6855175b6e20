use crate::{Config, error::FetchError, source::http::HttpSource};
use async_trait::async_trait;
use reqwest::Url;
use std::{convert::TryFrom, fmt::Debug};

pub mod http;

/// Which backend resource a view reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// `{base}/hourly`, a JSON array of samples.
    Hourly,
    /// `/api/hourly` on the base origin, behind a reverse proxy.
    Proxied,
    /// `{base}/weather`, a single coordinate object.
    Weather,
}

impl EndpointKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointKind::Hourly => "hourly",
            EndpointKind::Proxied => "proxied",
            EndpointKind::Weather => "weather",
        }
    }

    pub const fn all() -> &'static [EndpointKind] {
        &[
            EndpointKind::Hourly,
            EndpointKind::Proxied,
            EndpointKind::Weather,
        ]
    }

    /// Resolve the full request URL against a backend base.
    pub fn url(&self, base: &str) -> anyhow::Result<Url> {
        let trimmed = base.trim_end_matches('/');

        let url = match self {
            EndpointKind::Hourly => Url::parse(&format!("{trimmed}/hourly"))?,
            EndpointKind::Weather => Url::parse(&format!("{trimmed}/weather"))?,
            EndpointKind::Proxied => Url::parse(trimmed)?.join("/api/hourly")?,
        };

        Ok(url)
    }
}

impl std::fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for EndpointKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "hourly" => Ok(EndpointKind::Hourly),
            "proxied" => Ok(EndpointKind::Proxied),
            "weather" => Ok(EndpointKind::Weather),
            _ => Err(anyhow::anyhow!(
                "Unknown endpoint '{value}'. Supported endpoints: hourly, proxied, weather."
            )),
        }
    }
}

/// Something a forecast view can read one response body from.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<Vec<u8>, FetchError>;
}

/// Build an HTTP source for `kind` from the effective backend base in `config`.
pub fn source_from_config(
    kind: EndpointKind,
    config: &Config,
) -> anyhow::Result<Box<dyn ForecastSource>> {
    let url = kind.url(&config.backend_base())?;
    Ok(Box::new(HttpSource::new(url)))
}
