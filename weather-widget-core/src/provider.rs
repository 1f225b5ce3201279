use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::{fmt::Debug, time::Duration};

use crate::{
    config::{UnitSystem, WidgetConfig},
    error::{TransportError, truncate_body},
};

pub mod yahoo;

pub use yahoo::DEFAULT_ENDPOINT;

/// What the transport needs to know to ask the provider for weather.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    pub location: String,
    /// `c` for metric, `f` for imperial.
    pub unit_flag: &'static str,
}

impl ProviderQuery {
    pub fn new(location: impl Into<String>, units: UnitSystem) -> Self {
        Self { location: location.into(), unit_flag: units.provider_flag() }
    }

    pub fn for_config(config: &WidgetConfig) -> Self {
        Self::new(config.location(), config.units())
    }
}

/// Outbound boundary to the weather provider.
///
/// Implementations issue one request and hand back the parsed JSON body.
/// Timeouts and TLS are theirs to handle.
#[async_trait]
pub trait WeatherTransport: Send + Sync + Debug {
    async fn get(&self, endpoint: &str, query: &ProviderQuery) -> Result<Value, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl WeatherTransport for HttpTransport {
    async fn get(&self, endpoint: &str, query: &ProviderQuery) -> Result<Value, TransportError> {
        tracing::debug!(endpoint, location = %query.location, units = query.unit_flag, "Requesting weather");

        let res = self.http.get(endpoint).query(&yahoo::query_params(query)).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
