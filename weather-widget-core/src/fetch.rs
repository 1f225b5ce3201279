use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::{
    config::WidgetConfig,
    error::{FetchError, TransportError},
    mapper,
    model::Weather,
    provider::{DEFAULT_ENDPOINT, HttpTransport, ProviderQuery, WeatherTransport, yahoo},
};

/// Requests weather from every configured endpoint and maps the combined
/// result.
///
/// All requests run concurrently and must all succeed; the first failure
/// aborts the rest.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    transport: Arc<dyn WeatherTransport>,
    endpoints: Vec<String>,
}

impl WeatherFetcher {
    pub fn new(transport: Arc<dyn WeatherTransport>) -> Self {
        Self { transport, endpoints: vec![DEFAULT_ENDPOINT.to_string()] }
    }

    /// HTTP fetcher against the public provider endpoint.
    pub fn http() -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new()?)))
    }

    /// Replace the endpoint list. An empty list is ignored.
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let endpoints: Vec<String> = endpoints.into_iter().map(Into::into).collect();
        if !endpoints.is_empty() {
            self.endpoints = endpoints;
        }
        self
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    #[tracing::instrument(skip(self, config), fields(location = config.location()))]
    pub async fn fetch(&self, config: &WidgetConfig) -> Result<Weather, FetchError> {
        let query = ProviderQuery::for_config(config);
        let responses = self.request_all(&query).await?;

        let mut validated = Vec::with_capacity(responses.len());
        for payload in responses {
            if let Err(problem) = yahoo::check_envelope(&payload) {
                tracing::warn!(reason = problem.reason(), payload = %payload, "Rejected provider response");
                return Err(problem.into_error(payload));
            }
            validated.push(payload);
        }

        let combined = combine_responses(validated);
        let weather = mapper::map_now(&combined, config)?;

        tracing::info!(location = %weather.location, days = weather.forecast.len(), "Fetched weather");
        Ok(weather)
    }

    /// Issue one request per endpoint and wait for all of them, in endpoint
    /// order.
    async fn request_all(&self, query: &ProviderQuery) -> Result<Vec<Value>, TransportError> {
        let mut set = JoinSet::new();
        for (idx, endpoint) in self.endpoints.iter().enumerate() {
            let transport = Arc::clone(&self.transport);
            let endpoint = endpoint.clone();
            let query = query.clone();
            set.spawn(async move { (idx, transport.get(&endpoint, &query).await) });
        }

        let mut results: Vec<Option<Value>> = vec![None; self.endpoints.len()];
        while let Some(joined) = set.join_next().await {
            let (idx, result) = joined?;
            match result {
                Ok(payload) => results[idx] = Some(payload),
                Err(err) => {
                    tracing::warn!(endpoint = %self.endpoints[idx], error = %err, "Weather request failed");
                    // Dropping the set aborts whatever is still in flight.
                    return Err(err);
                }
            }
        }

        Ok(results.into_iter().flatten().collect())
    }
}

/// Fold several provider responses into one payload for mapping.
///
/// Objects are merged key by key, later responses winning on conflicts;
/// anything that is not an object is replaced outright.
pub fn combine_responses(responses: Vec<Value>) -> Value {
    let mut iter = responses.into_iter();
    let Some(mut combined) = iter.next() else {
        return Value::Null;
    };
    for next in iter {
        merge_into(&mut combined, next);
    }
    combined
}

fn merge_into(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}
