//! Response shape and query language of the Yahoo weather YQL endpoint.
//!
//! Scalar fields arrive as strings (`"68"`) from the public endpoint and as
//! numbers from some mirrors, so they are kept as [`Scalar`] until mapping.

use serde::Deserialize;
use serde_json::Value;

use super::ProviderQuery;
use crate::error::FetchError;

pub const DEFAULT_ENDPOINT: &str = "https://query.yahooapis.com/v1/public/yql";

const YQL_ENV: &str = "store://datatables.org/alltableswithkeys";

/// Description the provider puts on the channel when the lookup failed.
const ERROR_DESCRIPTION_MARKER: &str = "Weather Error";

/// Build the YQL statement for a query.
pub fn yql_statement(query: &ProviderQuery) -> String {
    let location = query.location.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "select * from weather.forecast where woeid in \
         (select woeid from geo.places(1) where text='{location}') AND u='{}'",
        query.unit_flag
    )
}

/// URL query parameters for one request.
pub fn query_params(query: &ProviderQuery) -> Vec<(&'static str, String)> {
    vec![
        ("q", yql_statement(query)),
        ("env", YQL_ENV.to_string()),
        ("format", "json".to_string()),
    ]
}

/// Why a response envelope was rejected before mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeProblem {
    /// The provider answered but reported no results or an error.
    Provider(&'static str),
    /// The envelope itself is not shaped like a provider response.
    Malformed(&'static str),
}

impl EnvelopeProblem {
    pub fn reason(&self) -> &'static str {
        match self {
            EnvelopeProblem::Provider(reason) | EnvelopeProblem::Malformed(reason) => reason,
        }
    }

    /// Turn the problem into the matching [`FetchError`], keeping the payload
    /// for provider-side failures.
    pub fn into_error(self, payload: Value) -> FetchError {
        match self {
            EnvelopeProblem::Provider(_) => FetchError::Provider { payload },
            EnvelopeProblem::Malformed(reason) => FetchError::malformed(reason),
        }
    }
}

/// Best-effort check of a response envelope before mapping.
///
/// The provider has no structured error signal, so a provider-side failure is
/// sniffed from a top-level `error` object, a zero result count, or the
/// channel description. An envelope without a usable `query.count` is
/// malformed rather than a provider error.
pub fn check_envelope(payload: &Value) -> Result<(), EnvelopeProblem> {
    if payload.get("error").is_some_and(|e| !e.is_null()) {
        return Err(EnvelopeProblem::Provider("provider returned an error object"));
    }

    let Some(query) = payload.get("query").filter(|q| q.is_object()) else {
        return Err(EnvelopeProblem::Malformed("response has no query envelope"));
    };

    let Some(count) = query.get("count") else {
        return Err(EnvelopeProblem::Malformed("query envelope has no result count"));
    };
    let count = Scalar::from_value(count)
        .and_then(|c| c.as_i64())
        .filter(|c| *c >= 0)
        .ok_or(EnvelopeProblem::Malformed("query result count is not a whole number"))?;
    if count == 0 {
        return Err(EnvelopeProblem::Provider("provider returned zero results"));
    }

    let description = payload
        .pointer("/query/results/channel/description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if description.contains(ERROR_DESCRIPTION_MARKER) {
        return Err(EnvelopeProblem::Provider("provider flagged the channel as an error"));
    }

    Ok(())
}

/// A provider scalar that may be encoded as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn from_value(value: &Value) -> Option<Scalar> {
        match value {
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Integral value, e.g. a condition code. `"32.0"` is accepted.
    pub fn as_i64(&self) -> Option<i64> {
        let value = self.as_f64()?;
        (value.fract() == 0.0 && value.is_finite()).then_some(value as i64)
    }
}

#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub query: Query,
}

#[derive(Debug, Deserialize)]
pub struct Query {
    pub results: Results,
}

#[derive(Debug, Deserialize)]
pub struct Results {
    pub channel: Channel,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    pub location: Location,
    pub wind: Wind,
    pub atmosphere: Atmosphere,
    pub astronomy: Astronomy,
    pub item: Item,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub direction: Scalar,
    pub speed: Scalar,
}

#[derive(Debug, Deserialize)]
pub struct Atmosphere {
    pub humidity: Scalar,
    pub pressure: Scalar,
}

#[derive(Debug, Deserialize)]
pub struct Astronomy {
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Deserialize)]
pub struct Item {
    pub condition: Condition,
    pub forecast: Vec<Forecast>,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub code: Scalar,
    pub temp: Scalar,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Forecast {
    pub code: Scalar,
    pub date: String,
    pub high: Scalar,
    pub low: Scalar,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UnitSystem;
    use serde_json::json;

    fn query(location: &str) -> ProviderQuery {
        ProviderQuery::new(location, UnitSystem::Metric)
    }

    #[test]
    fn yql_statement_embeds_location_and_unit() {
        let stmt = yql_statement(&query("Waterloo, ON"));
        assert_eq!(
            stmt,
            "select * from weather.forecast where woeid in \
             (select woeid from geo.places(1) where text='Waterloo, ON') AND u='c'"
        );
    }

    #[test]
    fn yql_statement_escapes_quotes() {
        let stmt = yql_statement(&query("St John's"));
        assert!(stmt.contains(r"text='St John\'s'"));
    }

    #[test]
    fn params_request_json() {
        let params = query_params(&query("Lima"));
        assert!(params.contains(&("format", "json".to_string())));
        assert!(params.iter().any(|(k, v)| *k == "env" && v.starts_with("store://")));
    }

    #[test]
    fn zero_count_is_a_provider_problem() {
        let payload = json!({ "query": { "count": 0, "results": null } });
        assert_eq!(
            check_envelope(&payload),
            Err(EnvelopeProblem::Provider("provider returned zero results"))
        );

        let payload = json!({ "query": { "count": "0" } });
        assert!(matches!(check_envelope(&payload), Err(EnvelopeProblem::Provider(_))));
    }

    #[test]
    fn error_description_is_a_provider_problem() {
        let payload = json!({
            "query": {
                "count": 1,
                "results": { "channel": { "description": "Yahoo! Weather Error" } }
            }
        });
        assert!(matches!(check_envelope(&payload), Err(EnvelopeProblem::Provider(_))));
    }

    #[test]
    fn error_object_is_a_provider_problem() {
        let payload = json!({ "error": { "description": "bad query" } });
        assert!(matches!(check_envelope(&payload), Err(EnvelopeProblem::Provider(_))));
    }

    #[test]
    fn missing_envelope_is_malformed() {
        assert_eq!(
            check_envelope(&json!({})),
            Err(EnvelopeProblem::Malformed("response has no query envelope"))
        );
        assert!(matches!(
            check_envelope(&json!({ "something": "else" })),
            Err(EnvelopeProblem::Malformed(_))
        ));
        assert!(matches!(check_envelope(&json!({ "query": null })), Err(EnvelopeProblem::Malformed(_))));
    }

    #[test]
    fn missing_or_non_numeric_count_is_malformed() {
        let no_count = json!({ "query": { "results": { "channel": {} } } });
        assert_eq!(
            check_envelope(&no_count),
            Err(EnvelopeProblem::Malformed("query envelope has no result count"))
        );

        for count in [json!("many"), json!(1.5), json!(-1), json!(null), json!([1])] {
            let payload = json!({ "query": { "count": count, "results": { "channel": {} } } });
            assert!(
                matches!(check_envelope(&payload), Err(EnvelopeProblem::Malformed(_))),
                "count {count}"
            );
        }
    }

    #[test]
    fn integral_float_count_is_accepted() {
        let payload = json!({ "query": { "count": 1.0, "results": { "channel": {} } } });
        assert_eq!(check_envelope(&payload), Ok(()));

        let payload = json!({ "query": { "count": "2", "results": { "channel": {} } } });
        assert_eq!(check_envelope(&payload), Ok(()));
    }

    #[test]
    fn healthy_envelope_passes() {
        let payload = json!({
            "query": {
                "count": 1,
                "results": { "channel": { "description": "Yahoo! Weather for Waterloo, ON, CA" } }
            }
        });
        assert_eq!(check_envelope(&payload), Ok(()));
    }

    #[test]
    fn problems_become_matching_fetch_errors() {
        let payload = json!({ "query": { "count": 0 } });
        let err = EnvelopeProblem::Provider("provider returned zero results").into_error(payload.clone());
        assert!(matches!(err, FetchError::Provider { payload: ref p } if *p == payload));

        let err = EnvelopeProblem::Malformed("response has no query envelope").into_error(json!({}));
        assert!(matches!(err, FetchError::MalformedResponse(ref msg) if msg == "response has no query envelope"));
    }

    #[test]
    fn scalar_accepts_strings_and_numbers() {
        let s: Scalar = serde_json::from_value(json!("68.5")).unwrap();
        assert_eq!(s.as_f64(), Some(68.5));

        let n: Scalar = serde_json::from_value(json!(32)).unwrap();
        assert_eq!(n.as_i64(), Some(32));

        let bad: Scalar = serde_json::from_value(json!("n/a")).unwrap();
        assert_eq!(bad.as_f64(), None);

        let frac: Scalar = serde_json::from_value(json!("3.5")).unwrap();
        assert_eq!(frac.as_i64(), None);
    }
}
