//! Provider response → [`Weather`].

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    codes::icon_for_code,
    config::{Language, WidgetConfig},
    day_name::day_name,
    error::FetchError,
    model::{DayConditions, ForecastDay, Weather},
    provider::yahoo::{self, Channel, Envelope, Forecast, Scalar},
};

/// Date format used by the provider for forecast entries, e.g. `19 Oct 2026`.
const FORECAST_DATE_FORMAT: &str = "%d %b %Y";

/// Map a provider response into the widget model.
///
/// `today` is the date used for `today.day_name`; every forecast entry takes
/// its day name from its own date. The result depends on nothing else, so
/// the same inputs always give the same `Weather`.
pub fn map(raw: &Value, config: &WidgetConfig, today: NaiveDate) -> Result<Weather, FetchError> {
    if let Err(problem) = yahoo::check_envelope(raw) {
        tracing::warn!(reason = problem.reason(), "Refusing to map rejected provider response");
        return Err(problem.into_error(raw.clone()));
    }

    let envelope = Envelope::deserialize(raw).map_err(|e| FetchError::malformed(e.to_string()))?;
    let channel = envelope.query.results.channel;

    let wanted = usize::from(config.forecast_days()) + 1;
    let available = channel.item.forecast.len();
    if available < wanted {
        return Err(FetchError::malformed(format!(
            "forecast has {available} entries, {wanted} required"
        )));
    }

    let language = config.language();
    let today = map_today(&channel, today, language)?;

    let forecast = channel.item.forecast[..wanted]
        .iter()
        .enumerate()
        .map(|(i, day)| map_forecast_day(day, i, language))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(city = %channel.location.city, days = forecast.len(), "Mapped provider response");

    Ok(Weather {
        location: format!("{}, {}", channel.location.city, channel.location.country),
        city: channel.location.city,
        today,
        forecast,
    })
}

/// [`map`] using the local calendar date as today.
pub fn map_now(raw: &Value, config: &WidgetConfig) -> Result<Weather, FetchError> {
    map(raw, config, Local::now().date_naive())
}

fn map_today(channel: &Channel, today: NaiveDate, language: Language) -> Result<DayConditions, FetchError> {
    let condition = &channel.item.condition;
    // Presence is checked by the caller; min/max for today come from forecast[0].
    let first = &channel.item.forecast[0];

    Ok(DayConditions {
        temp_now: round_temp(&condition.temp, "item.condition.temp")?,
        temp_min: round_temp(&first.low, "item.forecast[0].low")?,
        temp_max: round_temp(&first.high, "item.forecast[0].high")?,
        description: sentence_case(&condition.text),
        icon_code: icon_for(&condition.code),
        wind_speed: number(&channel.wind.speed, "wind.speed")?,
        wind_direction_deg: number(&channel.wind.direction, "wind.direction")?,
        humidity: number(&channel.atmosphere.humidity, "atmosphere.humidity")?,
        pressure: number(&channel.atmosphere.pressure, "atmosphere.pressure")?,
        sunrise: channel.astronomy.sunrise.to_uppercase(),
        sunset: channel.astronomy.sunset.to_uppercase(),
        day_name: day_name(&today, language).to_string(),
    })
}

fn map_forecast_day(day: &Forecast, idx: usize, language: Language) -> Result<ForecastDay, FetchError> {
    let date = NaiveDate::parse_from_str(day.date.trim(), FORECAST_DATE_FORMAT).map_err(|e| {
        FetchError::malformed(format!("item.forecast[{idx}].date '{}': {e}", day.date))
    })?;

    Ok(ForecastDay {
        day_name: day_name(&date, language).to_string(),
        icon_code: icon_for(&day.code),
        description: sentence_case(&day.text),
        temp_max: round_temp(&day.high, &format!("item.forecast[{idx}].high"))?,
        temp_min: round_temp(&day.low, &format!("item.forecast[{idx}].low"))?,
    })
}

fn number(value: &Scalar, field: &str) -> Result<f64, FetchError> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::malformed(format!("{field} is not a number: {value:?}")))
}

/// Round half away from zero: `68.5 -> 69`, `-68.5 -> -69`.
fn round_temp(value: &Scalar, field: &str) -> Result<i64, FetchError> {
    Ok(number(value, field)?.round() as i64)
}

fn icon_for(code: &Scalar) -> String {
    // Non-integral codes are as unknown as out-of-table ones.
    icon_for_code(code.as_i64().unwrap_or(-1)).to_string()
}

/// Upper-case the first character, leave the rest untouched.
pub fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
