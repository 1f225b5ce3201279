use serde::{Deserialize, Serialize};

/// Normalized weather for one location, produced fresh by every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// `"<city>, <country>"`.
    pub location: String,
    pub city: String,
    pub today: DayConditions,
    /// Today at index 0, then one entry per requested forecast day.
    pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayConditions {
    pub temp_now: i64,
    pub temp_min: i64,
    pub temp_max: i64,
    pub description: String,
    pub icon_code: String,
    pub wind_speed: f64,
    pub wind_direction_deg: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub sunrise: String,
    pub sunset: String,
    pub day_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day_name: String,
    pub icon_code: String,
    pub description: String,
    pub temp_max: i64,
    pub temp_min: i64,
}
