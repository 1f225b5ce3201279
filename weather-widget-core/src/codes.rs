//! Provider condition codes → widget icon identifiers.
//!
//! The provider documents codes `0..=47` plus `3200` ("not available"), but it
//! has been seen returning codes outside that set. Lookups never fail: anything
//! unknown resolves to [`ICON_NOT_AVAILABLE`].

/// Icon identifier used when the provider reports no usable condition.
pub const ICON_NOT_AVAILABLE: &str = "weather-icon-na";

/// Provider code for "not available".
pub const CODE_NOT_AVAILABLE: i64 = 3200;

const ICONS: [&str; 48] = [
    "900",                          // 0 tornado
    "weather-icon-windy-rain",      // 1 tropical storm
    "weather-icon-windy-rain2",     // 2 hurricane
    "weather-icon-clouds-flash",    // 3 severe thunderstorms
    "weather-icon-cloud-flash-alt", // 4 thunderstorms
    "weather-icon-snow",            // 5 mixed rain and snow
    "weather-icon-rain",            // 6 mixed rain and sleet
    "weather-icon-rain",            // 7 mixed snow and sleet
    "weather-icon-drizzle",         // 8 freezing drizzle
    "weather-icon-drizzle",         // 9 drizzle
    "weather-icon-rain",            // 10 freezing rain
    "weather-icon-rain",            // 11 showers
    "weather-icon-rain",            // 12 showers
    "weather-icon-snow-heavy",      // 13 snow flurries
    "weather-icon-snow",            // 14 light snow showers
    "weather-icon-snow",            // 15 blowing snow
    "weather-icon-snow-heavy",      // 16 snow
    "weather-icon-hail",            // 17 hail
    "weather-icon-rain",            // 18 sleet
    "weather-icon-mist",            // 19 dust
    "weather-icon-fog-sun",         // 20 foggy
    "weather-icon-fog-cloud",       // 21 haze
    "weather-icon-fog",             // 22 smoky
    "weather-icon-wind",            // 23 blustery
    "weather-icon-windy",           // 24 windy
    "weather-icon-snowflake",       // 25 cold
    "weather-icon-clouds",          // 26 cloudy
    "weather-icon-clouds",          // 27 mostly cloudy (night)
    "weather-icon-clouds",          // 28 mostly cloudy (day)
    "weather-icon-cloud-moon",      // 29 partly cloudy (night)
    "weather-icon-cloud-sun",       // 30 partly cloudy (day)
    "weather-icon-moon",            // 31 clear (night)
    "weather-icon-sun",             // 32 sunny
    "weather-icon-moon",            // 33 fair (night)
    "weather-icon-sun",             // 34 fair (day)
    "weather-icon-hail",            // 35 mixed rain and hail
    "weather-icon-temperature",     // 36 hot
    "weather-icon-windy-rain",      // 37 isolated thunderstorms
    "weather-icon-windy-rain",      // 38 scattered thunderstorms
    "weather-icon-windy-rain",      // 39 scattered thunderstorms
    "weather-icon-rain",            // 40 scattered showers
    "weather-icon-snow-heavy",      // 41 heavy snow
    "weather-icon-snow-alt",        // 42 scattered snow showers
    "weather-icon-snow-heavy",      // 43 heavy snow
    "weather-icon-cloud",           // 44 partly cloudy
    "weather-icon-clouds-flash",    // 45 thundershowers
    "weather-icon-snow-heavy",      // 46 snow showers
    "weather-icon-cloud-flash-alt", // 47 isolated thundershowers
];

/// Resolve a provider condition code to an icon identifier.
pub fn icon_for_code(code: i64) -> &'static str {
    match usize::try_from(code).ok().and_then(|idx| ICONS.get(idx)) {
        Some(&icon) => icon,
        None => {
            if code != CODE_NOT_AVAILABLE {
                tracing::warn!(code, "Undocumented provider condition code");
            }
            ICON_NOT_AVAILABLE
        }
    }
}
