//! Core library for the weather widget.
//!
//! This crate defines:
//! - Widget configuration and persisted settings
//! - The transport boundary to the weather provider and its HTTP implementation
//! - Mapping of provider responses into the normalized [`Weather`] model
//! - Derived values: icon codes, day names, compass points, wind text
//! - HTML rendering and the [`WeatherWidget`] that ties it together
//!
//! It is used by `weather-widget-cli`, but can be embedded by any host that
//! wants the normalized model or the widget markup.

pub mod codes;
pub mod compass;
pub mod config;
pub mod day_name;
pub mod error;
pub mod fetch;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod render;
pub mod widget;
pub mod wind;

pub use codes::{ICON_NOT_AVAILABLE, icon_for_code};
pub use compass::{CompassPoint, degrees_to_compass};
pub use config::{Language, Settings, UnitSystem, View, WidgetConfig, WidgetOptions};
pub use day_name::day_name;
pub use error::{FetchError, TransportError};
pub use fetch::WeatherFetcher;
pub use model::{DayConditions, ForecastDay, Weather};
pub use provider::{HttpTransport, ProviderQuery, WeatherTransport};
pub use render::{HtmlRenderer, Renderer};
pub use widget::WeatherWidget;
pub use wind::format_wind;
