use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, path::PathBuf, str::FromStr};

/// The provider returns at most this many forecast days after today.
pub const MAX_FORECAST_DAYS: u8 = 5;

pub const DEFAULT_LOCATION: &str = "Waterloo, ON";

/// Measurement system used for the provider query and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    #[default]
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    /// Unit flag understood by the provider (`c` / `f`).
    pub fn provider_flag(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "c",
            UnitSystem::Imperial => "f",
        }
    }

    pub fn speed_unit(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/h",
            UnitSystem::Imperial => "mph",
        }
    }

    /// HTML degree suffix, e.g. `&#176;C`.
    pub fn degrees_html(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "&#176;C",
            UnitSystem::Imperial => "&#176;F",
        }
    }
}

/// How much of the weather the renderer shows. Has no effect on mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Simple,
    Today,
    Partial,
    Forecast,
    #[default]
    Full,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Simple => "simple",
            View::Today => "today",
            View::Partial => "partial",
            View::Forecast => "forecast",
            View::Full => "full",
        }
    }

    pub const fn all() -> &'static [View] {
        &[View::Simple, View::Today, View::Partial, View::Forecast, View::Full]
    }
}

/// Display language for day names and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }
}

macro_rules! str_enum_impls {
    ($ty:ident, $what:literal, [$($variant:ident),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = anyhow::Error;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let lower = value.to_lowercase();
                $(
                    if lower == $ty::$variant.as_str() {
                        return Ok($ty::$variant);
                    }
                )+
                Err(anyhow!(
                    "Unknown {} '{value}'. Supported: {}.",
                    $what,
                    [$($ty::$variant.as_str()),+].join(", ")
                ))
            }
        }
    };
}

str_enum_impls!(UnitSystem, "unit system", [Metric, Imperial]);
str_enum_impls!(View, "view", [Simple, Today, Partial, Forecast, Full]);
str_enum_impls!(Language, "language", [Es, En]);

/// Caller-supplied overrides. Anything left `None` takes the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<UnitSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<View>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl WidgetOptions {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(&self, other: &WidgetOptions) -> WidgetOptions {
        WidgetOptions {
            location: other.location.clone().or_else(|| self.location.clone()),
            forecast_days: other.forecast_days.or(self.forecast_days),
            units: other.units.or(self.units),
            view: other.view.or(self.view),
            language: other.language.or(self.language),
        }
    }
}

/// Validated, immutable widget configuration.
///
/// Built once from [`WidgetOptions`]; `forecast_days` is clamped to
/// `0..=MAX_FORECAST_DAYS` here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetConfig {
    location: String,
    forecast_days: u8,
    units: UnitSystem,
    view: View,
    language: Language,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::from_options(&WidgetOptions::default())
    }
}

impl WidgetConfig {
    pub fn from_options(options: &WidgetOptions) -> Self {
        let requested = options.forecast_days.unwrap_or(i64::from(MAX_FORECAST_DAYS));
        let forecast_days = requested.clamp(0, i64::from(MAX_FORECAST_DAYS)) as u8;
        if i64::from(forecast_days) != requested {
            tracing::debug!(requested, forecast_days, "Clamped forecast days");
        }

        Self {
            location: options.location.clone().unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            forecast_days,
            units: options.units.unwrap_or_default(),
            view: options.view.unwrap_or_default(),
            language: options.language.unwrap_or_default(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Number of days after today to include in the forecast.
    pub fn forecast_days(&self) -> u8 {
        self.forecast_days
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Persisted defaults for the command-line host.
///
/// Example TOML:
/// ```toml
/// endpoint = "https://query.yahooapis.com/v1/public/yql"
///
/// [widget]
/// location = "Lima, PE"
/// forecast_days = 3
/// units = "metric"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides the provider endpoint, e.g. for a self-hosted mirror.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    pub widget: WidgetOptions,
}

impl Settings {
    /// Load settings from the platform config dir, or defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Save settings to the platform config dir, creating parent directories.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("settings.toml"))
    }
}
