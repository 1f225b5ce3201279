use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select, Text};
use weather_widget_core::{
    Language, Settings, UnitSystem, View, WeatherFetcher, WeatherWidget,
    WidgetConfig, WidgetOptions, config::MAX_FORECAST_DAYS,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Weather widget host")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively choose the default widget settings.
    Configure,

    /// Fetch weather once and print the widget markup.
    Show {
        /// Location name, e.g. "Waterloo, ON". Falls back to the saved setting.
        location: Option<String>,

        /// Forecast days after today (0-5).
        #[arg(long)]
        days: Option<i64>,

        /// metric or imperial.
        #[arg(long)]
        units: Option<UnitSystem>,

        /// simple, today, partial, forecast or full.
        #[arg(long)]
        view: Option<View>,

        /// es or en.
        #[arg(long)]
        lang: Option<Language>,

        /// Print the normalized weather as JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, days, units, view, lang, json } => {
                let flags = WidgetOptions { location, forecast_days: days, units, view, language: lang };
                show(flags, json).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut settings = Settings::load()?;
    let config = WidgetConfig::from_options(&settings.widget);

    let location = Text::new("Location:")
        .with_default(config.location())
        .prompt()
        .context("Location prompt aborted")?;

    let forecast_days = CustomType::<i64>::new("Forecast days (0-5):")
        .with_default(i64::from(config.forecast_days()))
        .with_error_message("Please enter a whole number")
        .prompt()
        .context("Forecast days prompt aborted")?;

    let units = Select::new("Units:", vec![UnitSystem::Imperial, UnitSystem::Metric])
        .with_starting_cursor(usize::from(config.units() == UnitSystem::Metric))
        .prompt()
        .context("Units prompt aborted")?;

    let views = View::all().to_vec();
    let cursor = views.iter().position(|v| *v == config.view()).unwrap_or_default();
    let view = Select::new("View:", views)
        .with_starting_cursor(cursor)
        .prompt()
        .context("View prompt aborted")?;

    let language = Select::new("Language:", vec![Language::Es, Language::En])
        .with_starting_cursor(usize::from(config.language() == Language::En))
        .prompt()
        .context("Language prompt aborted")?;

    if !(0..=i64::from(MAX_FORECAST_DAYS)).contains(&forecast_days) {
        println!("Forecast days will be limited to 0..={MAX_FORECAST_DAYS}.");
    }

    settings.widget = WidgetOptions {
        location: Some(location),
        forecast_days: Some(forecast_days),
        units: Some(units),
        view: Some(view),
        language: Some(language),
    };

    let path = settings.save()?;
    println!("Settings saved to {}", path.display());
    Ok(())
}

async fn show(flags: WidgetOptions, json: bool) -> anyhow::Result<()> {
    let settings = Settings::load()?;
    let config = WidgetConfig::from_options(&settings.widget.merged_with(&flags));

    let mut fetcher = WeatherFetcher::http().context("Failed to build HTTP client")?;
    if let Some(endpoint) = settings.endpoint {
        fetcher = fetcher.with_endpoints([endpoint]);
    }

    let mut widget = WeatherWidget::new(config, fetcher);

    if json {
        let weather = widget.refresh().await?;
        println!("{}", serde_json::to_string_pretty(weather)?);
        return Ok(());
    }

    match widget.refresh_and_render().await {
        Ok(html) => {
            println!("{html}");
            Ok(())
        }
        Err((err, panel)) => {
            println!("{panel}");
            if let Some(payload) = err.payload() {
                tracing::debug!(%payload, "Provider payload");
            }
            bail!(err)
        }
    }
}
