use std::sync::Arc;

use crate::{
    config::WidgetConfig,
    error::FetchError,
    fetch::WeatherFetcher,
    model::Weather,
    render::{HtmlRenderer, Renderer},
};

/// One displayed weather widget: its configuration, how it fetches and
/// renders, and the last weather it fetched.
///
/// `refresh` takes `&mut self`, so a widget never has two fetches in flight.
pub struct WeatherWidget {
    config: WidgetConfig,
    fetcher: WeatherFetcher,
    renderer: Arc<dyn Renderer>,
    weather: Option<Weather>,
}

impl std::fmt::Debug for WeatherWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherWidget")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher)
            .field("weather", &self.weather)
            .finish_non_exhaustive()
    }
}

impl WeatherWidget {
    pub fn new(config: WidgetConfig, fetcher: WeatherFetcher) -> Self {
        Self { config, fetcher, renderer: Arc::new(HtmlRenderer), weather: None }
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Weather from the last successful refresh.
    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    /// Fetch fresh weather and replace the cached value.
    ///
    /// On error the previous value is kept untouched.
    pub async fn refresh(&mut self) -> Result<&Weather, FetchError> {
        let weather = self.fetcher.fetch(&self.config).await?;
        Ok(&*self.weather.insert(weather))
    }

    /// Markup for the cached weather, if any has been fetched.
    pub fn render(&self) -> Option<String> {
        self.weather.as_ref().map(|w| self.renderer.render(w, &self.config))
    }

    pub fn render_error(&self, error: &FetchError) -> String {
        self.renderer.render_error(error, &self.config)
    }

    /// Refresh, then render either the weather or the error panel.
    pub async fn refresh_and_render(&mut self) -> Result<String, (FetchError, String)> {
        match self.fetcher.fetch(&self.config).await {
            Ok(weather) => {
                let html = self.renderer.render(&weather, &self.config);
                self.weather = Some(weather);
                Ok(html)
            }
            Err(err) => {
                let panel = self.render_error(&err);
                Err((err, panel))
            }
        }
    }
}
