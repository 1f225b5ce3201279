//! Markup for a [`Weather`] value.
//!
//! Rendering is a collaborator of the widget, not part of the mapping core;
//! embedders with their own markup implement [`Renderer`].

use crate::{
    config::{Language, View, WidgetConfig},
    error::FetchError,
    model::Weather,
    wind::format_wind,
};

pub trait Renderer: Send + Sync {
    fn render(&self, weather: &Weather, config: &WidgetConfig) -> String;

    fn render_error(&self, error: &FetchError, config: &WidgetConfig) -> String;
}

/// Builds the widget's HTML fragment directly, without a template engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

struct Labels {
    humidity: &'static str,
    wind: &'static str,
    high: &'static str,
    low: &'static str,
    error: &'static str,
}

fn labels(language: Language) -> Labels {
    match language {
        Language::Es => Labels { humidity: "Humedad", wind: "Viento", high: "H", low: "L", error: "Error" },
        Language::En => Labels { humidity: "Humidity", wind: "Wind", high: "H", low: "L", error: "Error" },
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, weather: &Weather, config: &WidgetConfig) -> String {
        let view = config.view();
        let labels = labels(config.language());
        let degrees = config.units().degrees_html();
        let today = &weather.today;

        let mut main = String::new();

        if view != View::Forecast {
            main.push_str(&format!(
                r#"<div class="weather-block"><div class="temperature"><i class="{}"></i><span class="degrees-1">{}<sup>{}</sup></span><div class="day">{}</div></div>"#,
                escape(&today.icon_code),
                today.temp_now,
                degrees,
                escape(&today.day_name),
            ));

            if view != View::Simple {
                main.push_str(&format!(
                    "<ul><li>{} {}%</li><li>{} {}</li><li>{} {}<sup>{}</sup> {} {}<sup>{}</sup></li></ul>",
                    labels.humidity,
                    today.humidity,
                    labels.wind,
                    format_wind(today.wind_speed, today.wind_direction_deg, config.units()),
                    labels.high,
                    today.temp_max,
                    degrees,
                    labels.low,
                    today.temp_min,
                    degrees,
                ));
            }

            main.push_str(r#"</div><hr class="pst-block-hr">"#);
        }

        if !matches!(view, View::Simple | View::Today) {
            // The forecast view shows today in the list; the others already show it above.
            let start = if view == View::Forecast { 0 } else { 1 };
            main.push_str(r#"<div class="weather-days"><ul class="weather-days-list">"#);
            for day in weather.forecast.iter().skip(start) {
                main.push_str(&format!(
                    r#"<li><span class="degrees-2">{}<i class='degrees-ic-2'></i></span><div class="day">{}</div></li>"#,
                    day.temp_max,
                    escape(&day.day_name),
                ));
            }
            main.push_str("</ul></div>");
        }

        format!(
            r#"<div class="weather-widget {}"><div class="pst-block"><div class="pst-block-head"><h2 class="title-4"><strong><i class="li_location"></i> {}</strong></h2></div><div class="pst-block-main">{}</div></div></div>"#,
            view.as_str(),
            escape(&weather.location),
            main,
        )
    }

    fn render_error(&self, error: &FetchError, config: &WidgetConfig) -> String {
        format!(
            r#"<div class="weather-widget {}"><h2>{}</h2><p>{}</p></div>"#,
            config.view().as_str(),
            labels(config.language()).error,
            escape(&error.user_message()),
        )
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
