use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::{
    error::AgentError,
    llm::truncate_body,
    model::WeatherReading,
};

use super::WeatherProvider;

/// Current-weather lookup against the OpenWeather city-name endpoint, metric
/// units.
///
/// The credential check happens before any network I/O; the query builder
/// percent-encodes the place name.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: Option<String>,
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl OpenWeatherProvider {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        Self::with_base_url(api_key, timeout, "https://api.openweathermap.org".to_string())
    }

    /// Same provider, pointed at an explicit base URL.
    pub fn with_base_url(api_key: Option<String>, timeout: Duration, base_url: String) -> Self {
        Self { api_key, http: Client::new(), base_url, timeout }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, location: &str) -> Result<WeatherReading, AgentError> {
        let api_key = self.api_key.as_deref().ok_or(AgentError::MissingCredential)?;

        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(url)
            .timeout(self.timeout)
            .query(&[("q", location), ("units", "metric"), ("appid", api_key)])
            .send()
            .await
            .map_err(|e| AgentError::WeatherUnreachable(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| AgentError::WeatherUnreachable(e.to_string()))?;

        if !status.is_success() {
            return Err(AgentError::WeatherApi {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| AgentError::MalformedWeatherResponse(e.to_string()))?;

        // An empty `weather` array is a defect to surface, not a default.
        let condition = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| {
                AgentError::MalformedWeatherResponse("weather[0].description is absent".to_string())
            })?;

        let observed_at = parsed
            .dt
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        Ok(WeatherReading {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            condition,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            observed_at,
        })
    }
}
