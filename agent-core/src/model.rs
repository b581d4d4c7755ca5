use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single current-weather observation, produced by a
/// [`WeatherProvider`](crate::provider::WeatherProvider) and consumed exactly
/// once when composing an augmented answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: f64,
    pub observed_at: DateTime<Utc>,
}

/// The classifier's verdict on a single query, parsed from unstructured
/// model output.
///
/// The model is asked for `needs_weather`, but replies observed in the wild
/// use older spellings, hence the aliases.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentDecision {
    #[serde(default, alias = "needsWeather", alias = "needsWeatherData", alias = "fetch")]
    pub needs_weather: bool,

    #[serde(default)]
    pub location: Option<String>,

    /// Reported certainty in 0..1; absent when the model omits it.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl IntentDecision {
    /// The location to fetch weather for, if this decision warrants a fetch.
    ///
    /// Returns `Some` only when `needs_weather` is set, a non-empty location
    /// was extracted, and any reported confidence meets `threshold`. A
    /// decision without a confidence value is taken at face value.
    pub fn decided_location(&self, threshold: f64) -> Option<&str> {
        if !self.needs_weather {
            return None;
        }
        if let Some(confidence) = self.confidence {
            if confidence < threshold {
                return None;
            }
        }
        self.location.as_deref().map(str::trim).filter(|loc| !loc.is_empty())
    }
}
