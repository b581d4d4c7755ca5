//! The query-routing agent: classify → (conditionally) fetch → compose.

use tracing::{debug, warn};

use crate::{
    classify::{self, Outcome},
    compose,
    config::AgentConfig,
    error::AgentError,
    llm::{OllamaClient, TextGenerator},
    model::IntentDecision,
    provider::{OpenWeatherProvider, WeatherProvider},
};

/// Sequences the pipeline for one query.
///
/// Classification failures (model unreachable, empty generation) propagate;
/// weather-fetch failures never do — they downgrade the answer to the
/// non-augmented path.
#[derive(Debug)]
pub struct WeatherAgent {
    llm: Box<dyn TextGenerator>,
    weather: Box<dyn WeatherProvider>,
    config: AgentConfig,
}

impl WeatherAgent {
    /// Build the production pipeline from configuration.
    pub fn new(config: AgentConfig) -> Self {
        let llm = Box::new(OllamaClient::new(&config));
        let weather = Box::new(OpenWeatherProvider::new(
            config.openweather_api_key.clone(),
            config.request_timeout(),
        ));

        Self::with_parts(config, llm, weather)
    }

    /// Assemble from explicit collaborators.
    pub fn with_parts(
        config: AgentConfig,
        llm: Box<dyn TextGenerator>,
        weather: Box<dyn WeatherProvider>,
    ) -> Self {
        Self { llm, weather, config }
    }

    /// Answer one query end to end.
    pub async fn answer(&self, query: &str) -> Result<String, AgentError> {
        let decision = match classify::classify(self.llm.as_ref(), query).await? {
            Outcome::Parsed(decision) => decision,
            Outcome::Unparseable => {
                debug!("classifier output was unparseable, treating as a general query");
                IntentDecision::default()
            }
        };

        let Some(location) = decision.decided_location(self.config.confidence_threshold) else {
            debug!("no weather needed, composing a general answer");
            return compose::general(self.llm.as_ref(), query).await;
        };

        match self.weather.current_weather(location).await {
            Ok(reading) => {
                debug!(location, "weather fetched, composing an augmented answer");
                compose::with_weather(self.llm.as_ref(), query, &reading).await
            }
            Err(err) => {
                warn!(%err, location, "weather fetch failed, answering without live data");
                compose::general_fallback(self.llm.as_ref(), query).await
            }
        }
    }
}
