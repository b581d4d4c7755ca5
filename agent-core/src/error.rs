use thiserror::Error;

/// Failure taxonomy for the query pipeline.
///
/// The routing agent distinguishes weather-side failures (recovered by
/// answering without live data) from language-model failures (propagated to
/// the process boundary).
#[derive(Debug, Error)]
pub enum AgentError {
    /// The generation endpoint was unreachable, timed out, or replied with a
    /// non-success status or an undecodable payload.
    #[error("language model endpoint unreachable: {0}")]
    ModelUnavailable(String),

    /// The generation endpoint replied successfully but supplied no text.
    #[error("language model returned an empty generation")]
    EmptyGeneration,

    /// No OpenWeather API key is configured.
    #[error(
        "no OpenWeather API key configured.\n\
         Hint: run `weather-agent configure` or set OPENWEATHER_API_KEY."
    )]
    MissingCredential,

    /// OpenWeather replied with a non-success HTTP status.
    #[error("OpenWeather request failed with status {status}: {body}")]
    WeatherApi { status: u16, body: String },

    /// The OpenWeather request could not be completed (transport failure or
    /// timeout).
    #[error("failed to reach OpenWeather: {0}")]
    WeatherUnreachable(String),

    /// OpenWeather replied successfully but the body was missing expected
    /// fields.
    #[error("OpenWeather response missing expected fields: {0}")]
    MalformedWeatherResponse(String),
}

impl AgentError {
    /// True for failures on the weather-fetch side of the pipeline, which the
    /// agent recovers from by falling back to a non-augmented answer.
    pub fn is_weather_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential
                | Self::WeatherApi { .. }
                | Self::WeatherUnreachable(_)
                | Self::MalformedWeatherResponse(_)
        )
    }
}
