//! Response composition: turn the original query, with or without a weather
//! reading, into the prompt that produces the user-facing answer.

use crate::{
    error::AgentError,
    llm::{SYSTEM_PROMPT, TextGenerator},
    model::WeatherReading,
};

/// Answer the query grounded in a fetched weather reading.
pub async fn with_weather(
    llm: &dyn TextGenerator,
    query: &str,
    reading: &WeatherReading,
) -> Result<String, AgentError> {
    llm.generate(&weather_prompt(query, reading), Some(SYSTEM_PROMPT)).await
}

/// Answer the query directly, with no weather context.
pub async fn general(llm: &dyn TextGenerator, query: &str) -> Result<String, AgentError> {
    llm.generate(&general_prompt(query), Some(SYSTEM_PROMPT)).await
}

/// Answer the query after a failed weather fetch; the prompt tells the model
/// that live data is unavailable so it can say so when it matters.
pub async fn general_fallback(llm: &dyn TextGenerator, query: &str) -> Result<String, AgentError> {
    llm.generate(&fallback_prompt(query), Some(SYSTEM_PROMPT)).await
}

/// Fixed human-readable rendering of every reading field.
pub fn weather_context(reading: &WeatherReading) -> String {
    format!(
        "Weather data for {}:\n\
         - Temperature: {}°C\n\
         - Feels like: {}°C\n\
         - Conditions: {}\n\
         - Humidity: {}%\n\
         - Wind: {} m/s\n\
         - Pressure: {} hPa\n\
         - Observed at: {}",
        reading.location_name,
        reading.temperature_c,
        reading.feels_like_c,
        reading.condition,
        reading.humidity_pct,
        reading.wind_speed_mps,
        reading.pressure_hpa,
        reading.observed_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

pub fn weather_prompt(query: &str, reading: &WeatherReading) -> String {
    format!(
        "User asked: \"{query}\"\n\
         \n\
         Using this weather data:\n\
         {}\n\
         \n\
         Generate a detailed, helpful response answering the user's question specifically.\n\
         Include relevant numbers and practical advice when appropriate.",
        weather_context(reading),
    )
}

pub fn general_prompt(query: &str) -> String {
    format!("User asked: \"{query}\"\n\nProvide a helpful response.")
}

pub fn fallback_prompt(query: &str) -> String {
    format!(
        "User asked: \"{query}\"\n\
         \n\
         Live weather data could not be retrieved just now. Provide a helpful response from\n\
         general knowledge, and mention that current conditions are unavailable if they matter\n\
         to the answer."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    /// Echoes its full prompt back, so tests can assert on what the model saw.
    #[derive(Debug)]
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(
            &self,
            prompt: &str,
            context: Option<&str>,
        ) -> Result<String, AgentError> {
            Ok(crate::llm::join_prompt(prompt, context))
        }
    }

    fn paris_reading() -> WeatherReading {
        WeatherReading {
            location_name: "Paris".into(),
            temperature_c: 18.0,
            feels_like_c: 17.0,
            condition: "clear sky".into(),
            humidity_pct: 40,
            wind_speed_mps: 10.0,
            pressure_hpa: 1015.0,
            observed_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn context_block_renders_every_field() {
        let block = weather_context(&paris_reading());

        assert!(block.contains("Paris"));
        assert!(block.contains("18"));
        assert!(block.contains("17"));
        assert!(block.contains("clear sky"));
        assert!(block.contains("40%"));
        assert!(block.contains("10"));
        assert!(block.contains("1015 hPa"));
        assert!(block.contains("2024-06-01"));
    }

    #[tokio::test]
    async fn augmented_prompt_carries_the_reading_to_the_model() {
        let seen = with_weather(&EchoGenerator, "Should I cycle to work?", &paris_reading())
            .await
            .expect("compose must succeed");

        assert!(seen.contains("18"));
        assert!(seen.contains("clear sky"));
        assert!(seen.contains("40%"));
        assert!(seen.contains("10"));
        assert!(seen.contains("Should I cycle to work?"));
        // Every call carries the system directive up front.
        assert!(seen.starts_with(SYSTEM_PROMPT));
    }

    #[tokio::test]
    async fn general_prompt_carries_only_the_query() {
        let seen = general(&EchoGenerator, "Tell me a joke").await.expect("compose must succeed");

        assert!(seen.contains("Tell me a joke"));
        assert!(!seen.contains("Weather data for"));
    }

    #[tokio::test]
    async fn fallback_prompt_flags_missing_live_data() {
        let seen = general_fallback(&EchoGenerator, "What's it like outside in Oslo?")
            .await
            .expect("compose must succeed");

        assert!(seen.contains("could not be retrieved"));
        assert!(seen.contains("What's it like outside in Oslo?"));
    }
}
