//! Core library for the `weather-agent` CLI.
//!
//! This crate defines:
//! - Configuration handling (file + environment credential override)
//! - The language-model client and the `TextGenerator` seam
//! - The weather provider abstraction and its OpenWeather implementation
//! - Intent classification, response composition and the query-routing agent
//!
//! It is used by `agent-cli`, but can also be reused by other binaries or services.

pub mod agent;
pub mod classify;
pub mod compose;
pub mod config;
pub mod error;
pub mod llm;
pub mod model;
pub mod provider;

pub use agent::WeatherAgent;
pub use config::AgentConfig;
pub use error::AgentError;
pub use llm::{OllamaClient, TextGenerator};
pub use model::{IntentDecision, WeatherReading};
pub use provider::{OpenWeatherProvider, WeatherProvider};
