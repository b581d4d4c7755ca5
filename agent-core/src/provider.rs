use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::AgentError, model::WeatherReading};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Abstraction over live weather lookup by place name.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, location: &str) -> Result<WeatherReading, AgentError>;
}
