use agent_core::{AgentConfig, WeatherAgent};
use clap::{Parser, Subcommand};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-agent", version, about = "Weather-aware query agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask a question; live weather data is fetched automatically when needed.
    Ask {
        /// The question; remaining arguments are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Store the OpenWeather API key in the configuration file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Ask { query } => ask(&query.join(" ")).await,
            Command::Configure => configure(),
        }
    }
}

async fn ask(query: &str) -> anyhow::Result<()> {
    let config = AgentConfig::load()?;
    let agent = WeatherAgent::new(config);

    let answer = agent.answer(query).await?;
    println!("{answer}");

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = AgentConfig::load()?;

    let key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()?;

    config.openweather_api_key = Some(key);
    config.save()?;

    println!("Saved configuration to {}", AgentConfig::config_file_path()?.display());
    Ok(())
}
