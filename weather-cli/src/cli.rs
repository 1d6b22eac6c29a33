use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_core::{Config, SubmitOutcome, WeatherError, WeatherSession, provider_from_config};

use crate::render::{self, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather and 5-day forecast for a city"
)]
pub struct Cli {
    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save the OpenWeather API key to the config file.
    Configure,

    /// Show weather for a city once.
    Show {
        /// City name, e.g. "San Francisco".
        city: String,

        #[command(flatten)]
        view: ViewArgs,
    },

    /// Keep asking for cities until Esc or Ctrl-C.
    Interactive {
        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct ViewArgs {
    /// Print current conditions only.
    #[arg(long)]
    pub no_chart: bool,

    /// Chart width in columns.
    #[arg(long, default_value_t = DEFAULT_CHART_WIDTH, value_parser = clap::value_parser!(u16).range(20..))]
    pub width: u16,

    /// Chart height in rows.
    #[arg(long, default_value_t = DEFAULT_CHART_HEIGHT, value_parser = clap::value_parser!(u16).range(5..))]
    pub height: u16,
}

impl Default for ViewArgs {
    fn default() -> Self {
        Self {
            no_chart: false,
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let command = self.command.unwrap_or(Command::Interactive {
            view: ViewArgs::default(),
        });

        match command {
            Command::Configure => configure(),
            Command::Show { city, view } => show(city, view).await,
            Command::Interactive { view } => interactive(view).await,
        }
    }
}

fn open_session() -> anyhow::Result<WeatherSession> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(WeatherSession::new(provider))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        bail!("API key cannot be empty");
    }

    config.set_api_key(api_key);
    let path = config.save()?;
    tracing::info!(path = %path.display(), "saved API key");
    println!("Saved API key to {}", path.display());

    Ok(())
}

async fn show(city: String, view: ViewArgs) -> anyhow::Result<()> {
    let mut session = open_session()?;
    session.set_query(city);

    let outcome = session.submit().await?;
    report_failures(&outcome);
    print_views(&session, view);

    Ok(())
}

async fn interactive(view: ViewArgs) -> anyhow::Result<()> {
    let mut session = open_session()?;
    println!("Weather app");

    loop {
        let input = match Text::new("City:")
            .with_placeholder("e.g., San Francisco")
            .with_help_message("Enter to submit, Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                tracing::debug!("city prompt closed");
                break;
            }
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        session.set_query(input);
        match session.submit().await {
            Ok(SubmitOutcome::Ignored) => {}
            Ok(outcome) => {
                report_failures(&outcome);
                print_views(&session, view);
            }
            Err(err) => alert(&err),
        }
    }

    Ok(())
}

fn alert(err: &WeatherError) {
    tracing::debug!(error = %err, "alerting user");
    eprintln!("{}", alert_text(err));
}

fn alert_text(err: &WeatherError) -> String {
    format!("Error: {err}")
}

fn report_failures(outcome: &SubmitOutcome) {
    for err in outcome.failures() {
        tracing::debug!(endpoint = ?err.endpoint(), "reporting fetch failure");
        eprintln!("Warning: {err}");
    }
}

fn print_views(session: &WeatherSession, view: ViewArgs) {
    for line in render::conditions_view(session.current()) {
        println!("{line}");
    }

    if !view.no_chart {
        for line in render::forecast_view(session.forecast(), view.width, view.height) {
            println!("{line}");
        }
    }
}
