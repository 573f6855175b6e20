use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use wind_core::{
    Config, EndpointKind, ForecastSample, ForecastView, Payload, ViewState, WeatherSummary,
    present::{self, Render, Slider},
    provision::Provisioning,
    source::source_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wind", version, about = "Hourly wind forecast client")]
pub struct Cli {
    /// Backend base URL; overrides WIND_BACKEND_URL and the config file.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Read hourly data through the reverse-proxied `/api/hourly` path.
    #[arg(long, global = true)]
    pub proxied: bool,

    /// Log fetch diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every hourly card and the hour slider.
    Show,

    /// Show the card and indicator for one hour of the forecast.
    Now {
        /// Slider position; clamped to the last available hour.
        #[arg(long)]
        hour: Option<usize>,
    },

    /// Show only the first hourly sample.
    First,

    /// Show the forecast location from `/weather`.
    Coords,

    /// Interactively set the backend URL and endpoint.
    Configure,

    /// Print the Mongo init script that creates the application user.
    SeedScript {
        /// Application user name.
        #[arg(long)]
        user: Option<String>,

        /// Application user password.
        #[arg(long)]
        password: Option<String>,

        /// Database to grant `readWrite` on.
        #[arg(long)]
        database: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        config.apply_backend_override(self.backend.clone());
        self.run_with(config).await
    }

    async fn run_with(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Show => {
                let kind = list_endpoint(self.proxied, &config)?;
                let state = mount_and_wait::<Vec<ForecastSample>>(kind, &config).await?;
                println!("{}", present::render_state(&state));

                if let ViewState::Ready(samples) = &state {
                    let mut slider = Slider::new(samples.len());
                    slider.select(config.selected_hour.unwrap_or(0));
                    println!("\n{}", slider.track(samples));
                }
            }
            Command::Now { hour } => {
                let kind = list_endpoint(self.proxied, &config)?;
                let state = mount_and_wait::<Vec<ForecastSample>>(kind, &config).await?;
                print_selected(&state, hour.or(config.selected_hour));

                if let (Some(hour), ViewState::Ready(_)) = (hour, &state) {
                    Config::store_selected_hour(hour)?;
                }
            }
            Command::First => {
                let kind = list_endpoint(self.proxied, &config)?;
                let state = mount_and_wait::<ForecastSample>(kind, &config).await?;
                println!("{}", present::render_state(&state));
            }
            Command::Coords => {
                let state = mount_and_wait::<WeatherSummary>(EndpointKind::Weather, &config).await?;
                println!("{}", present::render_state(&state));
            }
            Command::Configure => configure(config)?,
            Command::SeedScript {
                user,
                password,
                database,
            } => {
                let defaults = Provisioning::default();
                let provisioning = Provisioning {
                    user: user.unwrap_or(defaults.user),
                    password: password.unwrap_or(defaults.password),
                    database: database.unwrap_or(defaults.database),
                    role: defaults.role,
                };
                print!("{}", provisioning.render_script()?);
            }
        }

        Ok(())
    }
}

/// Hourly endpoint for the list views; `--proxied` wins over the config file.
fn list_endpoint(proxied: bool, config: &Config) -> anyhow::Result<EndpointKind> {
    if proxied {
        return Ok(EndpointKind::Proxied);
    }

    match config.endpoint_kind()? {
        EndpointKind::Proxied => Ok(EndpointKind::Proxied),
        _ => Ok(EndpointKind::Hourly),
    }
}

/// Mount a fresh view for `kind` and wait for it to settle.
async fn mount_and_wait<T>(kind: EndpointKind, config: &Config) -> anyhow::Result<ViewState<T>>
where
    T: Payload + Clone,
{
    let source = source_from_config(kind, config)
        .with_context(|| format!("Invalid backend URL '{}'", config.backend_base()))?;

    let mut view = ForecastView::<T>::mount(source);
    Ok(view.settled().await)
}

fn print_selected(state: &ViewState<Vec<ForecastSample>>, hour: Option<usize>) {
    let ViewState::Ready(samples) = state else {
        println!("{}", present::render_state(state));
        println!("Indicator rotation: {}°", present::flipped_rotation(None));
        return;
    };

    let mut slider = Slider::new(samples.len());
    if let Some(hour) = hour {
        slider.select(hour);
    }

    let selected = slider.selected(samples);
    if let Some(sample) = selected {
        println!("{}", sample.render());
    }
    println!(
        "Indicator rotation: {}°",
        present::flipped_rotation(selected.and_then(|s| s.winddirection))
    );
    println!("\n{}", slider.track(samples));
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let backend = Text::new("Backend base URL:")
        .with_default(&config.backend_base())
        .prompt()
        .context("Backend URL prompt was cancelled")?;

    // Must be joinable by every endpoint.
    EndpointKind::Hourly.url(&backend)?;

    let (choices, start) = endpoint_choices(&config);
    let endpoint = Select::new("Hourly endpoint:", choices)
        .with_starting_cursor(start)
        .prompt()
        .context("Endpoint prompt was cancelled")?;

    config.backend_url = Some(backend);
    config.set_endpoint(endpoint);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}

/// Hourly endpoints offered by `configure`, and the cursor on the stored one.
///
/// An unreadable stored value starts the cursor on `hourly`.
fn endpoint_choices(config: &Config) -> (Vec<EndpointKind>, usize) {
    let choices = vec![EndpointKind::Hourly, EndpointKind::Proxied];
    let current = config.endpoint_kind().unwrap_or(EndpointKind::Hourly);
    let start = choices.iter().position(|k| *k == current).unwrap_or(0);
    (choices, start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_unknown_endpoint() -> Config {
        Config {
            endpoint: Some("daily".into()),
            ..Config::default()
        }
    }

    #[test]
    fn parses_now_with_hour() {
        let cli = Cli::try_parse_from(["wind", "now", "--hour", "6"]).unwrap();
        assert!(matches!(cli.command, Command::Now { hour: Some(6) }));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = ["wind", "show", "--backend", "http://pi:5000", "--proxied"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.backend.as_deref(), Some("http://pi:5000"));
        assert!(cli.proxied);
    }

    #[test]
    fn seed_script_accepts_credentials() {
        let cli = Cli::try_parse_from(["wind", "seed-script", "--user", "app", "--password", "pw"])
            .unwrap();

        match cli.command {
            Command::SeedScript {
                user,
                password,
                database,
            } => {
                assert_eq!(user.as_deref(), Some("app"));
                assert_eq!(password.as_deref(), Some("pw"));
                assert_eq!(database, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[tokio::test]
    async fn seed_script_ignores_unknown_endpoint() {
        let cli = Cli::try_parse_from(["wind", "seed-script"]).unwrap();
        assert!(cli.run_with(config_with_unknown_endpoint()).await.is_ok());
    }

    #[test]
    fn configure_tolerates_unknown_endpoint() {
        let (choices, start) = endpoint_choices(&config_with_unknown_endpoint());
        assert_eq!(choices[start], EndpointKind::Hourly);
    }

    #[test]
    fn configure_starts_on_stored_endpoint() {
        let mut cfg = Config::default();
        cfg.set_endpoint(EndpointKind::Proxied);

        let (choices, start) = endpoint_choices(&cfg);
        assert_eq!(choices[start], EndpointKind::Proxied);
    }

    #[test]
    fn list_views_report_unknown_endpoint() {
        let err = list_endpoint(false, &config_with_unknown_endpoint()).unwrap_err();
        assert!(err.to_string().contains("Unknown endpoint 'daily'"));
    }

    #[test]
    fn proxied_flag_wins_over_stored_endpoint() {
        let kind = list_endpoint(true, &config_with_unknown_endpoint()).unwrap();
        assert_eq!(kind, EndpointKind::Proxied);
    }
}
