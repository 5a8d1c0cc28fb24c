use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use flight_price_predictor::{
    domain::{FieldError, ResultView, SubmitError, TripField},
    infra::{EstimateError, EstimatorClient},
    util::{
        config::{AppConfig, ConfigError},
        version::{version_label, APP_NAME},
    },
    PredictorSession,
};

#[derive(Parser, Debug)]
#[command(name = "flight-price-predictor", version, about = "Estimate a flight fare")]
struct Cli {
    #[arg(long)]
    airline: Option<String>,
    #[arg(long)]
    source_city: Option<String>,
    #[arg(long)]
    departure_time: Option<String>,
    #[arg(long)]
    stops: Option<String>,
    #[arg(long)]
    arrival_time: Option<String>,
    #[arg(long)]
    destination_city: Option<String>,
    #[arg(long = "class")]
    travel_class: Option<String>,
    /// Departure date as YYYY-MM-DD, today or later.
    #[arg(long)]
    departure_date: Option<String>,

    /// Config file (defaults to ./predictor.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the estimation service base URL.
    #[arg(long)]
    base_url: Option<String>,
    /// HTTP timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the accepted values for every field and exit.
    #[arg(long)]
    list_options: bool,
}

impl Cli {
    fn field_values(&self) -> [(TripField, Option<&str>); 8] {
        [
            (TripField::Airline, self.airline.as_deref()),
            (TripField::SourceCity, self.source_city.as_deref()),
            (TripField::DepartureTime, self.departure_time.as_deref()),
            (TripField::Stops, self.stops.as_deref()),
            (TripField::ArrivalTime, self.arrival_time.as_deref()),
            (TripField::DestinationCity, self.destination_city.as_deref()),
            (TripField::Class, self.travel_class.as_deref()),
            (TripField::DepartureDate, self.departure_date.as_deref()),
        ]
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to initialise estimator client: {0}")]
    Client(#[from] EstimateError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode, CliError> {
    if cli.list_options {
        print_options();
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = &cli.base_url {
        config.estimator.base_url = base_url.clone();
    }
    if cli.timeout_secs.is_some() {
        config.estimator.timeout_secs = cli.timeout_secs;
    }

    let client = EstimatorClient::from_config(&config.estimator)?;
    tracing::info!(
        app = APP_NAME,
        version = %version_label(),
        endpoint = %client.endpoint(),
        "starting"
    );

    let session = PredictorSession::new(client);
    for (field, value) in cli.field_values() {
        if let Some(raw) = value {
            session.set_field(field, raw).await?;
        }
    }

    session.submit().await?;
    Ok(report(session.view().await))
}

fn report(view: ResultView) -> ExitCode {
    match view {
        ResultView::Prediction(prediction) => {
            println!("Estimated Flight Price: {}", prediction.price_label);
            println!("  Airline  {}", prediction.airline);
            println!("  Route    {}", prediction.route);
            println!("  Class    {}", prediction.class);
            println!("  Stops    {}", prediction.stops);
            ExitCode::SUCCESS
        }
        ResultView::Error(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
        ResultView::Empty | ResultView::Loading => ExitCode::FAILURE,
    }
}

fn print_options() {
    for field in TripField::ALL {
        let options = field.options();
        let accepted = if options.is_empty() {
            "YYYY-MM-DD (today or later, UTC)".to_string()
        } else {
            options.join(", ")
        };
        println!("--{:<17} {:<17} {accepted}", cli_flag(field), field.label());
    }
}

fn cli_flag(field: TripField) -> String {
    field.name().replace('_', "-")
}
