use std::path::PathBuf;
use std::process::ExitCode;
#[cfg(target_os = "linux")]
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::Level;

use weii::actions::{self, BluetoothAddress};
use weii::config::AppConfig;
use weii::device::{EventSource, ReplaySource, SimulatedBoard, SimulationProfile};
use weii::error::{log_action_error, ActionError, ErrorCode, MeasurementError};
use weii::measurement::{measure_weight, MeasurementSettings};
use weii::output::{OutputFormat, Reporter, Verbosity};

#[derive(Parser, Debug)]
#[command(name = "weii", about = "Measure weight using a Wii Balance Board.")]
struct Cli {
    /// Adjust the final weight by some value (e.g. to match some other scale,
    /// or to account for clothing)
    #[arg(short, long, value_name = "KG", allow_negative_numbers = true)]
    adjust: Option<f64>,
    /// The command to run when done (use `{weight}` to pass the weight to the command)
    #[arg(short, long, value_name = "COMMAND")]
    command: Option<String>,
    /// Disconnect the board when done, so it turns off
    #[arg(short = 'd', long, value_name = "ADDRESS")]
    disconnect_when_done: Option<String>,
    /// Only print the final weight
    #[arg(short, long, default_value_t = false)]
    weight_only: bool,
    /// Minimum total weight (kg) that starts a measurement
    #[arg(long, value_name = "KG")]
    threshold: Option<f64>,
    /// Number of samples after which measuring stops
    #[arg(long, value_name = "N")]
    samples: Option<usize>,
    /// JSON config file (defaults to ./weii.json when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input device name of the board
    #[arg(long)]
    device_name: Option<String>,
    /// Replay recorded events from a JSON Lines file instead of a board
    #[arg(long, conflicts_with = "simulate")]
    replay: Option<PathBuf>,
    /// Simulate a person of this weight standing on a board
    #[arg(long, value_name = "KG")]
    simulate: Option<f64>,
    /// Seed for --simulate
    #[arg(long, requires = "simulate")]
    seed: Option<u64>,
    /// Print the measurement result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Increase diagnostic logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {}", user_message(&err));
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

/// Short message for errors the user can act on, full chain otherwise
fn user_message(err: &anyhow::Error) -> String {
    if let Some(err) = err.downcast_ref::<MeasurementError>() {
        if matches!(err, MeasurementError::Aborted) {
            return err.message();
        }
    }
    if let Some(err) = err.downcast_ref::<ActionError>() {
        if matches!(err, ActionError::InvalidAddress { .. }) {
            return err.message();
        }
    }
    format!("{err:#}")
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::load(),
    };

    let settings = resolve_settings(&cli, &config);
    settings.validate()?;

    let disconnect = cli
        .disconnect_when_done
        .as_deref()
        .filter(|address| !address.is_empty())
        .map(str::parse::<BluetoothAddress>)
        .transpose()?;

    let verbosity = if cli.weight_only {
        Verbosity::Terse
    } else {
        Verbosity::Verbose
    };
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut reporter = Reporter::stdout(verbosity, format);

    reporter.waiting_for_board()?;
    let mut source = open_source(&cli, &config)?;
    reporter.board_found()?;

    let result = measure_weight(&mut source, &settings, |event| {
        if let Err(err) = reporter.session_event(event) {
            tracing::warn!("Failed to write progress: {}", err);
        }
    })?;

    reporter.result(&result)?;

    if let Some(address) = disconnect {
        reporter.disconnecting()?;
        if let Err(err) = actions::disconnect(&address) {
            log_action_error(&err, "disconnect");
        }
    }

    if let Some(command) = cli.command.as_deref().filter(|command| !command.is_empty()) {
        if let Err(err) = actions::run_command(command, result.adjusted) {
            log_action_error(&err, "run_command");
        }
    }

    Ok(())
}

fn resolve_settings(cli: &Cli, config: &AppConfig) -> MeasurementSettings {
    let mut settings = config.measurement.to_settings();
    if let Some(adjust) = cli.adjust {
        settings.adjust = adjust;
    }
    if let Some(threshold) = cli.threshold {
        settings.threshold = threshold;
    }
    if let Some(samples) = cli.samples {
        settings.target = samples;
    }
    settings
}

fn open_source(cli: &Cli, config: &AppConfig) -> Result<Box<dyn EventSource>> {
    if let Some(path) = &cli.replay {
        let replay = ReplaySource::from_path(path)
            .with_context(|| format!("loading replay {}", path.display()))?;
        return Ok(Box::new(replay));
    }

    if let Some(weight) = cli.simulate {
        let mut profile = SimulationProfile::new(weight);
        if let Some(seed) = cli.seed {
            profile.seed = seed;
        }
        return Ok(Box::new(SimulatedBoard::new(profile)));
    }

    let name = cli
        .device_name
        .clone()
        .unwrap_or_else(|| config.device.name.clone());
    open_board(&name, config)
}

#[cfg(target_os = "linux")]
fn open_board(name: &str, config: &AppConfig) -> Result<Box<dyn EventSource>> {
    let poll: Duration = config.device.poll_interval();
    let board = weii::device::wait_for_board(name, poll);
    tracing::info!("Using board at {}", board.path().display());
    Ok(Box::new(board))
}

#[cfg(not(target_os = "linux"))]
fn open_board(name: &str, _config: &AppConfig) -> Result<Box<dyn EventSource>> {
    Err(weii::error::DeviceError::Unsupported {
        reason: format!("reading {:?} requires the Linux input subsystem", name),
    }
    .into())
}
