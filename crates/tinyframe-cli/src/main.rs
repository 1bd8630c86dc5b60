use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use tinyframe_core::{
    DecodeError, DeviceFamily, FormatError, PublishError, PublishRequest, Publisher, Route,
    ShadowEvent, Uplink, decode_frame, handle_uplink,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "tinyframe")]
#[command(version)]
#[command(
    about = "Decoder for LoRaWAN sensor tiny frames (OST trackers, SWX water probes).",
    long_about = None,
    after_help = "Examples:\n  tinyframe decode ost C00A0000000000000000140A\n  tinyframe handle swx 'events/*.json'\n  cat event.json | tinyframe handle ost -"
)]
struct Cli {
    /// Path to a TOML config file (default: ./tinyframe.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one hex frame and print its sensor data as JSON.
    Decode {
        /// Device family the frame comes from
        family: FamilyArg,

        /// Raw frame as hex digits
        frame: String,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default)
        #[arg(long)]
        compact: bool,
    },
    /// Handle shadow-update events and publish the envelopes to stdout.
    #[command(
        after_help = "Each published envelope is printed as one JSON line:\n  {\"topic\":...,\"qos\":...,\"payload\":{...}}"
    )]
    Handle {
        /// Device family of the events
        family: FamilyArg,

        /// Event file, glob pattern, or '-' for stdin
        events: String,

        /// Events are bare reported states, not shadow update documents
        #[arg(long)]
        flat: bool,

        /// Continue with the next event after a failure
        #[arg(long)]
        keep_going: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FamilyArg {
    Ost,
    Swx,
}

impl From<FamilyArg> for DeviceFamily {
    fn from(value: FamilyArg) -> Self {
        match value {
            FamilyArg::Ost => DeviceFamily::Ost,
            FamilyArg::Swx => DeviceFamily::Swx,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = Config::discover(cli.config.as_deref())
        .map_err(CliError::from)
        .and_then(|config| {
            init_logging(&config.log.level, cli.quiet);
            match cli.command {
                Commands::Decode {
                    family,
                    frame,
                    pretty,
                    compact,
                } => cmd_decode(family.into(), &frame, pretty, compact),
                Commands::Handle {
                    family,
                    events,
                    flat,
                    keep_going,
                } => cmd_handle(&config, family.into(), &events, flat, keep_going),
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn init_logging(level: &str, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

/// Writes each publish request to stdout as one JSON line.
struct StdoutPublisher<W: Write> {
    out: W,
}

impl<W: Write> Publisher for StdoutPublisher<W> {
    fn publish(&mut self, request: &PublishRequest<'_>) -> Result<(), PublishError> {
        let line =
            serde_json::to_string(request).map_err(|err| PublishError::new(err.to_string()))?;
        writeln!(self.out, "{line}")
            .and_then(|()| self.out.flush())
            .map_err(|err| PublishError::new(err.to_string()))
    }
}

fn cmd_decode(
    family: DeviceFamily,
    frame: &str,
    pretty: bool,
    compact: bool,
) -> Result<(), CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let data = decode_frame(family, frame).map_err(|err| decode_error(family, err))?;
    let json = if pretty {
        serde_json::to_string_pretty(&data)
    } else {
        serde_json::to_string(&data)
    }
    .context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

fn decode_error(family: DeviceFamily, err: DecodeError) -> CliError {
    let hint = match &err {
        DecodeError::Format(FormatError::WrongLength { .. })
        | DecodeError::Format(FormatError::OddLength { .. }) => Some(format!(
            "{family} frames are exactly {} hex digits",
            family.layout().frame_len
        )),
        DecodeError::Format(FormatError::InvalidHexCharacter { .. }) => {
            Some("frames may only contain 0-9, a-f and A-F".to_string())
        }
        DecodeError::Range { .. } => Some(format!(
            "check that the frame comes from the {family} device family"
        )),
        _ => None,
    };
    CliError::new(err.to_string(), hint)
}

fn cmd_handle(
    config: &Config,
    family: DeviceFamily,
    events: &str,
    flat: bool,
    keep_going: bool,
) -> Result<(), CliError> {
    let route = config.routes.route(family);
    let mut publisher = StdoutPublisher {
        out: io::stdout().lock(),
    };

    if events == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read event from stdin")?;
        let uplink = parse_event(&raw, flat).map_err(|err| event_error("<stdin>", err))?;
        return handle_one("<stdin>", family, &uplink, &route, &mut publisher);
    }

    let inputs = resolve_event_paths(events)?;
    let total = inputs.len();
    let mut failed = 0usize;
    for path in &inputs {
        let label = path.display().to_string();
        let outcome = read_event(path, flat)
            .and_then(|uplink| handle_one(&label, family, &uplink, &route, &mut publisher));
        if let Err(err) = outcome {
            failed += 1;
            if !keep_going {
                return Err(err);
            }
            warn!(input = %label, error = %err, "skipping event");
        }
    }

    if failed > 0 {
        return Err(CliError::new(
            format!("{failed} of {total} events failed"),
            Some("set RUST_LOG=debug for per-event details".to_string()),
        ));
    }
    Ok(())
}

fn handle_one<P: Publisher>(
    label: &str,
    family: DeviceFamily,
    uplink: &Uplink,
    route: &Route,
    publisher: &mut P,
) -> Result<(), CliError> {
    let response = handle_uplink(family, uplink, route, publisher);
    info!(input = %label, status = response.status_code, body = %response.body, "event handled");
    if response.is_success() {
        return Ok(());
    }
    let reason = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(response.body);
    Err(CliError::new(
        format!("{label}: {reason}"),
        Some(format!("check that the event comes from the {family} device family")),
    ))
}

fn parse_event(raw: &str, flat: bool) -> serde_json::Result<Uplink> {
    if flat {
        serde_json::from_str(raw)
    } else {
        serde_json::from_str::<ShadowEvent>(raw).map(|event| event.reported().clone())
    }
}

fn event_error(label: &str, err: serde_json::Error) -> CliError {
    CliError::new(
        format!("{label}: invalid event JSON: {err}"),
        Some("expected a shadow update document; use --flat for a bare reported state".to_string()),
    )
}

fn read_event(path: &Path, flat: bool) -> Result<Uplink, CliError> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {}", path.display()))?;
    let label = path.display().to_string();
    parse_event(&raw, flat).map_err(|err| event_error(&label, err))
}

fn resolve_event_paths(events: &str) -> Result<Vec<PathBuf>, CliError> {
    if !is_glob_pattern(events) {
        let path = PathBuf::from(events);
        if !path.is_file() {
            return Err(CliError::new(
                format!("event file not found: {}", path.display()),
                Some("pass a JSON file, a quoted glob pattern, or '-' for stdin".to_string()),
            ));
        }
        return Ok(vec![path]);
    }

    let paths = glob(events).map_err(|err| {
        CliError::new(
            format!("invalid event pattern '{}'", events),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid event pattern '{}'", events),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }
    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", events),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    matches.sort();
    Ok(matches)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
