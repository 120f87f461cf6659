//! Purpose: `goat` CLI entry point.
//! Role: Binary crate root; parses args, sets up logging, emits JSON on stdout.
//! Invariants: Successful commands print exactly one JSON document on stdout.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `to_exit_code`.
//! Invariants: Log output goes to stderr so stdout stays machine-readable.
use std::io::{self, IsTerminal, Write};

use clap::{Parser, Subcommand, error::ErrorKind as ClapErrorKind};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;

use goat::core::error::{Error, ErrorKind, to_exit_code};
use goat::{Counter, compute_triple};

const LOG_ENV: &str = "GOAT_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";
// Horns are added one increment at a time.
const MAX_DESCRIBE_HORNS: u32 = 1_000_000;

fn main() {
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(());
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `goat --help`."));
            }
        },
    };

    init_tracing(cli.log_level.as_deref())?;
    command_dispatch::dispatch_command(cli.command)
}

#[derive(Parser)]
#[command(
    name = "goat",
    version,
    about = "Count a goat's horns and triple numbers",
    long_about = None,
    after_help = r#"EXAMPLES
  $ goat demo
  $ goat describe --horns 2
  # {"horns":2,"description":"This goat has 2 horns."}
  $ goat triple 1431655766
  # {"input":1431655766,"triple":2}"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        global = true,
        help = "Log filter directive (overrides GOAT_LOG; default: warn)"
    )]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Triple 4 and give a fresh goat two horns")]
    Demo,
    #[command(about = "Describe a goat after adding horns to it")]
    Describe {
        #[arg(
            long,
            default_value_t = 0,
            value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_DESCRIBE_HORNS)),
            help = "How many horns to add (at most 1000000)"
        )]
        horns: u32,
    },
    #[command(about = "Triple a number with 32-bit wraparound")]
    Triple {
        #[arg(help = "Unsigned 32-bit input")]
        value: u32,
    },
}

fn init_tracing(directive: Option<&str>) -> Result<(), Error> {
    let env_filter = match directive {
        Some(directive) => EnvFilter::try_new(directive).map_err(|err| {
            Error::new(ErrorKind::Usage)
                .with_message(format!("invalid --log-level '{directive}'"))
                .with_hint("Use a filter like `debug` or `goat=trace`.")
                .with_source(err)
        })?,
        None => EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
    Ok(())
}

#[derive(Debug, Serialize)]
struct GoatReport {
    horns: u32,
    description: String,
}

impl From<&Counter> for GoatReport {
    fn from(counter: &Counter) -> Self {
        Self {
            horns: counter.horns(),
            description: counter.describe(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TripleReport {
    input: u32,
    triple: u32,
}

impl TripleReport {
    fn new(input: u32) -> Self {
        Self {
            input,
            triple: compute_triple(input),
        }
    }
}

#[derive(Debug, Serialize)]
struct DemoReport {
    triple: u32,
    goat: GoatReport,
}

fn emit_json(value: &impl Serialize) -> Result<(), Error> {
    let pretty = io::stdout().is_terminal();
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("json encode failed")
            .with_source(err)
    })?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write output")
            .with_source(err)
    })
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    err.message()
        .map(str::to_string)
        .unwrap_or_else(|| err.kind().label().to_lowercase())
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(err.kind().label()));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
