//! pathfmt CLI
//!
//! Usage:
//!   pathfmt [OPTIONS] <TEMPLATE> [VALUES]...
//!
//! Options:
//!   -c, --context <FILE>      TOML file with named formatters
//!   -s, --set <NAME=VALUE>    Add a named formatter (type is inferred)
//!   -z, --timezone <TZ>       Zone for --now and for values without an offset
//!       --now                 Register `now` with the current time
//!       --check               Only check the template syntax
//!   -v, --verbose             Increase log verbosity
//!   -h, --help                Print help

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use chrono_tz::Tz;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use pathfmt::config::{infer_value, parse_timezone, ContextFile};
use pathfmt::{ContextBuilder, Formatter, Template};

const SOURCE_NAME: &str = "<template>";

#[derive(Parser)]
#[command(name = "pathfmt")]
#[command(about = "Expand path templates with dates, counters and text")]
struct Cli {
    /// Template to expand, e.g. '${path}/app.${date - 1 day | %Y%m%d}.log'
    template: String,

    /// Positional values, appended after the named formatters
    values: Vec<String>,

    /// TOML file with named formatters
    #[arg(short, long)]
    context: Option<PathBuf>,

    /// Add a named formatter (NAME=VALUE)
    #[arg(short, long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Time zone for --now and for values without an offset (default: UTC, or the
    /// context file's zone)
    #[arg(short = 'z', long)]
    timezone: Option<String>,

    /// Register `now` with the current time
    #[arg(long)]
    now: bool,

    /// Only check the template syntax
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Error installing logger: {}", e);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let template = match Template::compile(&cli.template) {
        Ok(template) => template,
        Err(e) => {
            eprint!("{}", e.report(&cli.template, SOURCE_NAME));
            return ExitCode::FAILURE;
        }
    };

    if cli.check {
        println!("{} placeholder(s), syntax ok", template.placeholders().count());
        return ExitCode::SUCCESS;
    }

    // Load the context file first; its zone is the default for everything else
    let mut builder = ContextBuilder::new();
    let mut timezone = Tz::UTC;
    if let Some(path) = &cli.context {
        match ContextFile::from_file(path) {
            Ok(file) => {
                timezone = file.timezone;
                builder = file.apply(builder);
            }
            Err(e) => {
                eprintln!("Error loading context '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(name) = &cli.timezone {
        match parse_timezone(name) {
            Ok(tz) => timezone = tz,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    for (name, value) in &cli.set {
        builder = builder.add_formatter(name, infer_value(value, timezone));
    }
    if cli.now {
        let now = Utc::now().with_timezone(&timezone);
        builder = builder.add_formatter("now", Formatter::Time(now));
    }
    for value in &cli.values {
        builder = builder.push(infer_value(value, timezone));
    }

    let context = match builder.build() {
        Ok(context) => context,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match template.render(&context) {
        Ok(path) => {
            println!("{}", path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}", e.report(&cli.template, SOURCE_NAME));
            ExitCode::FAILURE
        }
    }
}
