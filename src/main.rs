use anyhow::{Context, Result};
use clap::Parser;
use keycalc::calculator::{Engine, parse_keys};
use keycalc::config::EngineConfig;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// keycalc - press calculator keys from the command line
#[derive(Parser, Debug)]
#[command(name = "keycalc", version)]
#[command(
    about = "Feed key presses to a calculator engine and print its display",
    long_about = None
)]
struct Args {
    /// Configuration file (defaults to <config dir>/keycalc/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the engine snapshot as JSON instead of the display text
    #[arg(long)]
    json: bool,

    /// Keys to press, e.g. "(2+3)*4=". Reads lines from stdin when omitted.
    keys: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::load_default().context("loading default config")?,
    };
    let mut engine = Engine::with_config(config);

    if args.keys.is_empty() {
        run_interactive(&mut engine, args.json)
    } else {
        press(&mut engine, &args.keys.join(" "))?;
        print_state(&engine, args.json)
    }
}

/// Apply every line of stdin to the same engine, printing after each.
fn run_interactive(engine: &mut Engine, json: bool) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if let Err(e) = press(engine, &line) {
            eprintln!("{:#}", e);
            continue;
        }
        print_state(engine, json)?;
    }
    Ok(())
}

fn press(engine: &mut Engine, keys: &str) -> Result<()> {
    let inputs = parse_keys(keys).with_context(|| format!("in keys {:?}", keys))?;
    for input in inputs {
        engine.apply(input);
    }
    Ok(())
}

fn print_state(engine: &Engine, json: bool) -> Result<()> {
    let snapshot = engine.snapshot();
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut stdout, &snapshot)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", snapshot.summary())?;
    }
    Ok(())
}
