//! blendmatch command-line front end.
//!
//! Reads an inventory (JSON array of strain rows) and an intent, prints the
//! recommendation as JSON on stdout. Logs go to stderr, filtered by `RUST_LOG`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use blendmatch::{
    load_rows, parse_interpretation, BlendEngine, BlendError, DataError, EngineConfig,
    IntentPreset, IntentVector,
};

/// Where the intent comes from.
enum IntentSource {
    Preset(IntentPreset),
    /// File holding an interpreter reply (JSON, possibly wrapped in prose).
    Reply(PathBuf),
}

struct Args {
    inventory: PathBuf,
    intent: IntentSource,
    config: Option<PathBuf>,
}

fn usage() {
    println!("blendmatch - terpene blend recommender");
    println!();
    println!("USAGE:");
    println!("    blendmatch --inventory <FILE> (--preset <NAME> | --reply <FILE>) [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -i, --inventory <FILE>    JSON array of strain rows");
    println!("    -p, --preset <NAME>       sleep | calm | focus | energize | create | relief");
    println!("    -r, --reply <FILE>        interpreter reply containing an intent object");
    println!("    -c, --config <FILE>       engine config (TOML)");
    println!("    -h, --help                Print help information");
}

fn parse_preset(name: &str) -> Option<IntentPreset> {
    IntentPreset::ALL
        .into_iter()
        .find(|p| p.label().eq_ignore_ascii_case(name))
}

fn parse_args() -> Result<Option<Args>, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut inventory = None;
    let mut intent = None;
    let mut config = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .cloned()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match flag {
            "--inventory" | "-i" => inventory = Some(PathBuf::from(value()?)),
            "--preset" | "-p" => {
                let name = value()?;
                let preset = parse_preset(&name).ok_or_else(|| format!("unknown preset: {name}"))?;
                intent = Some(IntentSource::Preset(preset));
            }
            "--reply" | "-r" => intent = Some(IntentSource::Reply(PathBuf::from(value()?))),
            "--config" | "-c" => config = Some(PathBuf::from(value()?)),
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 2;
    }

    Ok(Some(Args {
        inventory: inventory.ok_or("--inventory is required")?,
        intent: intent.ok_or("one of --preset or --reply is required")?,
        config,
    }))
}

fn read(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|e| DataError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn run(args: &Args) -> Result<String, BlendError> {
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let intent: IntentVector = match &args.intent {
        IntentSource::Preset(preset) => preset.intent(),
        IntentSource::Reply(path) => {
            let parsed = parse_interpretation(&read(path)?)?;
            if !parsed.explanation.is_empty() {
                tracing::info!(explanation = %parsed.explanation, "interpreted intent");
            }
            parsed.intent
        }
    };

    let rows = load_rows(&args.inventory)?;

    let recommendation = BlendEngine::new(config).recommend_rows(&intent, &rows)?;
    let json = serde_json::to_string_pretty(&recommendation).map_err(|e| DataError::Encode {
        what: "recommendation".to_string(),
        message: e.to_string(),
    })?;
    Ok(json)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            usage();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) if e.is_no_recommendation() => {
            eprintln!("no recommendation available: {e}");
            ExitCode::from(3)
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
