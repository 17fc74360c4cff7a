use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use subway_line::config::ReplayConfig;
use subway_line::script::{self, LineSummary, Script, ScriptError};
use subway_line::store::{JsonFileStore, JsonFileStoreConfig};

fn main() -> ExitCode {
    let config = ReplayConfig::from_env();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(script_path) = std::env::args().nth(1) else {
        eprintln!("usage: subway-line <script.json>");
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  LINE_STORE_PATH  - segment store file (default line_store.json)");
        eprintln!("  LINE_LOG         - log filter (default info)");
        return ExitCode::FAILURE;
    };

    match run(&config, &script_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, script = %script_path, "Replay failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ReplayConfig, script_path: &str) -> Result<(), ScriptError> {
    let contents = std::fs::read_to_string(script_path)?;
    let script = Script::from_json(&contents)?;

    let mut store = JsonFileStore::new(JsonFileStoreConfig::new(&config.store_path));
    info!(
        line = %script.line.id,
        steps = script.steps.len(),
        store = %store.path().display(),
        "Replaying script"
    );

    let replay = script::replay(&script, &mut store)?;
    info!(
        applied = replay.applied,
        rejected = replay.rejected.len(),
        "Replay complete"
    );

    let summary = LineSummary::from_line(&replay.line)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
