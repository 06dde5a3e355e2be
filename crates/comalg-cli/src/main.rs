use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use comalg_thy::serde::to_canonical_json_pretty;
use comalg_thy::{ScenarioFile, TheoremChecker};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod render;

#[derive(Parser, Debug)]
#[command(
    name = "comalg",
    version,
    about = "Check projective and associated prime theorems on concrete modules"
)]
struct Cli {
    /// YAML file listing scenarios; the built-in set is used when omitted.
    #[arg(long, value_name = "FILE")]
    scenarios: Option<PathBuf>,
    /// Emit the full report as canonical JSON.
    #[arg(long)]
    json: bool,
}

/// Runs the checks and returns whether every scenario held.
fn execute(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let file = match &cli.scenarios {
        Some(path) => ScenarioFile::load(path)?,
        None => ScenarioFile::builtin(),
    };
    info!(scenarios = file.scenarios.len(), "loaded scenarios");
    let report = TheoremChecker::new().run(&file)?;

    let mut stdout = io::stdout().lock();
    if cli.json {
        writeln!(stdout, "{}", to_canonical_json_pretty(&report)?)?;
    } else {
        stdout.write_all(render::render_text(&report)?.as_bytes())?;
    }
    stdout.flush()?;
    Ok(report.all_hold)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
