//! Command-line runner.
//!
//! Usage: `rootbench [settings.toml]`. Without a path the built-in
//! `x^3 - 2*x - 5` on `[2, 3]` study runs. `ROOTBENCH_LOG` overrides the
//! log filter from the settings.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rootbench::expression::engine::SymbolicEngine;
use rootbench::presentation::terminal::TerminalPresenter;
use rootbench::settings::StudySettings;
use rootbench::study::{run_study, StudyOutcome};


fn main() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => StudySettings::from_file(&path)
            .with_context(|| format!("loading settings from {path}"))?,
        None => StudySettings::default(),
    };

    let filter = EnvFilter::try_from_env("ROOTBENCH_LOG")
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let request = settings.into_request()?;
    info!(expression = %request.expression, a = request.a, b = request.b, "starting study");

    let mut presenter = TerminalPresenter::stdout();
    match run_study(&SymbolicEngine, &request, &mut presenter)? {
        StudyOutcome::Bracketed(summary) => {
            if let Ok(newton) = &summary.newton {
                println!(
                    "Newton: root={} iterations={}",
                    newton.root.map_or_else(|| "n/a".to_string(), |r| r.to_string()),
                    newton.iterations,
                );
            }
        }
        StudyOutcome::NoBracket => {}
    }

    Ok(())
}
