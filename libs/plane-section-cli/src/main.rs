//! `plane-section-cli` entry point.
//!
//! ```text
//! plane-section-cli sphere --radius 1 --out sphere.obj
//! plane-section-cli is_intersect --mesh sphere.obj --a 0 --b 0 --c 1 --d 0.5 --out cut.obj
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=plane_section=debug`)
//! for more than warnings.

use clap::Parser;
use log::error;
use plane_section_cli::{run, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(outcome) => outcome.into(),
        Err(err) => {
            error!("{err}");
            ExitCode::from(2)
        }
    }
}
