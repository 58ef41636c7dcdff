use std::str::FromStr;
use tracing::Level;
use crate::core::domain::{LogSettings, ServerMode};

fn parse_level(level: &str) -> Level {
    Level::from_str(level.trim()).unwrap_or(Level::INFO)
}

pub(crate) fn setup_tracing(log: &LogSettings, mode: ServerMode) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(parse_level(log.level.as_str()))
        // disable printing the name of the module in every log line.
        .with_target(false);
    let res = match (mode, log.json) {
        // CloudWatch adds the ingestion time and does not render ANSI codes.
        (ServerMode::Lambda, true) => builder.with_ansi(false).without_time().json().try_init(),
        (ServerMode::Lambda, false) => builder.with_ansi(false).without_time().try_init(),
        (ServerMode::Http, true) => builder.with_ansi(false).json().try_init(),
        (ServerMode::Http, false) => builder.try_init(),
    };
    if let Err(err) = res {
        eprintln!("tracing already initialized: {}", err);
    }
}
