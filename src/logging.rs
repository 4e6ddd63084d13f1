//! Process-wide `tracing` subscriber.
//!
//! JSON lines by default; human-readable output when stdout is a
//! terminal or `--pretty` is given. `--json` always wins.

use std::io::IsTerminal;

use crate::cli::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn from_flags(pretty: bool, json: bool) -> Self {
        Self::pick(pretty, json, std::io::stdout().is_terminal())
    }

    const fn pick(pretty: bool, json: bool, tty: bool) -> Self {
        if !json && (pretty || tty) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

pub fn init(level: &LogLevel, format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_max_level(level.to_tracing_level());
    match format {
        LogFormat::Json => builder.json().with_target(false).init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}
