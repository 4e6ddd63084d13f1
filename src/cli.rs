//! Command-line interface definitions using clap derive macros.
//!
//! `restful` takes no subcommands; [`RunArgs`] configures the server.
//! Every flag has an environment variable equivalent for container
//! deployments.

use clap::{Args, Parser, ValueEnum};

use crate::proxy::client::DEFAULT_BODY_LIMIT;
use crate::upstream::DEFAULT_UPSTREAM;

#[derive(Parser)]
#[command(
    name = "restful",
    version,
    about = "Thin reverse proxy over a JSON posts API",
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        restful                                  Serve on :8080\n  \
        restful -p 9000 --pretty                 Local dev mode\n  \
        restful -u http://localhost:3000/posts   Proxy a local upstream"
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Base URL of the upstream posts resource
    #[arg(short, long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM)]
    pub upstream: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Max inbound request body size in bytes; larger bodies get a
    /// `server_error` envelope and are never forwarded
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = DEFAULT_BODY_LIMIT,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
