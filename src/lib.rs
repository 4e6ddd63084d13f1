//! restful is a thin HTTP reverse proxy over a single JSON "posts" resource.
//!
//! Six routes (list, get, create, update, patch, delete) forward the
//! inbound body and a filtered header set to the upstream API, then relay
//! its JSON response, or a normalized error envelope, back to the caller.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Server startup.
//! - [`error`] -- Crate and forwarding error types using `thiserror`.
//! - [`health`] -- `GET /health` endpoint handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`posts`] -- The `Post` wire shape.
//! - [`proxy`] -- Route table, forwarding client, header merge, status
//!   classification, and response writing.
//! - [`server`] -- Shared application state, the router, and graceful shutdown.
//! - [`upstream`] -- Upstream base URL validation and target URL building.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod error;
pub mod health;
pub mod logging;
pub mod posts;
pub mod proxy;
pub mod server;
pub mod upstream;
