//! Logging for routes and commands.
//!
//! All diagnostics go through `tracing`. [`LogSinks`] decides where formatted
//! output ends up and can be changed at runtime; [`init`] wires it into a
//! global subscriber.

use thiserror::Error;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

mod sinks;

pub use sinks::{LogSinks, SinkWriter};

/// Directive used when neither the caller nor `RUST_LOG` supplies one.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum LogError {
	#[error("invalid log filter: {0}")]
	Filter(#[from] ParseError),
	#[error("failed to install tracing subscriber: {0}")]
	Init(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Builds a subscriber that formats events into `sinks`.
pub fn subscriber(sinks: &LogSinks, filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
	tracing_subscriber::fmt()
		.with_writer(sinks.clone())
		.with_env_filter(filter)
		.with_ansi(false)
		.with_target(true)
		.finish()
}

/// Installs a global subscriber writing into `sinks`.
///
/// `RUST_LOG` takes precedence over `directives` when it is set.
pub fn init(sinks: &LogSinks, directives: &str) -> Result<(), LogError> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(directives)?,
	};
	tracing::subscriber::set_global_default(subscriber(sinks, filter))?;
	Ok(())
}
