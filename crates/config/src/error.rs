//! Error types for manifest loading.

use std::path::PathBuf;

use coco_registry::RegistryError;
use thiserror::Error;

/// Errors that can occur when loading a route manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a manifest file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A command step names a handler the catalog does not have.
	#[error("route '{route}' uses unknown handler '{handler}'")]
	UnknownHandler { route: String, handler: String },

	/// A step is neither a command nor an include.
	#[error("route '{route}' step {index}: {reason}")]
	InvalidStep {
		route: String,
		index: usize,
		reason: &'static str,
	},

	/// The declared routes do not freeze into a registry.
	#[error(transparent)]
	Registry(#[from] RegistryError),
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
