use coco_primitives::CommandError;
use thiserror::Error;

/// A route could not be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	/// The resolver produced an empty route name.
	#[error("empty route name")]
	EmptyName,
	/// An `@` route was requested with taint in effect.
	#[error("route '{0}' is tainted, refusing to run")]
	Tainted(String),
	/// No route of this name is registered.
	#[error("route '{0}' does not exist")]
	NotFound(String),
}

/// A request could not be mapped to a route name.
#[derive(Debug, Error)]
pub enum ResolveError {
	/// No rule matched the request.
	#[error("could not resolve route '{0}'")]
	NoMatch(String),
	/// A route name is not a valid path pattern.
	#[error("bad route pattern '{pattern}'")]
	BadPattern {
		pattern: String,
		#[source]
		source: globset::Error,
	},
	/// Leading flags did not parse.
	#[error("invalid flags: {0}")]
	Flags(#[from] clap::Error),
	/// Failure from a resolver outside this crate.
	#[error(transparent)]
	Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Everything that can end a request unsuccessfully.
#[derive(Debug, Error)]
pub enum DispatchError {
	#[error(transparent)]
	Route(#[from] RouteError),
	#[error(transparent)]
	Resolve(#[from] ResolveError),
	/// A command aborted its route.
	#[error("command '{command}' on route '{route}' failed: {source}")]
	Fatal {
		route: String,
		command: String,
		#[source]
		source: CommandError,
	},
}

impl DispatchError {
	/// The route error, if this is one.
	pub fn as_route(&self) -> Option<&RouteError> {
		match self {
			Self::Route(e) => Some(e),
			_ => None,
		}
	}

	/// The command error, if a command aborted the request.
	pub fn as_fatal(&self) -> Option<&CommandError> {
		match self {
			Self::Fatal { source, .. } => Some(source),
			_ => None,
		}
	}
}
