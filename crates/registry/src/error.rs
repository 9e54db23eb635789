use thiserror::Error;

/// Wiring defects detected when a registry is frozen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// A route includes a route that was never declared.
	#[error("route '{route}' includes unknown route '{include}'")]
	UnknownInclude { route: String, include: String },
	/// Routes include each other in a loop.
	#[error("include cycle: {}", .cycle.join(" -> "))]
	IncludeCycle { cycle: Vec<String> },
}
