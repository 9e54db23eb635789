//! The contract between routes and the commands they run.
//!
//! A command handler receives the request [`Context`] and its resolved
//! [`Params`], and returns either a value or an [`Interrupt`]. Whatever it
//! returns decides what the router does next.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::{Context, Params, Value};

/// Outcome of a single command invocation.
pub type CommandResult = Result<Value, Interrupt>;

type HandlerFn = dyn Fn(&mut Context, &Params) -> CommandResult + Send + Sync;

/// A shared, type-erased command handler.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
	/// Wraps a handler function.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(&mut Context, &Params) -> CommandResult + Send + Sync + 'static,
	{
		Self(Arc::new(f))
	}

	/// Invokes the handler.
	#[inline]
	pub fn call(&self, cxt: &mut Context, params: &Params) -> CommandResult {
		(self.0)(cxt, params)
	}

	/// Returns true if both handles wrap the same function.
	pub fn ptr_eq(&self, other: &Handler) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl fmt::Debug for Handler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Handler(..)")
	}
}

/// Out-of-band control signal returned by a command.
///
/// `Stop` and `Recoverable` carry the command's result, which the router
/// stores like any other. A fatal error stores nil.
#[derive(Debug, Clone)]
pub enum Interrupt {
	/// End the current route successfully; remaining commands are skipped.
	Stop(Value),
	/// Abandon the current route and continue with the named one.
	Reroute(String),
	/// Log the error and carry on with the next command.
	Recoverable { error: CommandError, value: Value },
	/// Abort the route and report the error to the caller.
	Fatal(CommandError),
}

impl Interrupt {
	/// Stops the route with a nil result.
	pub fn stop() -> Self {
		Self::Stop(Value::nil())
	}

	/// Stops the route, storing `value` as the command's result.
	pub fn stop_with(value: impl Into<Value>) -> Self {
		Self::Stop(value.into())
	}

	/// Hands off to `route`.
	pub fn reroute(route: impl Into<String>) -> Self {
		Self::Reroute(route.into())
	}

	/// A recoverable failure with a message and a nil result.
	pub fn recoverable(msg: impl Into<String>) -> Self {
		Self::recoverable_with(CommandError::Failed(msg.into()), Value::nil())
	}

	/// A recoverable failure that still yields `value`, such as partial output.
	pub fn recoverable_with(error: CommandError, value: impl Into<Value>) -> Self {
		Self::Recoverable {
			error,
			value: value.into(),
		}
	}

	/// A fatal failure with a message.
	pub fn fatal(msg: impl Into<String>) -> Self {
		Self::Fatal(CommandError::Failed(msg.into()))
	}

	/// Returns the carried error for the two error kinds.
	pub fn error(&self) -> Option<&CommandError> {
		match self {
			Self::Recoverable { error, .. } | Self::Fatal(error) => Some(error),
			Self::Stop(_) | Self::Reroute(_) => None,
		}
	}

	/// Returns the result the router stores under the command's name.
	///
	/// `None` for a reroute, which stores nothing.
	pub fn value(&self) -> Option<Value> {
		match self {
			Self::Stop(value) | Self::Recoverable { value, .. } => Some(value.clone()),
			Self::Fatal(_) => Some(Value::nil()),
			Self::Reroute(_) => None,
		}
	}
}

impl From<CommandError> for Interrupt {
	fn from(err: CommandError) -> Self {
		Self::Fatal(err)
	}
}

/// Errors raised by command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	/// Free-form failure reported by a handler.
	#[error("{0}")]
	Failed(String),
	/// Required parameters were absent or nil.
	#[error("missing required params: {}", .0.join(", "))]
	MissingParams(Vec<String>),
	/// A parameter was present but unusable.
	#[error("invalid param '{name}': {reason}")]
	InvalidParam { name: String, reason: String },
	/// A parameter held a value of the wrong type.
	#[error("param '{name}' expected {expected}, found {found}")]
	TypeMismatch {
		name: String,
		expected: &'static str,
		found: &'static str,
	},
}

impl CommandError {
	/// Builds a [`MissingParams`](Self::MissingParams) from borrowed names.
	pub fn missing<S: AsRef<str>>(names: &[S]) -> Self {
		Self::MissingParams(names.iter().map(|n| n.as_ref().to_string()).collect())
	}
}
