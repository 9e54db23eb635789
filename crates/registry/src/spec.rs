use std::fmt;
use std::sync::Arc;

use coco_primitives::{Handler, Value};

use crate::FromExpr;

/// A frozen route: its name, help text and flattened command chain.
#[derive(Clone, Debug)]
pub struct RouteSpec {
	pub(crate) name: String,
	pub(crate) description: String,
	pub(crate) commands: Vec<Arc<CommandSpec>>,
}

impl RouteSpec {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn description(&self) -> &str {
		&self.description
	}

	/// Commands in execution order, with includes already spliced in.
	///
	/// A command that reached this route through an include is the same
	/// allocation as in the included route.
	pub fn commands(&self) -> &[Arc<CommandSpec>] {
		&self.commands
	}
}

/// A command bound into a route.
#[derive(Clone)]
pub struct CommandSpec {
	pub(crate) name: String,
	pub(crate) handler: Handler,
	pub(crate) params: Vec<ParamSpec>,
}

impl CommandSpec {
	/// The context key the command's result is stored under.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn handler(&self) -> &Handler {
		&self.handler
	}

	pub fn params(&self) -> &[ParamSpec] {
		&self.params
	}
}

impl fmt::Debug for CommandSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandSpec")
			.field("name", &self.name)
			.field("params", &self.params)
			.finish_non_exhaustive()
	}
}

/// How one argument of a command is computed.
#[derive(Clone, Debug)]
pub struct ParamSpec {
	pub(crate) name: String,
	pub(crate) default: Value,
	pub(crate) from: FromExpr,
}

impl ParamSpec {
	pub(crate) fn new(name: String) -> Self {
		Self {
			name,
			default: Value::nil(),
			from: FromExpr::default(),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Used when no source yields a value. May be nil.
	pub fn default(&self) -> &Value {
		&self.default
	}

	pub fn from(&self) -> &FromExpr {
		&self.from
	}
}
