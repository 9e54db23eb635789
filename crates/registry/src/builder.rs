//! Fluent route construction.
//!
//! Each call returns a cursor naming exactly what it is building, so a
//! parameter can only be declared on a command and a default or source only
//! on a parameter:
//!
//! ```rust,ignore
//! let mut builder = RegistryBuilder::new();
//! builder
//! 	.route("@bootstrap", "Runs once at startup")
//! 	.does(setup, "setup")
//! 	.using("path").with_default("/etc/app").from("cxt:path")
//! 	.route("hello", "Say hello")
//! 	.includes("@common")
//! 	.does(greet, "greet");
//! let registry = builder.build()?;
//! ```
//!
//! Includes are recorded by name and resolved by [`RegistryBuilder::build`],
//! so a route may include one that is declared after it.

use std::sync::Arc;

use coco_primitives::{CommandResult, Context, Handler, Params, Value};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{CommandSpec, FromExpr, ParamSpec, Registry, RegistryError, RouteSpec};

/// Collects route declarations until [`build`](Self::build) freezes them.
#[derive(Default)]
pub struct RegistryBuilder {
	drafts: Vec<RouteDraft>,
	by_name: FxHashMap<String, usize>,
	order: Vec<String>,
}

struct RouteDraft {
	name: String,
	description: String,
	commands: Vec<CommandDraft>,
	steps: Vec<Step>,
}

struct CommandDraft {
	name: String,
	handler: Handler,
	params: Vec<ParamSpec>,
}

enum Step {
	Command(usize),
	Include(String),
}

impl RegistryBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts a route.
	///
	/// Redeclaring a name replaces the earlier route entirely. The name is
	/// appended to the declaration order every time, so it may appear there
	/// more than once.
	pub fn route(
		&mut self,
		name: impl Into<String>,
		description: impl Into<String>,
	) -> RouteBuilder<'_> {
		let name = name.into();
		let draft = RouteDraft {
			name: name.clone(),
			description: description.into(),
			commands: Vec::new(),
			steps: Vec::new(),
		};
		let route = match self.by_name.get(&name) {
			Some(&idx) => {
				debug!(route = %name, "route redeclared, replacing");
				self.drafts[idx] = draft;
				idx
			}
			None => {
				self.drafts.push(draft);
				let idx = self.drafts.len() - 1;
				self.by_name.insert(name.clone(), idx);
				idx
			}
		};
		self.order.push(name);
		RouteBuilder { reg: self, route }
	}

	/// Number of distinct routes declared so far.
	pub fn len(&self) -> usize {
		self.drafts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.drafts.is_empty()
	}

	/// Resolves every include and produces the immutable registry.
	///
	/// Fails if a route includes an undeclared route or if includes form a
	/// cycle.
	pub fn build(self) -> Result<Registry, RegistryError> {
		let RegistryBuilder {
			drafts,
			by_name,
			order,
		} = self;

		let shared: Vec<Vec<Arc<CommandSpec>>> = drafts
			.iter()
			.map(|draft| {
				draft
					.commands
					.iter()
					.map(|cmd| {
						Arc::new(CommandSpec {
							name: cmd.name.clone(),
							handler: cmd.handler.clone(),
							params: cmd.params.clone(),
						})
					})
					.collect()
			})
			.collect();

		let mut freezer = Freezer {
			drafts: &drafts,
			by_name: &by_name,
			shared,
			flat: vec![Vec::new(); drafts.len()],
			marks: vec![Mark::Fresh; drafts.len()],
			stack: Vec::new(),
		};
		for idx in 0..drafts.len() {
			freezer.flatten(idx)?;
		}
		let mut flat = freezer.flat;

		let routes: FxHashMap<String, RouteSpec> = drafts
			.into_iter()
			.enumerate()
			.map(|(idx, draft)| {
				let spec = RouteSpec {
					name: draft.name.clone(),
					description: draft.description,
					commands: std::mem::take(&mut flat[idx]),
				};
				(draft.name, spec)
			})
			.collect();

		debug!(routes = routes.len(), "registry frozen");
		Ok(Registry::from_parts(routes, order))
	}
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
	Fresh,
	Active,
	Done,
}

struct Freezer<'a> {
	drafts: &'a [RouteDraft],
	by_name: &'a FxHashMap<String, usize>,
	shared: Vec<Vec<Arc<CommandSpec>>>,
	flat: Vec<Vec<Arc<CommandSpec>>>,
	marks: Vec<Mark>,
	stack: Vec<usize>,
}

impl Freezer<'_> {
	fn flatten(&mut self, idx: usize) -> Result<(), RegistryError> {
		match self.marks[idx] {
			Mark::Done => return Ok(()),
			Mark::Active => return Err(self.cycle_through(idx)),
			Mark::Fresh => {}
		}
		self.marks[idx] = Mark::Active;
		self.stack.push(idx);

		let drafts = self.drafts;
		let draft = &drafts[idx];
		let mut commands = Vec::with_capacity(draft.commands.len());
		for step in &draft.steps {
			match step {
				Step::Command(cmd) => commands.push(Arc::clone(&self.shared[idx][*cmd])),
				Step::Include(include) => {
					let Some(&target) = self.by_name.get(include) else {
						return Err(RegistryError::UnknownInclude {
							route: draft.name.clone(),
							include: include.clone(),
						});
					};
					self.flatten(target)?;
					commands.extend(self.flat[target].iter().cloned());
				}
			}
		}

		self.stack.pop();
		self.flat[idx] = commands;
		self.marks[idx] = Mark::Done;
		Ok(())
	}

	fn cycle_through(&self, idx: usize) -> RegistryError {
		let start = self.stack.iter().position(|&i| i == idx).unwrap_or(0);
		let cycle = self.stack[start..]
			.iter()
			.chain(std::iter::once(&idx))
			.map(|&i| self.drafts[i].name.clone())
			.collect();
		RegistryError::IncludeCycle { cycle }
	}
}

/// Cursor on the route under construction.
pub struct RouteBuilder<'r> {
	reg: &'r mut RegistryBuilder,
	route: usize,
}

impl<'r> RouteBuilder<'r> {
	/// Appends a command. Its result is stored in the context under `name`.
	pub fn does<F>(self, handler: F, name: impl Into<String>) -> CommandBuilder<'r>
	where
		F: Fn(&mut Context, &Params) -> CommandResult + Send + Sync + 'static,
	{
		self.does_handler(Handler::new(handler), name)
	}

	/// Appends a command from an existing handler.
	pub fn does_handler(self, handler: Handler, name: impl Into<String>) -> CommandBuilder<'r> {
		let draft = &mut self.reg.drafts[self.route];
		draft.commands.push(CommandDraft {
			name: name.into(),
			handler,
			params: Vec::new(),
		});
		let command = draft.commands.len() - 1;
		draft.steps.push(Step::Command(command));
		CommandBuilder {
			reg: self.reg,
			route: self.route,
			command,
		}
	}

	/// Splices another route's commands in at this position.
	pub fn includes(self, route: impl Into<String>) -> Self {
		self.reg.drafts[self.route]
			.steps
			.push(Step::Include(route.into()));
		self
	}

	/// Finishes this route and starts another.
	pub fn route(self, name: impl Into<String>, description: impl Into<String>) -> RouteBuilder<'r> {
		self.reg.route(name, description)
	}
}

/// Cursor on the most recently added command of a route.
pub struct CommandBuilder<'r> {
	reg: &'r mut RegistryBuilder,
	route: usize,
	command: usize,
}

impl<'r> CommandBuilder<'r> {
	/// Declares a parameter on this command.
	pub fn using(self, name: impl Into<String>) -> ParamBuilder<'r> {
		let params = &mut self.reg.drafts[self.route].commands[self.command].params;
		params.push(ParamSpec::new(name.into()));
		let param = params.len() - 1;
		ParamBuilder {
			reg: self.reg,
			route: self.route,
			command: self.command,
			param,
		}
	}

	pub fn does<F>(self, handler: F, name: impl Into<String>) -> CommandBuilder<'r>
	where
		F: Fn(&mut Context, &Params) -> CommandResult + Send + Sync + 'static,
	{
		self.into_route().does(handler, name)
	}

	pub fn does_handler(self, handler: Handler, name: impl Into<String>) -> CommandBuilder<'r> {
		self.into_route().does_handler(handler, name)
	}

	pub fn includes(self, route: impl Into<String>) -> RouteBuilder<'r> {
		self.into_route().includes(route)
	}

	pub fn route(self, name: impl Into<String>, description: impl Into<String>) -> RouteBuilder<'r> {
		self.reg.route(name, description)
	}

	/// Returns to the route, for appending further steps.
	pub fn into_route(self) -> RouteBuilder<'r> {
		RouteBuilder {
			reg: self.reg,
			route: self.route,
		}
	}
}

/// Cursor on the most recently declared parameter of a command.
pub struct ParamBuilder<'r> {
	reg: &'r mut RegistryBuilder,
	route: usize,
	command: usize,
	param: usize,
}

impl<'r> ParamBuilder<'r> {
	/// Sets the value used when no source yields one.
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.spec().default = value.into();
		self
	}

	/// Sets the source expression, replacing any earlier one.
	pub fn from(mut self, expr: impl Into<String>) -> Self {
		self.spec().from = FromExpr::parse(expr);
		self
	}

	/// Declares another parameter on the same command.
	pub fn using(self, name: impl Into<String>) -> ParamBuilder<'r> {
		self.into_command().using(name)
	}

	pub fn does<F>(self, handler: F, name: impl Into<String>) -> CommandBuilder<'r>
	where
		F: Fn(&mut Context, &Params) -> CommandResult + Send + Sync + 'static,
	{
		self.into_command().does(handler, name)
	}

	pub fn does_handler(self, handler: Handler, name: impl Into<String>) -> CommandBuilder<'r> {
		self.into_command().does_handler(handler, name)
	}

	pub fn includes(self, route: impl Into<String>) -> RouteBuilder<'r> {
		self.into_command().includes(route)
	}

	pub fn route(self, name: impl Into<String>, description: impl Into<String>) -> RouteBuilder<'r> {
		self.reg.route(name, description)
	}

	pub fn into_route(self) -> RouteBuilder<'r> {
		self.into_command().into_route()
	}

	fn spec(&mut self) -> &mut ParamSpec {
		&mut self.reg.drafts[self.route].commands[self.command].params[self.param]
	}

	/// Returns to the command, for declaring further parameters.
	pub fn into_command(self) -> CommandBuilder<'r> {
		CommandBuilder {
			reg: self.reg,
			route: self.route,
			command: self.command,
		}
	}
}
