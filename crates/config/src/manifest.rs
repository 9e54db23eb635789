use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use coco_primitives::{Handler, Value};
use coco_registry::{Registry, RegistryBuilder};
use coco_router::{FlagResolver, PathPatternResolver, Router};
use serde::Deserialize;
use tracing::debug;

use crate::{ConfigError, HandlerCatalog, Result};

/// A route graph declared in TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
	/// Resolver installed by [`Manifest::router`].
	#[serde(default)]
	pub resolver: ResolverKind,
	/// Routes in declaration order.
	#[serde(default, rename = "route")]
	pub routes: Vec<RouteDef>,
}

/// Which request resolver a manifest asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverKind {
	/// Requests are route names.
	#[default]
	Identity,
	/// Route names are path patterns, first match wins.
	Path,
	/// `[flags] route [args...]` command lines.
	Flags,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDef {
	pub name: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub does: Vec<StepDef>,
}

/// One `[[route.does]]` entry: a command or an include.
///
/// A command step's handler defaults to its command name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDef {
	pub command: Option<String>,
	pub handler: Option<String>,
	#[serde(default)]
	pub using: Vec<ParamDef>,
	pub include: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDef {
	pub name: String,
	pub default: Option<toml::Value>,
	pub from: Option<String>,
}

enum Step<'m> {
	Command {
		name: &'m str,
		handler: Handler,
		params: &'m [ParamDef],
	},
	Include(&'m str),
}

impl Manifest {
	/// Loads a manifest file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		content.parse()
	}

	/// Declares every route on `builder`.
	///
	/// All steps are checked against `catalog` first, so a failing manifest
	/// leaves `builder` untouched.
	pub fn apply(&self, catalog: &HandlerCatalog, builder: &mut RegistryBuilder) -> Result<()> {
		let planned = self
			.routes
			.iter()
			.map(|route| Ok((route, plan_steps(route, catalog)?)))
			.collect::<Result<Vec<_>>>()?;

		for (def, steps) in planned {
			let mut route = builder.route(&def.name, &def.description);
			for step in steps {
				route = match step {
					Step::Include(name) => route.includes(name),
					Step::Command { name, handler, params } => {
						let mut command = route.does_handler(handler, name);
						for param in params {
							let mut cursor = command.using(&param.name);
							if let Some(default) = &param.default {
								cursor = cursor.with_default(toml_to_value(default.clone()));
							}
							if let Some(from) = &param.from {
								cursor = cursor.from(from);
							}
							command = cursor.into_command();
						}
						command.into_route()
					}
				};
			}
		}
		debug!(routes = self.routes.len(), "manifest applied");
		Ok(())
	}

	/// Declares and freezes the manifest's routes into a fresh registry.
	pub fn build(&self, catalog: &HandlerCatalog) -> Result<Registry> {
		let mut builder = RegistryBuilder::new();
		self.apply(catalog, &mut builder)?;
		Ok(builder.build()?)
	}

	/// Creates a router over `registry` with the configured resolver.
	pub fn router(&self, registry: Arc<Registry>) -> Router {
		let router = Router::new(registry);
		match self.resolver {
			ResolverKind::Identity => router,
			ResolverKind::Path => router.with_resolver(PathPatternResolver::new()),
			ResolverKind::Flags => router.with_resolver(FlagResolver::default()),
		}
	}
}

impl FromStr for Manifest {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self> {
		Ok(toml::from_str(s)?)
	}
}

fn plan_steps<'m>(route: &'m RouteDef, catalog: &HandlerCatalog) -> Result<Vec<Step<'m>>> {
	let invalid = |index, reason| ConfigError::InvalidStep {
		route: route.name.clone(),
		index,
		reason,
	};

	route
		.does
		.iter()
		.enumerate()
		.map(|(index, step)| match (&step.command, &step.include) {
			(Some(_), Some(_)) => Err(invalid(index, "a step cannot both run a command and include a route")),
			(None, None) => Err(invalid(index, "a step needs either `command` or `include`")),
			(None, Some(_)) if step.handler.is_some() || !step.using.is_empty() => {
				Err(invalid(index, "an include step takes no `handler` or `using`"))
			}
			(None, Some(include)) => Ok(Step::Include(include)),
			(Some(command), None) => {
				let handler_name = step.handler.as_deref().unwrap_or(command);
				let handler = catalog
					.get(handler_name)
					.cloned()
					.ok_or_else(|| ConfigError::UnknownHandler {
						route: route.name.clone(),
						handler: handler_name.to_string(),
					})?;
				Ok(Step::Command {
					name: command,
					handler,
					params: &step.using,
				})
			}
		})
		.collect()
}

/// Converts a TOML literal into a context value.
///
/// Strings, integers, floats, booleans and string arrays map to `String`,
/// `i64`, `f64`, `bool` and `Vec<String>`. Anything else is stored as the
/// `toml::Value` itself.
pub fn toml_to_value(value: toml::Value) -> Value {
	match value {
		toml::Value::String(s) => Value::from(s),
		toml::Value::Integer(i) => Value::from(i),
		toml::Value::Float(f) => Value::from(f),
		toml::Value::Boolean(b) => Value::from(b),
		toml::Value::Array(items) => {
			match items.iter().map(|item| item.as_str().map(str::to_string)).collect::<Option<Vec<_>>>() {
				Some(strings) => Value::from(strings),
				None => Value::new(toml::Value::Array(items)),
			}
		}
		other => Value::new(other),
	}
}

#[cfg(test)]
mod tests;
