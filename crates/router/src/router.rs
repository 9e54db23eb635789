//! The dispatch engine.

use std::sync::Arc;

use coco_primitives::{Context, Interrupt, Params, Value, datasource_value};
use coco_registry::{CommandSpec, ParamSpec, Registry, Source};
use tracing::{debug, debug_span, trace, warn};

use crate::{DispatchError, IdentityResolver, RequestResolver, ResolveError, RouteError};

/// Marks routes that only internal callers may run.
pub const TAINT_PREFIX: char = '@';

/// Resolves requests to routes and runs their commands against a context.
///
/// The router is read-only during dispatch, so one instance can serve
/// concurrent requests as long as each has its own [`Context`].
pub struct Router {
	registry: Arc<Registry>,
	resolver: Box<dyn RequestResolver>,
}

impl Router {
	/// Creates a router using [`IdentityResolver`].
	pub fn new(registry: Arc<Registry>) -> Self {
		Self {
			registry,
			resolver: Box::new(IdentityResolver),
		}
	}

	/// Replaces the resolver, builder style.
	pub fn with_resolver(mut self, resolver: impl RequestResolver + 'static) -> Self {
		self.set_resolver(resolver);
		self
	}

	/// Replaces the resolver and initializes it against the current registry.
	pub fn set_resolver(&mut self, resolver: impl RequestResolver + 'static) {
		let mut resolver: Box<dyn RequestResolver> = Box::new(resolver);
		resolver.init(&self.registry);
		self.resolver = resolver;
	}

	pub fn resolver(&self) -> &dyn RequestResolver {
		self.resolver.as_ref()
	}

	pub fn registry(&self) -> &Arc<Registry> {
		&self.registry
	}

	/// Swaps the registry and re-initializes the resolver against it.
	pub fn set_registry(&mut self, registry: Arc<Registry>) {
		self.registry = registry;
		self.resolver.init(&self.registry);
	}

	/// Maps a request to a route name without running anything.
	pub fn resolve_request(&self, request: &str, cxt: &mut Context) -> Result<String, ResolveError> {
		self.resolver.resolve(request, cxt)
	}

	/// Returns true if a route of exactly this name exists. No resolution is
	/// applied.
	pub fn has_route(&self, name: &str) -> bool {
		self.registry.has_route(name)
	}

	/// Resolves `request` and runs the resulting route.
	///
	/// Set `taint` for requests named by an external client: routes starting
	/// with `@` are then refused, including as reroute targets. Each command's
	/// result is stored in `cxt` under the command's name.
	///
	/// A reroute cycle never terminates; nothing here detects one.
	pub fn handle_request(&self, request: &str, cxt: &mut Context, taint: bool) -> Result<(), DispatchError> {
		let mut route = self.resolve_request(request, cxt)?;
		loop {
			match self.run_route(&route, cxt, taint)? {
				Flow::Done => return Ok(()),
				Flow::Reroute(target) => {
					route = self.resolve_request(&target, cxt)?;
					debug!(target = %target, route = %route, "rerouting");
				}
			}
		}
	}

	fn run_route(&self, route: &str, cxt: &mut Context, taint: bool) -> Result<Flow, DispatchError> {
		if route.is_empty() {
			return Err(RouteError::EmptyName.into());
		}
		if taint && route.starts_with(TAINT_PREFIX) {
			return Err(RouteError::Tainted(route.to_string()).into());
		}
		let spec = self
			.registry
			.route_spec(route)
			.ok_or_else(|| RouteError::NotFound(route.to_string()))?;

		let _span = debug_span!("route", route = %spec.name()).entered();
		for cmd in spec.commands() {
			trace!(command = %cmd.name(), "running command");
			let params = resolve_params(cmd, cxt);
			match cmd.handler().call(cxt, &params) {
				Ok(value) => cxt.add(cmd.name(), value),
				Err(Interrupt::Reroute(target)) => return Ok(Flow::Reroute(target)),
				Err(Interrupt::Stop(value)) => {
					cxt.add(cmd.name(), value);
					debug!(command = %cmd.name(), "route stopped");
					return Ok(Flow::Done);
				}
				Err(Interrupt::Recoverable { error, value }) => {
					cxt.add(cmd.name(), value);
					warn!(route = %route, command = %cmd.name(), error = %error, "continuing after recoverable error");
				}
				Err(Interrupt::Fatal(err)) => {
					cxt.add(cmd.name(), Value::nil());
					return Err(DispatchError::Fatal {
						route: route.to_string(),
						command: cmd.name().to_string(),
						source: err,
					});
				}
			}
		}
		Ok(Flow::Done)
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.registry.len())
			.finish_non_exhaustive()
	}
}

enum Flow {
	Done,
	Reroute(String),
}

/// Builds the parameter bag for one command call.
///
/// Every declared parameter is present: the first source yielding a non-nil
/// value wins, otherwise the declared default (possibly nil) is used.
pub fn resolve_params(cmd: &CommandSpec, cxt: &Context) -> Params {
	let mut params = Params::with_capacity(cmd.params().len());
	for spec in cmd.params() {
		let value = from_sources(spec, cxt).unwrap_or_else(|| spec.default().clone());
		params.insert(spec.name(), value);
	}
	params
}

fn from_sources(spec: &ParamSpec, cxt: &Context) -> Option<Value> {
	spec.from().sources().iter().find_map(|source| {
		let value = match source {
			Source::Context(key) => cxt.has(key).cloned(),
			Source::Datasource(name) => cxt.datasource(name).map(datasource_value),
			Source::Lookup { datasource, key } => cxt
				.datasource(datasource)
				.and_then(|ds| ds.as_key_value())
				.map(|kv| kv.value(key)),
		};
		value.filter(|v| !v.is_nil())
	})
}
