use rustc_hash::FxHashMap;

use crate::{RegistryBuilder, RouteSpec};

/// Immutable set of routes, safe to share across concurrent requests.
///
/// Produced by [`RegistryBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct Registry {
	routes: FxHashMap<String, RouteSpec>,
	order: Vec<String>,
}

impl Registry {
	/// Starts declaring routes.
	pub fn builder() -> RegistryBuilder {
		RegistryBuilder::new()
	}

	pub(crate) fn from_parts(routes: FxHashMap<String, RouteSpec>, order: Vec<String>) -> Self {
		Self { routes, order }
	}

	/// Looks up a route by exact name.
	#[inline]
	pub fn route_spec(&self, name: &str) -> Option<&RouteSpec> {
		self.routes.get(name)
	}

	/// All routes, unordered.
	#[inline]
	pub fn routes(&self) -> &FxHashMap<String, RouteSpec> {
		&self.routes
	}

	/// Route names in declaration order.
	///
	/// A redeclared route appears once per declaration. Resolvers that apply
	/// rules in order should use this rather than [`routes`](Self::routes).
	#[inline]
	pub fn route_names(&self) -> &[String] {
		&self.order
	}

	/// Returns true if a route of exactly this name exists.
	#[inline]
	pub fn has_route(&self, name: &str) -> bool {
		self.routes.contains_key(name)
	}

	/// Number of distinct routes.
	#[inline]
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}
