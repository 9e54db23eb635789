//! Per-request state shared by the commands of a route.
//!
//! A [`Context`] keeps two independent namespaces:
//!
//! - **variables**: short-lived values passed from command to command. Every
//!   command's result is stored here under the command's name.
//! - **datasources**: long-lived resources registered by the embedding
//!   application (see [`Datasource`]).
//!
//! Commands should generally receive variables indirectly, through parameters
//! bound at the registry level, and talk to datasources directly.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::datasource::{Datasource, DatasourceRef, downcast_datasource};
use crate::Value;

/// Variable and datasource store for one request.
///
/// Not synchronized. Give each concurrently dispatched request its own
/// context, typically via [`copy`](Self::copy) from a shared base.
#[derive(Clone, Default)]
pub struct Context {
	values: FxHashMap<String, Value>,
	datasources: FxHashMap<String, DatasourceRef>,
}

impl Context {
	/// Creates an empty context.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or overwrites a variable.
	pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.values.insert(name.into(), value.into());
	}

	/// Returns the variable, or `default` if it is absent.
	///
	/// A stored nil is returned as nil, not replaced by `default`. Use
	/// [`has`](Self::has) when absence and nil must be told apart explicitly.
	pub fn get(&self, name: &str, default: impl Into<Value>) -> Value {
		match self.values.get(name) {
			Some(value) => value.clone(),
			None => default.into(),
		}
	}

	/// Returns the variable if the key is present, even when its value is nil.
	pub fn has(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// Removes a variable, returning its value.
	pub fn remove(&mut self, name: &str) -> Option<Value> {
		self.values.remove(name)
	}

	/// Number of variables. Datasources are not counted.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if no variables are set.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over all variables in unspecified order.
	pub fn vars(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns the named datasource.
	pub fn datasource(&self, name: &str) -> Option<&DatasourceRef> {
		self.datasources.get(name)
	}

	/// Returns the named datasource downcast to its concrete type.
	pub fn datasource_as<T: Datasource>(&self, name: &str) -> Option<Arc<T>> {
		self.datasources.get(name).and_then(downcast_datasource::<T>)
	}

	/// Returns true if a datasource is registered under `name`.
	pub fn has_datasource(&self, name: &str) -> bool {
		self.datasources.contains_key(name)
	}

	/// Registers a datasource, replacing any previous one of the same name.
	pub fn add_datasource(&mut self, name: impl Into<String>, ds: impl Datasource) {
		self.datasources.insert(name.into(), Arc::new(ds));
	}

	/// Registers an already shared datasource handle.
	pub fn add_datasource_ref(&mut self, name: impl Into<String>, ds: DatasourceRef) {
		self.datasources.insert(name.into(), ds);
	}

	/// Unregisters a datasource, returning it.
	pub fn remove_datasource(&mut self, name: &str) -> Option<DatasourceRef> {
		self.datasources.remove(name)
	}

	/// Iterates over all datasources in unspecified order.
	pub fn datasources(&self) -> impl Iterator<Item = (&str, &DatasourceRef)> + '_ {
		self.datasources.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Returns a shallow copy.
	///
	/// Both maps are duplicated, so adding or overwriting a key in either
	/// context is invisible to the other. Values and datasources themselves are
	/// shared, so mutation through interior mutability is visible in both.
	pub fn copy(&self) -> Self {
		self.clone()
	}
}

impl std::fmt::Debug for Context {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Context")
			.field("values", &self.values)
			.field("datasources", &self.datasources.keys().collect::<Vec<_>>())
			.finish()
	}
}
