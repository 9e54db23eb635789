use coco_primitives::{CommandResult, Context, Handler, Params};
use rustc_hash::FxHashMap;

/// Handlers addressable by name from a manifest.
#[derive(Clone, Debug, Default)]
pub struct HandlerCatalog {
	handlers: FxHashMap<String, Handler>,
}

impl HandlerCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a handler function, replacing any of the same name.
	pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
	where
		F: Fn(&mut Context, &Params) -> CommandResult + Send + Sync + 'static,
	{
		self.insert(name, Handler::new(f))
	}

	/// Registers an existing handler, replacing any of the same name.
	pub fn insert(&mut self, name: impl Into<String>, handler: Handler) -> &mut Self {
		self.handlers.insert(name.into(), handler);
		self
	}

	pub fn get(&self, name: &str) -> Option<&Handler> {
		self.handlers.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.handlers.contains_key(name)
	}

	/// Handler names, sorted.
	pub fn names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}

	/// Adds every handler from `other`, overriding same-named ones.
	pub fn merge(&mut self, other: HandlerCatalog) {
		self.handlers.extend(other.handlers);
	}
}
