//! Uniform typed reads over contexts, parameter bags and keyed datasources.

use std::any::Any;

use crate::{Context, KeyValueDatasource, Params, Value};

/// Something values can be read from by key.
pub trait Getter {
	/// Returns the value under `key` if the source has it.
	fn lookup(&self, key: &str) -> Option<Value>;

	/// Returns the value under `key`, or `default`.
	fn get_value(&self, key: &str, default: impl Into<Value>) -> Value
	where
		Self: Sized,
	{
		self.lookup(key).unwrap_or_else(|| default.into())
	}

	/// Returns a clone of the `T` stored under `key`.
	///
	/// Falls back to `default` when the key is absent or holds another type.
	fn get_as<T: Any + Clone>(&self, key: &str, default: T) -> T
	where
		Self: Sized,
	{
		self.has_as(key).unwrap_or(default)
	}

	/// Returns a clone of the `T` stored under `key`, if present with that type.
	fn has_as<T: Any + Clone>(&self, key: &str) -> Option<T>
	where
		Self: Sized,
	{
		self.lookup(key).and_then(|value| value.downcast_ref::<T>().cloned())
	}
}

impl Getter for Context {
	fn lookup(&self, key: &str) -> Option<Value> {
		self.has(key).cloned()
	}
}

impl Getter for Params {
	fn lookup(&self, key: &str) -> Option<Value> {
		self.has(key).cloned()
	}
}

/// Reads from a keyed datasource, treating nil as absent.
#[derive(Clone, Copy)]
pub struct KeyValueGetter<'a>(pub &'a dyn KeyValueDatasource);

impl Getter for KeyValueGetter<'_> {
	fn lookup(&self, key: &str) -> Option<Value> {
		self.0.value(key).into_option()
	}
}

/// Yields the same value for every key.
#[derive(Clone, Debug, Default)]
pub struct Fallback(pub Value);

impl Getter for Fallback {
	fn lookup(&self, _key: &str) -> Option<Value> {
		Some(self.0.clone())
	}
}

/// Returns the value from the first source that has `key`.
///
/// The index of that source is returned alongside; `None` means no source had
/// the key and `default` was used.
pub fn get_from_first(
	key: &str,
	default: impl Into<Value>,
	sources: &[&dyn Getter],
) -> (Value, Option<usize>) {
	sources
		.iter()
		.enumerate()
		.find_map(|(idx, source)| source.lookup(key).map(|value| (value, Some(idx))))
		.unwrap_or_else(|| (default.into(), None))
}

#[cfg(test)]
mod tests;
