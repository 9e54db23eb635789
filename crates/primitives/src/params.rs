use std::any::{Any, type_name};

use rustc_hash::FxHashMap;

use crate::{CommandError, Value};

/// Resolved parameters for one command invocation.
///
/// Built fresh by the router right before each call. Every parameter declared
/// on the command is present, possibly as nil.
#[derive(Clone, Debug, Default)]
pub struct Params {
	values: FxHashMap<String, Value>,
}

impl Params {
	/// Creates an empty parameter bag.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty bag sized for `capacity` parameters.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			values: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
		}
	}

	/// Sets a parameter. Used while resolving, before the bag reaches a command.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.values.insert(name.into(), value.into());
	}

	/// Returns the parameter, or `default` if it is absent.
	pub fn get(&self, name: &str, default: impl Into<Value>) -> Value {
		match self.values.get(name) {
			Some(value) => value.clone(),
			None => default.into(),
		}
	}

	/// Returns the parameter if present, even when nil.
	pub fn has(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	/// Borrows the parameter as `T`.
	pub fn get_as<T: Any>(&self, name: &str) -> Option<&T> {
		self.values.get(name).and_then(Value::downcast_ref::<T>)
	}

	/// Checks that every name is present.
	///
	/// Returns the names that are not, in the order given. Absence is not an
	/// error here; the calling command decides whether it is fatal.
	pub fn requires<'a>(&self, names: &[&'a str]) -> Result<(), Vec<&'a str>> {
		let missing: Vec<&str> = names
			.iter()
			.copied()
			.filter(|name| !self.values.contains_key(*name))
			.collect();
		if missing.is_empty() { Ok(()) } else { Err(missing) }
	}

	/// Fetches a parameter and checks it against `predicate`.
	///
	/// Returns `None` if the parameter is absent or fails the check.
	pub fn validate(&self, name: &str, predicate: impl FnOnce(&Value) -> bool) -> Option<&Value> {
		self.values.get(name).filter(|value| predicate(value))
	}

	/// Borrows a required, non-nil parameter as `T`.
	pub fn require<T: Any>(&self, name: &str) -> Result<&T, CommandError> {
		let value = self
			.values
			.get(name)
			.filter(|value| !value.is_nil())
			.ok_or_else(|| CommandError::MissingParams(vec![name.to_string()]))?;
		value
			.downcast_ref::<T>()
			.ok_or_else(|| CommandError::TypeMismatch {
				name: name.to_string(),
				expected: type_name::<T>(),
				found: value.type_name(),
			})
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	/// Returns true if there are no parameters.
	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// Iterates over all parameters in unspecified order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
		self.values.iter().map(|(k, v)| (k.as_str(), v))
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}
