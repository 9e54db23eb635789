//! Long-lived named resources shared through a [`Context`](crate::Context).
//!
//! A datasource is anything an application wants commands to reach without
//! threading it through parameters: a connection pool, a cache, a request
//! lookup table. Datasources opt into keyed lookup by returning themselves from
//! [`Datasource::as_key_value`], which lets `<name>:<key>` parameter sources
//! address entries inside them.

use std::any::Any;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::Arc;

use crate::Value;

/// Upcasting helpers for type-erased datasources.
///
/// Blanket-implemented for every sized `Any + Send + Sync` type.
pub trait AsAny: Any {
	/// Borrows `self` as [`Any`].
	fn as_any(&self) -> &dyn Any;
	/// Converts a shared handle into a shared [`Any`] handle.
	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
		self
	}
}

/// A named resource registered on a context.
///
/// Implementations must provide their own synchronization if they are mutated
/// while requests are in flight; the context hands out shared references only.
pub trait Datasource: AsAny + Send + Sync {
	/// Returns the keyed-lookup capability, if this datasource has one.
	fn as_key_value(&self) -> Option<&dyn KeyValueDatasource> {
		None
	}
}

/// Keyed lookup capability of a datasource.
pub trait KeyValueDatasource: Send + Sync {
	/// Returns the value stored under `key`, or nil.
	fn value(&self, key: &str) -> Value;
}

/// Shared handle to a registered datasource.
pub type DatasourceRef = Arc<dyn Datasource>;

/// Converts a datasource handle into a [`Value`] holding the same object.
pub fn datasource_value(ds: &DatasourceRef) -> Value {
	Value::from_arc(<dyn Datasource as AsAny>::into_any(Arc::clone(ds)))
}

/// Downcasts a datasource handle to its concrete type.
pub fn downcast_datasource<T: Datasource>(ds: &DatasourceRef) -> Option<Arc<T>> {
	<dyn Datasource as AsAny>::into_any(Arc::clone(ds)).downcast::<T>().ok()
}

impl Datasource for String {}

impl<S> Datasource for HashMap<String, Value, S>
where
	S: BuildHasher + Send + Sync + 'static,
{
	fn as_key_value(&self) -> Option<&dyn KeyValueDatasource> {
		Some(self)
	}
}

impl<S> KeyValueDatasource for HashMap<String, Value, S>
where
	S: BuildHasher + Send + Sync,
{
	fn value(&self, key: &str) -> Value {
		self.get(key).cloned().unwrap_or_default()
	}
}
