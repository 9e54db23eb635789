use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// A type-erased, possibly-nil value stored in a context or parameter bag.
///
/// Cloning a `Value` shares the payload rather than duplicating it. This is
/// what makes [`Context::copy`](crate::Context::copy) shallow: both copies
/// point at the same underlying object, so interior mutability (a `Mutex`, an
/// atomic) is observed through either handle.
#[derive(Clone)]
pub struct Value {
	inner: Option<Arc<dyn Any + Send + Sync>>,
	type_name: &'static str,
}

impl Value {
	/// The nil value.
	pub const fn nil() -> Self {
		Self {
			inner: None,
			type_name: "nil",
		}
	}

	/// Wraps a concrete value.
	pub fn new<T: Any + Send + Sync>(value: T) -> Self {
		Self {
			inner: Some(Arc::new(value)),
			type_name: type_name::<T>(),
		}
	}

	/// Wraps an already shared payload without re-allocating it.
	pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
		Self {
			inner: Some(value),
			type_name: "dyn Any",
		}
	}

	/// Returns true if this is the nil value.
	#[inline]
	pub fn is_nil(&self) -> bool {
		self.inner.is_none()
	}

	/// Returns the stored type name, or `"nil"`.
	#[inline]
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	/// Borrows the payload as `T` if that is what is stored.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		self.inner.as_deref().and_then(|any| any.downcast_ref::<T>())
	}

	/// Returns a shared handle to the payload as `T`.
	pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
		self.inner.clone().and_then(|any| any.downcast::<T>().ok())
	}

	/// Returns true if the payload is stored as `T`.
	pub fn is<T: Any>(&self) -> bool {
		self.downcast_ref::<T>().is_some()
	}

	/// Returns true if both values share the same payload (or are both nil).
	pub fn ptr_eq(&self, other: &Value) -> bool {
		match (&self.inner, &other.inner) {
			(Some(a), Some(b)) => Arc::ptr_eq(a, b),
			(None, None) => true,
			_ => false,
		}
	}

	/// Converts nil into `None`.
	pub fn into_option(self) -> Option<Value> {
		if self.is_nil() { None } else { Some(self) }
	}
}

impl Default for Value {
	fn default() -> Self {
		Self::nil()
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(s) = self.downcast_ref::<String>() {
			return f.debug_tuple("Value").field(s).finish();
		}
		if let Some(b) = self.downcast_ref::<bool>() {
			return f.debug_tuple("Value").field(b).finish();
		}
		if let Some(n) = self.downcast_ref::<i64>() {
			return f.debug_tuple("Value").field(n).finish();
		}
		f.debug_tuple("Value").field(&format_args!("<{}>", self.type_name)).finish()
	}
}

impl From<Option<Value>> for Value {
	fn from(value: Option<Value>) -> Self {
		value.unwrap_or_default()
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::new(value.to_string())
	}
}

macro_rules! impl_from_owned {
	($($ty:ty),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::new(value)
				}
			}
		)*
	};
}

impl_from_owned!(String, bool, i32, i64, u8, u32, u64, usize, f32, f64, Vec<String>);

#[cfg(test)]
mod tests;
