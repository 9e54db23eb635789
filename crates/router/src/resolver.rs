//! Strategies for turning an external request into a route name.

use std::sync::Arc;

use coco_primitives::Context;
use coco_registry::Registry;

use crate::ResolveError;

mod flags;
mod path;

pub use flags::{FlagResolver, parse_flags};
pub use path::PathPatternResolver;

/// Maps a request identifier to a route name.
///
/// [`init`](Self::init) runs whenever the router is given this resolver or a
/// new registry; [`resolve`](Self::resolve) runs for every request and every
/// reroute, and may write into the context.
pub trait RequestResolver: Send + Sync {
	/// Prepares the resolver for `registry`.
	fn init(&mut self, registry: &Arc<Registry>) {
		let _ = registry;
	}

	/// Returns the route name for `request`.
	fn resolve(&self, request: &str, cxt: &mut Context) -> Result<String, ResolveError>;
}

/// Treats the request as the route name.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl RequestResolver for IdentityResolver {
	fn resolve(&self, request: &str, _cxt: &mut Context) -> Result<String, ResolveError> {
		Ok(request.to_string())
	}
}
