//! Request resolution and route dispatch.
//!
//! A [`Router`] asks its [`RequestResolver`] which route a request names, then
//! runs that route's commands in order against the request's context,
//! following the [`Interrupt`](coco_primitives::Interrupt) each command
//! returns.

/// Router, resolver and dispatch errors.
pub mod error;
/// Request-to-route strategies.
pub mod resolver;
/// The dispatch loop and parameter resolution.
pub mod router;

pub use error::{DispatchError, ResolveError, RouteError};
pub use resolver::{FlagResolver, IdentityResolver, PathPatternResolver, RequestResolver, parse_flags};
pub use router::{Router, TAINT_PREFIX, resolve_params};

// Used only by the dispatch integration tests.
#[cfg(test)]
use {coco_log as _, parking_lot as _, tracing_subscriber as _};
