//! Route registry: the static description of every route, its commands, and
//! how each command's parameters are resolved.
//!
//! Routes are declared through a [`RegistryBuilder`] and frozen into a
//! [`Registry`] before any request is dispatched.

/// Fluent route declaration and the include freeze point.
pub mod builder;
/// Freeze-time errors.
pub mod error;
/// Parameter source expressions.
pub mod from;
/// The frozen registry.
pub mod index;
/// Route, command and parameter specs.
pub mod spec;

pub use builder::{CommandBuilder, ParamBuilder, RegistryBuilder, RouteBuilder};
pub use error::RegistryError;
pub use from::{FromExpr, Source};
pub use index::Registry;
pub use spec::{CommandSpec, ParamSpec, RouteSpec};
