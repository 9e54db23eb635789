//! TOML route manifests.
//!
//! A manifest declares routes as data. Command steps name handlers in a
//! [`HandlerCatalog`], which supplies the code behind them:
//!
//! ```toml
//! resolver = "flags"
//!
//! [[route]]
//! name = "hello"
//! description = "Say hello"
//!
//! [[route.does]]
//! command = "greet"
//! handler = "log"
//! using = [
//!     { name = "msg", default = "hello", from = "cxt:msg" },
//! ]
//!
//! [[route]]
//! name = "hello-twice"
//!
//! [[route.does]]
//! include = "hello"
//!
//! [[route.does]]
//! include = "hello"
//! ```

pub mod catalog;
pub mod error;
pub mod manifest;

pub use catalog::HandlerCatalog;
pub use error::{ConfigError, Result};
pub use manifest::{Manifest, ParamDef, ResolverKind, RouteDef, StepDef, toml_to_value};
