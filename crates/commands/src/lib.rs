//! Builtin commands usable from any route.
//!
//! [`catalog`] exposes them to manifests under short names.

pub mod basic;
pub mod cli;

pub use basic::{log_message, reroute};
pub use cli::{parse_args, show_help};
use coco_config::HandlerCatalog;

/// Every builtin, keyed by the name a manifest uses for it.
pub fn catalog() -> HandlerCatalog {
	let mut catalog = HandlerCatalog::new();
	catalog
		.register("log", log_message)
		.register("help", show_help)
		.register("parse_args", parse_args)
		.register("reroute", reroute);
	catalog
}
