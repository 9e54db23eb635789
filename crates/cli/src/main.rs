mod cli;
#[cfg(test)]
mod tests;

use std::fmt::Write as _;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use cli::Cli;
use coco_config::Manifest;
use coco_log::LogSinks;
use coco_primitives::{Context, Value};
use coco_registry::RegistryBuilder;
use tracing::debug;

/// Runs before every request, untainted, when the manifest declares it.
const STARTUP_ROUTE: &str = "@startup";
/// Registered from the manifest's routes unless the manifest declares its own.
const HELP_ROUTE: &str = "help";
const USAGE: &str = "coco --routes <FILE> [--trusted] [--log <FILTER>] [REQUEST]...";

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let sinks = LogSinks::new();
	sinks.add("stderr", io::stderr());
	coco_log::init(&sinks, cli.log.as_deref().unwrap_or(coco_log::DEFAULT_FILTER))?;

	run(&cli)?;
	Ok(())
}

/// Loads the manifest and dispatches the request, returning the final context.
///
/// The request is tainted unless `--trusted` is given. If `@startup` shows
/// help (its `help` command yields `true`), the request is skipped.
fn run(cli: &Cli) -> anyhow::Result<Context> {
	let manifest = Manifest::from_path(&cli.routes)
		.with_context(|| format!("loading {}", cli.routes.display()))?;
	let mut builder = RegistryBuilder::new();
	manifest.apply(&coco_commands::catalog(), &mut builder)?;
	if !manifest.routes.iter().any(|route| route.name == HELP_ROUTE) {
		help_route(&mut builder, &manifest, &cli.routes);
	}
	let registry = builder.build()?;
	debug!(routes = registry.len(), resolver = ?manifest.resolver, "registry ready");
	let router = manifest.router(Arc::new(registry));

	let mut cxt = Context::new();
	cxt.add("os.Args", cli.request.clone());

	if router.has_route(STARTUP_ROUTE) {
		router
			.handle_request(STARTUP_ROUTE, &mut cxt, false)
			.context("startup failed")?;
		if cxt.get(HELP_ROUTE, Value::nil()).downcast_ref::<bool>() == Some(&true) {
			return Ok(cxt);
		}
	}

	let request = cli.request();
	router
		.handle_request(&request, &mut cxt, !cli.trusted)
		.with_context(|| format!("request '{request}' failed"))?;
	Ok(cxt)
}

/// Declares a `help` route listing the manifest's public routes.
fn help_route(builder: &mut RegistryBuilder, manifest: &Manifest, path: &Path) {
	let mut routes = String::new();
	for route in manifest.routes.iter().filter(|r| !r.name.starts_with('@')) {
		let _ = writeln!(routes, "  {:<20} {}", route.name, route.description);
	}
	builder
		.route(HELP_ROUTE, "Show the routes this manifest declares.")
		.does(coco_commands::show_help, HELP_ROUTE)
		.using("show")
		.with_default(true)
		.using("summary")
		.with_default(format!("Routes from {}", path.display()))
		.using("description")
		.with_default(routes.trim_end().to_string())
		.using("usage")
		.with_default(USAGE);
}
