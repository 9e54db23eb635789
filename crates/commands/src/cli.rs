//! Commands for command-line front ends.

use std::io::{self, Write};

use clap::Command;
use coco_log::LogSinks;
use coco_primitives::{CommandError, CommandResult, Context, Interrupt, Params, Value};
use coco_router::parse_flags;
use tracing::debug;

const HELP_SECTIONS: [&str; 3] = ["summary", "description", "usage"];

/// Parses subcommand flags.
///
/// Works like the flag resolver, one level down: flags declared on `flags` are
/// parsed off the front of `args` and stored in the context under their ids.
/// Local flags overwrite global ones of the same id. Returns the remaining
/// arguments as a `Vec<String>`.
///
/// Params:
/// - `args` (required, `Vec<String>`): usually `cxt:args`.
/// - `flags` (required, `clap::Command`): the flags to accept.
pub fn parse_args(cxt: &mut Context, params: &Params) -> CommandResult {
	params.requires(&["args", "flags"]).map_err(|missing| CommandError::missing(&missing))?;
	let args = params.require::<Vec<String>>("args")?;
	let flags = params.require::<Command>("flags")?;

	let rest = parse_flags(flags, args.iter().cloned(), cxt).map_err(|e| CommandError::InvalidParam {
		name: "args".to_string(),
		reason: e.to_string(),
	})?;
	Ok(Value::from(rest))
}

/// Prints help text and stops the route when `show` is true.
///
/// Yields `true` when help was shown and `false` otherwise.
///
/// Params:
/// - `show` (`bool`): whether to print. Defaults to false.
/// - `summary`, `description`, `usage` (`String`): printed in that order as
///   upper-cased headings followed by their text. Absent sections are skipped.
/// - `writer` (`LogSinks`): where to print. Defaults to stdout.
pub fn show_help(_cxt: &mut Context, params: &Params) -> CommandResult {
	if !params.get_as::<bool>("show").copied().unwrap_or(false) {
		return Ok(Value::from(false));
	}

	let written = match params.get_as::<LogSinks>("writer") {
		Some(sinks) => write_help(params, &mut sinks.writer()),
		None => write_help(params, &mut io::stdout().lock()),
	};
	written.map_err(|e| CommandError::Failed(format!("writing help: {e}")))?;
	debug!("help shown, stopping");
	Err(Interrupt::stop_with(true))
}

fn write_help(params: &Params, out: &mut impl Write) -> io::Result<()> {
	for key in HELP_SECTIONS {
		if let Some(text) = params.get_as::<String>(key) {
			write!(out, "{}\n\n{text}\n", key.to_uppercase())?;
		}
	}
	out.flush()
}
