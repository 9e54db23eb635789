use clap::parser::ValueSource;
use clap::{Arg, ArgAction, ArgMatches, Command};
use coco_primitives::{Context, Value};

use super::RequestResolver;
use crate::ResolveError;

const REST: &str = "__rest";

/// Resolves command-line style requests: `[global flags] route [args...]`.
///
/// Global flags are parsed with the configured [`Command`] and stored in the
/// context under their ids. Everything after the route name is stored under
/// `args` as a `Vec<String>`. A bare route name, as a reroute target usually
/// is, leaves existing `args` alone.
#[derive(Debug, Clone)]
pub struct FlagResolver {
	flags: Command,
}

impl FlagResolver {
	/// Uses the arguments declared on `flags` as global flags.
	pub fn new(flags: Command) -> Self {
		Self { flags }
	}

	pub fn flags(&self) -> &Command {
		&self.flags
	}
}

impl Default for FlagResolver {
	fn default() -> Self {
		Self::new(Command::new("coco"))
	}
}

impl RequestResolver for FlagResolver {
	fn resolve(&self, request: &str, cxt: &mut Context) -> Result<String, ResolveError> {
		let mut rest = parse_flags(&self.flags, request.split_whitespace(), cxt)?;
		if rest.is_empty() {
			return Err(ResolveError::NoMatch(request.to_string()));
		}
		let route = rest.remove(0);
		if !rest.is_empty() || cxt.has("args").is_none() {
			cxt.add("args", rest);
		}
		Ok(route)
	}
}

/// Parses leading flags from `args` and stores them in the context.
///
/// Parsing stops at the first positional argument; it and everything after it
/// are returned untouched. Flags are stored by id: switches as `bool`, counters
/// as `u8`, single values as `String`, and repeatable values as `Vec<String>`.
/// Flags that were neither given nor defaulted are left out, and a default
/// never replaces a value already in the context, so flags parsed earlier in
/// the request survive a reroute.
pub fn parse_flags<I, T>(flags: &Command, args: I, cxt: &mut Context) -> Result<Vec<String>, clap::Error>
where
	I: IntoIterator<Item = T>,
	T: Into<String>,
{
	let mut cmd = flags
		.clone()
		.no_binary_name(true)
		.arg(
			Arg::new(REST)
				.num_args(1..)
				.trailing_var_arg(true),
		);
	let matches = cmd.try_get_matches_from_mut(args.into_iter().map(Into::<String>::into))?;

	for arg in cmd.get_arguments() {
		let id = arg.get_id().as_str();
		if id == REST {
			continue;
		}
		if matches.value_source(id) == Some(ValueSource::DefaultValue) && cxt.has(id).is_some() {
			continue;
		}
		if let Some(value) = flag_value(&matches, id, arg.get_action()) {
			cxt.add(id, value);
		}
	}

	Ok(raw_strings(&matches, REST).unwrap_or_default())
}

fn flag_value(matches: &ArgMatches, id: &str, action: &ArgAction) -> Option<Value> {
	match action {
		ArgAction::SetTrue | ArgAction::SetFalse => Some(Value::from(matches.get_flag(id))),
		ArgAction::Count => Some(Value::from(matches.get_count(id))),
		ArgAction::Set => raw_strings(matches, id)
			.and_then(|mut values| values.pop())
			.map(Value::from),
		ArgAction::Append => raw_strings(matches, id).map(Value::from),
		_ => None,
	}
}

fn raw_strings(matches: &ArgMatches, id: &str) -> Option<Vec<String>> {
	matches
		.get_raw(id)
		.map(|values| values.map(|v| v.to_string_lossy().into_owned()).collect())
}
