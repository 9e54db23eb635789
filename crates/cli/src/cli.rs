use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "coco")]
#[command(about = "Run a route from a route manifest")]
#[command(version)]
#[command(disable_help_flag = true)]
/// Command-line arguments.
pub struct Cli {
	/// Route manifest to load
	#[arg(long, short = 'r', value_name = "FILE")]
	pub routes: PathBuf,

	/// Allow the request to name routes starting with '@'
	#[arg(long)]
	pub trusted: bool,

	/// Log filter directives (e.g. debug, coco_router=trace)
	#[arg(long, value_name = "FILTER")]
	pub log: Option<String>,

	/// Run the help route instead of the request
	#[arg(long, short = 'h', action = ArgAction::SetTrue)]
	pub help: bool,

	/// The request, handed to the manifest's resolver (default: help)
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	pub request: Vec<String>,
}

impl Cli {
	/// The request to dispatch; `help` when asked for or when none was given.
	pub fn request(&self) -> String {
		if self.help || self.request.is_empty() {
			crate::HELP_ROUTE.to_string()
		} else {
			self.request.join(" ")
		}
	}
}
