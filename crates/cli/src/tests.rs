use std::io::Write;

use clap::Parser;
use coco_primitives::Value;
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use super::*;

const MANIFEST: &str = r#"
resolver = "flags"

[[route]]
name = "hello"

[[route.does]]
command = "greeting"
handler = "log"
using = [{ name = "msg", default = "hello", from = "cxt:args" }]

[[route]]
name = "@setup"

[[route.does]]
command = "log"

[[route]]
name = "again"

[[route.does]]
command = "reroute"
using = [{ name = "route", default = "hello" }]
"#;

fn write_manifest(content: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(content.as_bytes()).unwrap();
	file
}

fn manifest() -> NamedTempFile {
	write_manifest(MANIFEST)
}

fn cli(file: &NamedTempFile, extra: &[&str]) -> Cli {
	let path = file.path().to_str().unwrap();
	Cli::try_parse_from(["coco", "--routes", path].iter().chain(extra)).unwrap()
}

#[test]
fn parses_arguments() {
	let cli = Cli::try_parse_from(["coco", "-r", "routes.toml", "--trusted", "hello", "-x", "world"]).unwrap();
	assert_eq!(cli.routes.to_str(), Some("routes.toml"));
	assert!(cli.trusted);
	assert!(!cli.help);
	assert_eq!(cli.log, None);
	assert_eq!(cli.request, ["hello", "-x", "world"]);
	assert_eq!(cli.request(), "hello -x world");
}

#[test]
fn help_is_the_default_request() {
	let bare = Cli::try_parse_from(["coco", "-r", "routes.toml"]).unwrap();
	assert_eq!(bare.request(), "help");

	let asked = Cli::try_parse_from(["coco", "-r", "routes.toml", "-h", "hello"]).unwrap();
	assert!(asked.help);
	assert_eq!(asked.request(), "help");
}

#[test]
fn runs_the_resolved_route() {
	let file = manifest();
	let cxt = run(&cli(&file, &["hello", "world"])).unwrap();

	assert_eq!(
		cxt.get("os.Args", Value::nil()).downcast_ref::<Vec<String>>(),
		Some(&vec!["hello".to_string(), "world".to_string()])
	);
	assert_eq!(
		cxt.get("args", Value::nil()).downcast_ref::<Vec<String>>(),
		Some(&vec!["world".to_string()])
	);
	assert!(cxt.has("greeting").is_some());
}

#[test]
fn reroutes_through_builtins() {
	let file = manifest();
	let cxt = run(&cli(&file, &["again"])).unwrap();
	assert!(cxt.has("greeting").is_some());
	assert!(cxt.has("reroute").is_none());
}

#[test]
fn requests_are_tainted_unless_trusted() {
	let file = manifest();
	let err = run(&cli(&file, &["@setup"])).unwrap_err();
	assert!(format!("{err:#}").contains("@setup"), "{err:#}");
	assert!(run(&cli(&file, &["--trusted", "@setup"])).is_ok());
}

#[test]
fn fallback_help_route_is_registered() {
	let file = manifest();
	let cxt = run(&cli(&file, &[])).unwrap();
	assert_eq!(cxt.get("help", Value::nil()).downcast_ref::<bool>(), Some(&true));
	assert!(cxt.has("greeting").is_none());
}

#[test]
fn declared_help_route_wins() {
	let file = write_manifest(&format!(
		"{MANIFEST}\n[[route]]\nname = \"help\"\n\n[[route.does]]\ncommand = \"custom_help\"\nhandler = \"log\"\n"
	));
	let cxt = run(&cli(&file, &["-h"])).unwrap();
	assert!(cxt.has("custom_help").is_some());
	assert!(cxt.has("help").is_none());
}

#[test]
fn startup_runs_untainted_before_the_request() {
	let file = write_manifest(&format!(
		"{MANIFEST}\n[[route]]\nname = \"@startup\"\n\n[[route.does]]\ncommand = \"booted\"\nhandler = \"log\"\n"
	));
	let cxt = run(&cli(&file, &["hello"])).unwrap();
	assert!(cxt.has("booted").is_some());
	assert!(cxt.has("greeting").is_some());
}

#[test]
fn startup_help_skips_the_request() {
	let file = write_manifest(&format!(
		"{MANIFEST}\n[[route]]\nname = \"@startup\"\n\n[[route.does]]\ncommand = \"help\"\nusing = [{{ name = \"show\", default = true }}]\n"
	));
	let cxt = run(&cli(&file, &["hello"])).unwrap();
	assert_eq!(cxt.get("help", Value::nil()).downcast_ref::<bool>(), Some(&true));
	assert!(cxt.has("greeting").is_none());
}

#[test]
fn missing_manifest_fails() {
	let dir = tempfile::tempdir().unwrap();
	let cli = Cli::try_parse_from([
		"coco",
		"--routes",
		dir.path().join("nope.toml").to_str().unwrap(),
		"hello",
	])
	.unwrap();
	let err = run(&cli).unwrap_err();
	assert!(format!("{err:#}").contains("nope.toml"), "{err:#}");
}
