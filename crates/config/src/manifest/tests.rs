use std::io::Write;

use coco_primitives::{Context, Interrupt, Value};
use pretty_assertions::assert_eq;

use super::*;

fn catalog() -> HandlerCatalog {
	let mut catalog = HandlerCatalog::new();
	catalog
		.register("echo", |_cxt, params| Ok(params.get("msg", Value::nil())))
		.register("stop", |_cxt, _params| Err(Interrupt::stop()));
	catalog
}

const HELLO: &str = r#"
[[route]]
name = "hello"
description = "Say hello"

[[route.does]]
command = "greet"
handler = "echo"
using = [{ name = "msg", default = "hello", from = "cxt:msg" }]

[[route]]
name = "twice"

[[route.does]]
include = "hello"

[[route.does]]
command = "echo"
"#;

#[test]
fn parses_routes_and_steps() {
	let manifest: Manifest = HELLO.parse().unwrap();
	assert_eq!(manifest.resolver, ResolverKind::Identity);
	assert_eq!(manifest.routes.len(), 2);
	assert_eq!(manifest.routes[0].description, "Say hello");
	assert_eq!(manifest.routes[1].does[0].include.as_deref(), Some("hello"));
}

#[test]
fn builds_a_registry() {
	let manifest: Manifest = HELLO.parse().unwrap();
	let registry = manifest.build(&catalog()).unwrap();

	assert_eq!(registry.route_names(), ["hello", "twice"]);
	let hello = registry.route_spec("hello").unwrap();
	let greet = &hello.commands()[0];
	assert_eq!(greet.name(), "greet");
	assert_eq!(greet.params()[0].from().raw(), "cxt:msg");
	assert_eq!(greet.params()[0].default().downcast_ref::<String>().map(String::as_str), Some("hello"));

	let twice = registry.route_spec("twice").unwrap();
	let names: Vec<&str> = twice.commands().iter().map(|c| c.name()).collect();
	assert_eq!(names, ["greet", "echo"]);
}

#[test]
fn manifest_routes_dispatch() {
	let manifest: Manifest = HELLO.parse().unwrap();
	let router = manifest.router(Arc::new(manifest.build(&catalog()).unwrap()));

	let mut cxt = Context::new();
	cxt.add("msg", "from context");
	router.handle_request("twice", &mut cxt, false).unwrap();
	assert_eq!(
		cxt.get("greet", Value::nil()).downcast_ref::<String>().map(String::as_str),
		Some("from context")
	);
	assert!(cxt.get("echo", Value::from("x")).is_nil());
}

#[test]
fn unknown_handler_is_reported() {
	let manifest: Manifest = r#"
[[route]]
name = "a"
[[route.does]]
command = "missing"
"#
	.parse()
	.unwrap();

	let err = manifest.build(&catalog()).unwrap_err();
	assert!(
		matches!(&err, ConfigError::UnknownHandler { route, handler } if route == "a" && handler == "missing"),
		"{err}"
	);
}

#[test]
fn invalid_steps_are_rejected() {
	for body in [
		"command = \"echo\"\ninclude = \"b\"",
		"handler = \"echo\"",
		"include = \"b\"\nusing = [{ name = \"x\" }]",
	] {
		let src = format!("[[route]]\nname = \"a\"\n[[route.does]]\n{body}\n");
		let manifest: Manifest = src.parse().unwrap();
		let err = manifest.build(&catalog()).unwrap_err();
		assert!(
			matches!(err, ConfigError::InvalidStep { index: 0, .. }),
			"{body}: {err}"
		);
	}
}

#[test]
fn failed_apply_leaves_builder_untouched() {
	let manifest: Manifest = r#"
[[route]]
name = "ok"
[[route.does]]
command = "echo"

[[route]]
name = "bad"
[[route.does]]
command = "nope"
"#
	.parse()
	.unwrap();

	let mut builder = RegistryBuilder::new();
	assert!(manifest.apply(&catalog(), &mut builder).is_err());
	assert!(builder.is_empty());
}

#[test]
fn registry_errors_pass_through() {
	let manifest: Manifest = r#"
[[route]]
name = "a"
[[route.does]]
include = "ghost"
"#
	.parse()
	.unwrap();

	let err = manifest.build(&catalog()).unwrap_err();
	assert!(matches!(err, ConfigError::Registry(_)), "{err}");
}

#[test]
fn unknown_fields_fail_to_parse() {
	let err = "[[route]]\nname = \"a\"\nsummary = \"?\"\n".parse::<Manifest>().unwrap_err();
	assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn resolver_kind_selects_resolver() {
	let manifest: Manifest = r#"
resolver = "path"

[[route]]
name = "users/*"
[[route.does]]
command = "stop"
"#
	.parse()
	.unwrap();
	assert_eq!(manifest.resolver, ResolverKind::Path);

	let router = manifest.router(Arc::new(manifest.build(&catalog()).unwrap()));
	let mut cxt = Context::new();
	assert_eq!(router.resolve_request("users/42", &mut cxt).unwrap(), "users/*");
}

#[test]
fn from_path_reads_files() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	file.write_all(HELLO.as_bytes()).unwrap();

	let manifest = Manifest::from_path(file.path()).unwrap();
	assert_eq!(manifest.routes.len(), 2);
}

#[test]
fn from_path_reports_missing_files() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("routes.toml");

	let err = Manifest::from_path(&path).unwrap_err();
	assert!(matches!(&err, ConfigError::Io { path: p, .. } if *p == path), "{err}");
}

#[test]
fn toml_literals_convert() {
	let strings = toml_to_value(toml::Value::Array(vec!["a".into(), "b".into()]));
	assert_eq!(
		strings.downcast_ref::<Vec<String>>(),
		Some(&vec!["a".to_string(), "b".to_string()])
	);

	assert_eq!(toml_to_value(toml::Value::Integer(3)).downcast_ref::<i64>(), Some(&3));
	assert_eq!(toml_to_value(toml::Value::Boolean(true)).downcast_ref::<bool>(), Some(&true));

	let mixed = toml_to_value(toml::Value::Array(vec![toml::Value::Integer(1), "a".into()]));
	assert!(mixed.is::<toml::Value>());
}
