use coco_primitives::{CommandResult, Params, Value};
use coco_registry::RegistryBuilder;
use rstest::rstest;

use super::*;

fn noop(_cxt: &mut Context, _params: &Params) -> CommandResult {
	Ok(Value::nil())
}

fn resolver_for(routes: &[&str]) -> PathPatternResolver {
	let mut builder = RegistryBuilder::new();
	for route in routes {
		builder.route(*route, "test").does(noop, "noop");
	}
	let mut resolver = PathPatternResolver::new();
	resolver.init(&Arc::new(builder.build().unwrap()));
	resolver
}

const ORDERED: &[&str] = &[
	"/foo/bar/baz",
	"/foo/bar/*",
	"/foo/c??/baz",
	"/foo/[cft]ar/baz",
	"/foo/*/baz",
	"/foo/[0-9]*/baz",
	"/*/*/*",
];

#[rstest]
#[case("/foo/bar/baz", "/foo/bar/baz")]
#[case("/foo/bar/blurp", "/foo/bar/*")]
#[case("/foo/car/baz", "/foo/c??/baz")]
#[case("/foo/anything/baz", "/foo/*/baz")]
#[case("/foo/far/baz", "/foo/[cft]ar/baz")]
#[case("/a/b/c", "/*/*/*")]
fn first_declared_match_wins(#[case] request: &str, #[case] expected: &str) {
	let resolver = resolver_for(ORDERED);
	assert_eq!(resolver.resolve(request, &mut Context::new()).unwrap(), expected);
}

#[test]
fn wildcards_stay_within_a_segment() {
	let resolver = resolver_for(&["/foo/*"]);
	let mut cxt = Context::new();
	assert_eq!(resolver.resolve("/foo/bar", &mut cxt).unwrap(), "/foo/*");
	assert!(matches!(
		resolver.resolve("/foo/bar/baz", &mut cxt),
		Err(ResolveError::NoMatch(request)) if request == "/foo/bar/baz"
	));
}

#[test]
fn bad_pattern_reported_only_when_reached() {
	let resolver = resolver_for(&["/ok", "/bad[", "/later"]);
	let mut cxt = Context::new();
	assert_eq!(resolver.resolve("/ok", &mut cxt).unwrap(), "/ok");
	assert!(matches!(
		resolver.resolve("/later", &mut cxt),
		Err(ResolveError::BadPattern { pattern, .. }) if pattern == "/bad["
	));
}

#[test]
fn braces_are_literal() {
	let resolver = resolver_for(&["/users/{id}", "/users/*"]);
	let mut cxt = Context::new();
	assert_eq!(resolver.resolve("/users/{id}", &mut cxt).unwrap(), "/users/{id}");
	assert_eq!(resolver.resolve("/users/42", &mut cxt).unwrap(), "/users/*");
	assert!(resolver.resolve("/users/id", &mut cxt).is_ok_and(|route| route == "/users/*"));
}

#[test]
fn double_star_stays_within_a_segment() {
	let resolver = resolver_for(&["/files/**"]);
	let mut cxt = Context::new();
	assert_eq!(resolver.resolve("/files/a.txt", &mut cxt).unwrap(), "/files/**");
	assert!(matches!(
		resolver.resolve("/files/a/b.txt", &mut cxt),
		Err(ResolveError::NoMatch(_))
	));
}

#[rstest]
#[case("/users/{id}", "/users/[{]id[}]")]
#[case("/a/**/b", "/a/*/b")]
#[case("/[{]x", "/[{]x")]
#[case("/a\\*", "/a\\*")]
fn route_names_become_path_globs(#[case] name: &str, #[case] glob: &str) {
	assert_eq!(path_glob(name), glob);
}
