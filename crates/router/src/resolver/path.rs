use std::sync::Arc;

use coco_primitives::Context;
use coco_registry::Registry;
use globset::{GlobBuilder, GlobMatcher};
use tracing::trace;

use super::RequestResolver;
use crate::ResolveError;

/// Resolves path-like requests against route names used as glob patterns.
///
/// The dialect is that of shell path matching: `*`, `?` and `[...]` never
/// match across `/`, `**` is the same as `*`, and braces are literal, so a
/// route named `/users/{id}` matches only itself. Patterns are tried in route
/// declaration order and the first match wins, so more specific routes must
/// be declared first:
///
/// ```text
/// /foo/bar/baz   matches only itself
/// /foo/bar/*     then anything else directly under /foo/bar
/// /foo/*/baz     then any other middle segment
/// ```
#[derive(Debug, Default)]
pub struct PathPatternResolver {
	patterns: Vec<(String, Result<GlobMatcher, globset::Error>)>,
}

impl PathPatternResolver {
	pub fn new() -> Self {
		Self::default()
	}
}

impl RequestResolver for PathPatternResolver {
	fn init(&mut self, registry: &Arc<Registry>) {
		self.patterns = registry
			.route_names()
			.iter()
			.map(|name| {
				let matcher = GlobBuilder::new(&path_glob(name))
					.literal_separator(true)
					.build()
					.map(|glob| glob.compile_matcher());
				(name.clone(), matcher)
			})
			.collect();
	}

	fn resolve(&self, request: &str, _cxt: &mut Context) -> Result<String, ResolveError> {
		for (pattern, matcher) in &self.patterns {
			match matcher {
				Ok(m) if m.is_match(request) => {
					trace!(request, pattern = %pattern, "path matched");
					return Ok(pattern.clone());
				}
				Ok(_) => {}
				Err(err) => {
					return Err(ResolveError::BadPattern {
						pattern: pattern.clone(),
						source: err.clone(),
					});
				}
			}
		}
		Err(ResolveError::NoMatch(request.to_string()))
	}
}

/// Rewrites a route name into a glob with no brace alternation or `**`.
fn path_glob(name: &str) -> String {
	let mut glob = String::with_capacity(name.len());
	let mut chars = name.chars();
	let mut in_class = false;
	let mut after_star = false;
	while let Some(c) = chars.next() {
		let star = c == '*' && !in_class;
		match c {
			'\\' => {
				glob.push(c);
				glob.extend(chars.next());
			}
			'[' if !in_class => {
				in_class = true;
				glob.push(c);
			}
			']' if in_class => {
				in_class = false;
				glob.push(c);
			}
			'{' | '}' if !in_class => {
				glob.push('[');
				glob.push(c);
				glob.push(']');
			}
			'*' if star && after_star => {}
			_ => glob.push(c),
		}
		after_star = star;
	}
	glob
}

#[cfg(test)]
mod tests;
