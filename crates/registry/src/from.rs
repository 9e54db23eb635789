//! Parameter source expressions.
//!
//! A source expression is a whitespace-separated list of `source:key` tokens,
//! tried left to right when a parameter is resolved:
//!
//! ```text
//! cxt:user ds:db session:user_id
//! ```
//!
//! `c`, `cxt` and `context` read a context variable. `datasource` and `ds`
//! yield the named datasource itself. Any other source names a datasource to
//! query with the key.

use std::fmt;

/// One parsed `source:key` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
	/// A context variable.
	Context(String),
	/// A datasource handle, by name.
	Datasource(String),
	/// A key inside a keyed datasource.
	Lookup { datasource: String, key: String },
}

impl Source {
	/// Parses a single token. Text after the first colon is the key; a token
	/// without a colon has an empty key.
	pub fn parse(token: &str) -> Self {
		let (source, key) = token.split_once(':').unwrap_or((token, ""));
		match source {
			"c" | "cxt" | "context" => Self::Context(key.to_string()),
			"datasource" | "ds" => Self::Datasource(key.to_string()),
			_ => Self::Lookup {
				datasource: source.to_string(),
				key: key.to_string(),
			},
		}
	}
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Context(key) => write!(f, "cxt:{key}"),
			Self::Datasource(name) => write!(f, "ds:{name}"),
			Self::Lookup { datasource, key } => write!(f, "{datasource}:{key}"),
		}
	}
}

/// A parsed source expression, keeping the text it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FromExpr {
	raw: String,
	sources: Vec<Source>,
}

impl FromExpr {
	/// Parses `raw` into its ordered sources.
	pub fn parse(raw: impl Into<String>) -> Self {
		let raw = raw.into();
		let sources = raw.split_whitespace().map(Source::parse).collect();
		Self { raw, sources }
	}

	/// The expression as written.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Sources in evaluation order.
	pub fn sources(&self) -> &[Source] {
		&self.sources
	}

	/// Returns true if there is nothing to evaluate.
	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}
}
