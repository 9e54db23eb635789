use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing_subscriber::fmt::MakeWriter;

type Sink = Box<dyn Write + Send>;

/// A shared, named set of log destinations.
///
/// Clones share the same set, so a sink added through one handle receives
/// output written through any other. Every write is fanned out to all sinks.
#[derive(Clone, Default)]
pub struct LogSinks {
	inner: Arc<Mutex<FxHashMap<String, Sink>>>,
}

impl LogSinks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a sink, returning the one it replaced.
	pub fn add(&self, name: impl Into<String>, sink: impl Write + Send + 'static) -> Option<Sink> {
		self.inner.lock().insert(name.into(), Box::new(sink))
	}

	/// Removes a sink, returning it.
	pub fn remove(&self, name: &str) -> Option<Sink> {
		self.inner.lock().remove(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.inner.lock().contains_key(name)
	}

	/// Sink names, sorted.
	pub fn names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.inner.lock().keys().cloned().collect();
		names.sort_unstable();
		names
	}

	pub fn len(&self) -> usize {
		self.inner.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().is_empty()
	}

	/// Returns a writer that fans out to every sink.
	pub fn writer(&self) -> SinkWriter {
		SinkWriter { sinks: self.clone() }
	}

	/// Writes one line, `prefix` immediately followed by the message.
	pub fn log(&self, prefix: &str, args: fmt::Arguments<'_>) -> io::Result<()> {
		let line = format!("{prefix}{args}\n");
		self.writer().write_all(line.as_bytes())
	}
}

impl fmt::Debug for LogSinks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LogSinks").field("names", &self.names()).finish()
	}
}

impl<'a> MakeWriter<'a> for LogSinks {
	type Writer = SinkWriter;

	fn make_writer(&'a self) -> Self::Writer {
		self.writer()
	}
}

/// Fan-out writer over a [`LogSinks`] set.
///
/// A sink that accepts fewer bytes than offered fails the write with
/// [`io::ErrorKind::WriteZero`]; sinks after it do not see the data.
#[derive(Debug)]
pub struct SinkWriter {
	sinks: LogSinks,
}

impl Write for SinkWriter {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let mut sinks = self.sinks.inner.lock();
		for (name, sink) in sinks.iter_mut() {
			let n = sink.write(buf)?;
			if n != buf.len() {
				return Err(io::Error::new(
					io::ErrorKind::WriteZero,
					format!("short write to log sink '{name}': {n} of {} bytes", buf.len()),
				));
			}
		}
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		self.sinks.inner.lock().values_mut().try_for_each(|sink| sink.flush())
	}
}
