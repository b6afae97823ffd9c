//! Diagnostic logging sink handed to router factories

use std::fmt;
use std::sync::Arc;

/// A write-only sink for diagnostic lines
///
/// Routers only ever write to it; nothing read from a `Logf` influences
/// control flow. Cloning is cheap and clones share the same sink.
#[derive(Clone)]
pub struct Logf {
    sink: Arc<dyn Fn(&str) + Send + Sync>,
}

impl Logf {
    /// Wrap an arbitrary closure as a sink
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        Self { sink: Arc::new(f) }
    }

    /// A sink that drops everything
    pub fn discard() -> Self {
        Self::new(|_| {})
    }

    /// A sink that forwards each line to the `log` facade at info level
    pub fn from_log(target: &'static str) -> Self {
        Self::new(move |line| log::info!(target: target, "{}", line))
    }

    /// Return a sink that prepends `prefix` to every line
    pub fn with_prefix(&self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let inner = self.clone();
        Self::new(move |line| inner.log(&format!("{}{}", prefix, line)))
    }

    /// Write one line to the sink
    pub fn log(&self, line: &str) {
        (self.sink)(line)
    }
}

impl Default for Logf {
    fn default() -> Self {
        Self::from_log("hop_router")
    }
}

impl fmt::Debug for Logf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logf").finish_non_exhaustive()
    }
}
