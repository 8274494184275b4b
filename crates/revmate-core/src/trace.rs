use std::sync::Mutex;

/// A line-oriented diagnostic channel injected into the analysis.
///
/// The analysis writes human-readable progress and failure lines here
/// instead of holding a logger of its own; the host decides where the lines
/// go. Implementations must tolerate being called from a single thread of
/// control only.
///
/// # Examples
///
/// ```
/// use revmate_core::{MemoryTrace, TraceSink};
///
/// let trace = MemoryTrace::default();
/// trace.line("head: a3f8c1d2");
/// assert_eq!(trace.lines(), vec!["head: a3f8c1d2"]);
/// ```
pub trait TraceSink {
    /// Write one diagnostic line.
    fn line(&self, message: &str);
}

/// Trace sink that writes prefixed lines to stderr.
#[derive(Debug, Default)]
pub struct StderrTrace;

impl TraceSink for StderrTrace {
    fn line(&self, message: &str) {
        eprintln!("[revmate] {message}");
    }
}

/// Trace sink that discards everything.
#[derive(Debug, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn line(&self, _message: &str) {}
}

/// Trace sink that collects lines in memory.
///
/// Used by tests to assert on walk behavior; also usable by hosts that want
/// to attach the trace to their own output channel after the run.
#[derive(Debug, Default)]
pub struct MemoryTrace {
    lines: Mutex<Vec<String>>,
}

impl MemoryTrace {
    /// A snapshot of the collected lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("trace lock").clone()
    }
}

impl TraceSink for MemoryTrace {
    fn line(&self, message: &str) {
        self.lines.lock().expect("trace lock").push(message.into());
    }
}
