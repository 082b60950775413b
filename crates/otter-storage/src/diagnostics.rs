//! Diagnostic sinks for recoverable misuse such as invalid keys

use parking_lot::Mutex;
use std::sync::Arc;

/// Separator placed between the parts of a reported message.
pub const MESSAGE_SEPARATOR: &str = " | ";

/// Error-level channel for diagnostics. Reporting never fails.
pub trait DiagnosticSink {
    fn error(&self, message: &str);
}

/// Emits diagnostics as `tracing` error events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&self, message: &str) {
        tracing::error!(target: "otter_storage", "{message}");
    }
}

/// Keeps every reported message in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn error(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Join message parts the way every sink receives them.
pub(crate) fn join_parts(parts: &[&str]) -> String {
    parts.join(MESSAGE_SEPARATOR)
}
