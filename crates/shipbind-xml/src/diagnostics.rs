//! Non-fatal diagnostics gathered during one parse.

use std::io::{self, Write};

/// Ordered log of advisory messages.
///
/// A non-empty collector does not invalidate the tree it was filled for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collector {
    messages: Vec<String>,
}

impl Collector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn add(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(%message, "collected diagnostic");
        self.messages.push(message);
    }

    /// Appends a message about `field`, prefixed with its source line when known.
    pub fn add_field(&mut self, field: &str, line: Option<u64>, description: &str) {
        let message = match line {
            Some(line) => format!("{field} near line {line}: {description}"),
            None => format!("{field}: {description}"),
        };
        self.add(message);
    }

    /// Returns the messages in insertion order.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Removes every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` when nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Consumes the collector, returning its messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }

    /// Writes one `Warning: <message>` line per message.
    pub fn write_messages<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for message in &self.messages {
            writeln!(writer, "Warning: {message}")?;
        }
        Ok(())
    }
}
