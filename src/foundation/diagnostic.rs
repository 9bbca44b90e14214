/// A recovered, non-fatal problem reported by a per-character operation.
///
/// The operation that produced it had no effect.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Index outside `[0, char_count)`.
    #[error("{op}: index {index} out of bounds for {count} characters")]
    IndexOutOfRange {
        /// Operation name.
        op: &'static str,
        /// Offending index.
        index: usize,
        /// Character count at the time of the call.
        count: usize,
    },

    /// Sequential dispatch needs at least two characters with a visual element.
    #[error("{op} requires at least 2 characters to operate, found {count}")]
    TooFewCharacters {
        /// Operation name.
        op: &'static str,
        /// Number of eligible characters.
        count: usize,
    },

    /// The operation was skipped for another reason (for example a ghost label could not be built).
    #[error("{op}: {reason}")]
    Skipped {
        /// Operation name.
        op: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

/// Default number of diagnostics a [`DiagnosticLog`] keeps.
pub const DEFAULT_DIAGNOSTIC_LIMIT: usize = 1024;

/// Bounded log of diagnostics, mirrored to `tracing` at warn level.
///
/// Once `limit` entries are held, recording drops the oldest one and counts
/// it in [`DiagnosticLog::dropped`].
#[derive(Clone, Debug)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
    limit: usize,
    dropped: u64,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::with_limit(DEFAULT_DIAGNOSTIC_LIMIT)
    }
}

impl DiagnosticLog {
    /// Log keeping at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
            dropped: 0,
        }
    }

    /// Record one diagnostic.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(%diagnostic, "letterfx operation skipped");
        if self.entries.len() >= self.limit {
            self.entries.remove(0);
            self.dropped += 1;
        }
        self.entries.push(diagnostic);
    }

    /// Diagnostics discarded because the log was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// All diagnostics recorded so far.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove and return every recorded diagnostic.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/diagnostic.rs"]
mod tests;
