//! Reporting of non-fatal data-quality problems
//!
//! The transformer never logs warnings directly; it hands them to a
//! [`TransformReporter`]. Binaries use [`TracingReporter`], tests can use
//! [`RecordingReporter`] to inspect what was reported.

use std::cell::RefCell;
use std::fmt;

use tracing::warn;

/// A non-fatal problem noticed while building a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformWarning {
    /// The requested span went past the feed's look-ahead and was reduced
    SpanClamped {
        requested_days: u32,
        offset: u32,
        effective_days: i64,
        max_days: u32,
    },
    /// A category label has no ETSI equivalent
    UnmappedCategory { label: String },
}

impl fmt::Display for TransformWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpanClamped {
                requested_days,
                offset,
                effective_days,
                max_days,
            } => write!(
                f,
                "Grabber can only fetch programs up to {max_days} days in the future \
                 (requested {requested_days} days at offset {offset}, using {effective_days})"
            ),
            Self::UnmappedCategory { label } => {
                write!(f, "TVClub category {label} has no defined ETSI equivalent")
            }
        }
    }
}

/// Receives warnings raised while transforming a listing
pub trait TransformReporter {
    fn report(&self, warning: TransformWarning);
}

/// Forwards warnings to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl TransformReporter for TracingReporter {
    fn report(&self, warning: TransformWarning) {
        warn!("{}", warning);
    }
}

/// Keeps every reported warning in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    warnings: RefCell<Vec<TransformWarning>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the warnings reported so far
    pub fn warnings(&self) -> Vec<TransformWarning> {
        self.warnings.borrow().clone()
    }
}

impl TransformReporter for RecordingReporter {
    fn report(&self, warning: TransformWarning) {
        self.warnings.borrow_mut().push(warning);
    }
}
