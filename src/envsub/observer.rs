//! Optional diagnostics for the region interpolator.
//!
//! The interpolator never prints. Callers that want to see what happened to
//! each line pass an [`InterpolationObserver`]; the CLI uses
//! [`TracingObserver`], which logs at `debug` level.

use super::region::Marker;

/// Receives events while a document is processed.
///
/// All methods default to doing nothing, so implementors only override the
/// events they care about. Line numbers are 1-based.
pub trait InterpolationObserver {
    /// A marker line was seen.
    fn on_marker(&mut self, _line_number: usize, _marker: Marker) {}

    /// A line inside a region was interpolated.
    fn on_interpolated(&mut self, _line_number: usize, _original: &str, _interpolated: &str) {}

    /// A line inside a region failed to interpolate.
    fn on_failure(&mut self, _line_number: usize, _line: &str, _reason: &str) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl InterpolationObserver for NoopObserver {}

/// Observer that reports events through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingObserver {
    document: String,
}

impl TracingObserver {
    /// Create an observer that tags events with the given document name.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl InterpolationObserver for TracingObserver {
    fn on_marker(&mut self, line_number: usize, marker: Marker) {
        tracing::debug!("{}:{}: {:?} marker", self.document, line_number, marker);
    }

    fn on_interpolated(&mut self, line_number: usize, original: &str, interpolated: &str) {
        if original != interpolated {
            tracing::debug!(
                "{}:{}: {:?} -> {:?}",
                self.document,
                line_number,
                original,
                interpolated
            );
        }
    }

    fn on_failure(&mut self, line_number: usize, line: &str, reason: &str) {
        tracing::debug!("{}:{}: {:?} failed: {}", self.document, line_number, line, reason);
    }
}
