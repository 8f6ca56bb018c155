//! The diagnostic model rules emit.
//!
//! The analysis core never formats messages; it attaches a stable message
//! identifier to a source span and leaves rendering to the host.

use crate::span::Span;
use std::cmp::Ordering;

/// A single finding attached to a source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the rule that produced the finding.
    pub rule: &'static str,
    /// Stable message identifier (e.g. `avoidParentChildCoupling`).
    pub message_id: &'static str,
    /// Human-readable message, resolved by the rule host.
    pub message: String,
    /// Location the finding is attached to.
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic.
    #[must_use]
    pub fn new(
        rule: &'static str,
        message_id: &'static str,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            rule,
            message_id,
            message: message.into(),
            span,
        }
    }

    /// Stable ordering: source position first, then message id.
    ///
    /// Repeated runs over the same tree must report in the same order, so
    /// results can be snapshotted and cached downstream.
    #[must_use]
    pub fn stable_cmp(&self, other: &Diagnostic) -> Ordering {
        self.span
            .start
            .cmp(&other.span.start)
            .then(self.span.end.cmp(&other.span.end))
            .then(self.rule.cmp(other.rule))
            .then(self.message_id.cmp(other.message_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_ordering_by_position_then_id() {
        let early = Diagnostic::new("r", "b", "m", Span::new(1, 4));
        let late = Diagnostic::new("r", "a", "m", Span::new(9, 12));
        assert_eq!(early.stable_cmp(&late), Ordering::Less);

        let a = Diagnostic::new("r", "avoidInternalEffect", "m", Span::new(1, 4));
        let b = Diagnostic::new("r", "avoidParentChildCoupling", "m", Span::new(1, 4));
        assert_eq!(a.stable_cmp(&b), Ordering::Less);
    }

    #[test]
    fn test_equal_diagnostics_compare_equal() {
        let a = Diagnostic::new("r", "id", "m", Span::new(0, 1));
        let b = a.clone();
        assert_eq!(a.stable_cmp(&b), Ordering::Equal);
    }
}
