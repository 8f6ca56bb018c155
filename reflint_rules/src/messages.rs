//! Diagnostic message catalog.

/// Stable identifiers for the diagnostics a rule can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    /// An effect whose dependencies are all internal state or props.
    AvoidInternalEffect,
    /// A child resetting state and notifying its parent from an effect.
    AvoidParentChildCoupling,
}

impl MessageId {
    /// The identifier attached to diagnostics. Stable across releases:
    /// suppression comments and snapshot tests key on it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AvoidInternalEffect => "avoidInternalEffect",
            Self::AvoidParentChildCoupling => "avoidParentChildCoupling",
        }
    }

    /// Human-readable message text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::AvoidInternalEffect => {
                "this effect only reacts to internal values; update them where they change or derive the result during render"
            }
            Self::AvoidParentChildCoupling => {
                "avoid notifying the parent from an effect on child state; lift the state up or call the handler in the event that changed it"
            }
        }
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
