//! Change event tags delivered by the bridge.

use std::fmt;

/// The class of network configuration change that occurred.
///
/// Only the occurrence matters: the row the OS hands to its callback is
/// discarded, so consumers must re-read whatever state they care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    /// A unicast IP address was added, removed, or modified.
    AddressChanged,
    /// An IP routing table entry was added, removed, or modified.
    RouteChanged,
}

impl ChangeEvent {
    /// Short label used in log lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddressChanged => "addr",
            Self::RouteChanged => "route",
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_short_tags() {
        assert_eq!(ChangeEvent::AddressChanged.label(), "addr");
        assert_eq!(ChangeEvent::RouteChanged.label(), "route");
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(ChangeEvent::RouteChanged.to_string(), "route");
    }
}
