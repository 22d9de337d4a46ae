//! Port direction tags.

use std::fmt;

/// Which way material or information flows through a port.
///
/// The tree has no other way to know directionality, so every port that
/// takes part in inlet auto-registration must carry one of these tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// Flow enters the owning scope through this port.
    Inlet,
    /// Flow leaves the owning scope through this port.
    Outlet,
}

impl PortDirection {
    /// Whether this is [`PortDirection::Inlet`].
    pub fn is_inlet(self) -> bool {
        matches!(self, Self::Inlet)
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inlet => write!(f, "inlet"),
            Self::Outlet => write!(f, "outlet"),
        }
    }
}
