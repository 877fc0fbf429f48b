//! Construction strategies.

use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How sections are turned into scene objects. Chosen once per build.
///
/// | Strategy | Unit | Shared vertices | Resampled |
/// |---|---|---|---|
/// | `DisconnectedSegments` | sample pair | none | no |
/// | `DisconnectedSections` | section | none | no |
/// | `ConnectedSections` | section | child start = parent end | no |
/// | `DisconnectedSkeleton` | section | none | yes |
/// | `ArticulatedSections` | section + joint sphere | none | no |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Every segment is an independent object.
    DisconnectedSegments,
    /// Every section is an independent object.
    DisconnectedSections,
    /// Sections are welded to their parent at the continuity point.
    #[default]
    ConnectedSections,
    /// Independent sections drawn from resampled samples.
    DisconnectedSkeleton,
    /// Independent sections articulated by joint spheres.
    ArticulatedSections,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 5] = [
        Strategy::DisconnectedSegments,
        Strategy::DisconnectedSections,
        Strategy::ConnectedSections,
        Strategy::DisconnectedSkeleton,
        Strategy::ArticulatedSections,
    ];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Strategy::DisconnectedSegments => "disconnected-segments",
            Strategy::DisconnectedSections => "disconnected-sections",
            Strategy::ConnectedSections => "connected-sections",
            Strategy::DisconnectedSkeleton => "disconnected-skeleton",
            Strategy::ArticulatedSections => "articulated-sections",
        }
    }

    /// Whether terminal sections are capped with a sphere.
    pub fn uses_terminals(self) -> bool {
        matches!(
            self,
            Strategy::DisconnectedSegments
                | Strategy::DisconnectedSections
                | Strategy::ArticulatedSections
        )
    }

    /// Whether sections are resampled before drawing.
    pub fn uses_resampler(self) -> bool {
        self == Strategy::DisconnectedSkeleton
    }

    /// Whether child sections share their first vertex with the parent.
    pub fn welds_sections(self) -> bool {
        self == Strategy::ConnectedSections
    }

    /// Whether every segment becomes its own object.
    pub fn is_per_segment(self) -> bool {
        self == Strategy::DisconnectedSegments
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == wanted)
            .ok_or_else(|| BuildError::UnknownStrategy(s.to_string()))
    }
}
