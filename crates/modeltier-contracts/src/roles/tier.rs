use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability bracket a role draws its model from.
///
/// Serialized as the integer rank (`1` best through `4`), which is how the
/// role tables are exchanged with the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TierLevel {
    /// Top third by rank: orchestrators, planners, hard logic.
    Top,
    /// Top two thirds by rank: consultants, reviewers, research.
    Mid,
    /// Cheap models first, then the rest by ascending rank.
    Fast,
    /// Visual and creative models first, then everything by rank.
    Visual,
}

impl TierLevel {
    pub const ALL: [TierLevel; 4] = [
        TierLevel::Top,
        TierLevel::Mid,
        TierLevel::Fast,
        TierLevel::Visual,
    ];

    pub fn rank(self) -> u8 {
        match self {
            TierLevel::Top => 1,
            TierLevel::Mid => 2,
            TierLevel::Fast => 3,
            TierLevel::Visual => 4,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            1 => Some(TierLevel::Top),
            2 => Some(TierLevel::Mid),
            3 => Some(TierLevel::Fast),
            4 => Some(TierLevel::Visual),
            _ => None,
        }
    }
}

impl From<TierLevel> for u8 {
    fn from(level: TierLevel) -> Self {
        level.rank()
    }
}

impl TryFrom<u8> for TierLevel {
    type Error = String;

    fn try_from(rank: u8) -> Result<Self, Self::Error> {
        TierLevel::from_rank(rank).ok_or_else(|| format!("tier rank must be 1-4, got {rank}"))
    }
}

impl fmt::Display for TierLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier{}", self.rank())
    }
}
