use serde::{Deserialize, Serialize};

use crate::roles::TierLevel;

/// The four ordered capability brackets built from one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tiers {
    pub tier1: Vec<String>,
    pub tier2: Vec<String>,
    pub tier3: Vec<String>,
    pub tier4: Vec<String>,
}

impl Tiers {
    pub fn get(&self, level: TierLevel) -> &[String] {
        match level {
            TierLevel::Top => &self.tier1,
            TierLevel::Mid => &self.tier2,
            TierLevel::Fast => &self.tier3,
            TierLevel::Visual => &self.tier4,
        }
    }

    pub fn top(&self, level: TierLevel) -> Option<&str> {
        self.get(level).first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        TierLevel::ALL.iter().all(|level| self.get(*level).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{TierLevel, Tiers};

    #[test]
    fn get_maps_levels_to_lists() {
        let tiers = Tiers {
            tier1: vec!["a".to_string()],
            tier2: vec!["a".to_string(), "b".to_string()],
            tier3: vec!["c".to_string()],
            tier4: Vec::new(),
        };
        assert_eq!(tiers.top(TierLevel::Top), Some("a"));
        assert_eq!(tiers.get(TierLevel::Mid).len(), 2);
        assert_eq!(tiers.top(TierLevel::Fast), Some("c"));
        assert_eq!(tiers.top(TierLevel::Visual), None);
        assert!(!tiers.is_empty());
        assert!(Tiers::default().is_empty());
    }
}
