use std::sync::Arc;

use modeltier_contracts::models::Tiers;
use modeltier_contracts::ranking::Ranker;

use crate::ranking::ScoreRanker;

/// Substrings marking fast, low-cost models (tier 3 leads with these).
pub const CHEAP_MARKERS: &[&str] = &["haiku", "flash", "mini", "lite", "nano"];

/// Substrings marking visual/creative models (tier 4 leads with these).
pub const VISUAL_MARKERS: &[&str] = &["pro", "image"];

/// Partitions a ranked catalog into the four capability tiers.
#[derive(Clone)]
pub struct TierBuilder {
    ranker: Arc<dyn Ranker>,
}

impl TierBuilder {
    pub fn new(ranker: Arc<dyn Ranker>) -> Self {
        Self { ranker }
    }

    pub fn ranker(&self) -> &dyn Ranker {
        self.ranker.as_ref()
    }

    pub fn build(&self, model_ids: &[String]) -> Tiers {
        if model_ids.is_empty() {
            return Tiers::default();
        }

        let ranked = self.ranker.rank(model_ids);
        let total = ranked.len();

        let tier1 = ranked[..top_third(total)].to_vec();
        let tier2 = ranked[..top_two_thirds(total)].to_vec();

        let (cheap, rest): (Vec<&String>, Vec<&String>) =
            ranked.iter().partition(|id| contains_any(id, CHEAP_MARKERS));
        let tier3 = cheap
            .into_iter()
            .chain(rest.into_iter().rev())
            .cloned()
            .collect::<Vec<String>>();

        let (visual, rest): (Vec<&String>, Vec<&String>) =
            ranked.iter().partition(|id| contains_any(id, VISUAL_MARKERS));
        let tier4 = visual
            .into_iter()
            .chain(rest)
            .cloned()
            .collect::<Vec<String>>();

        tracing::debug!(
            ranker = self.ranker.name(),
            models = total,
            tier1 = tier1.len(),
            tier2 = tier2.len(),
            "built model tiers"
        );

        Tiers {
            tier1,
            tier2,
            tier3,
            tier4,
        }
    }
}

impl Default for TierBuilder {
    fn default() -> Self {
        Self::new(Arc::new(ScoreRanker::default()))
    }
}

impl std::fmt::Debug for TierBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierBuilder")
            .field("ranker", &self.ranker.name())
            .finish()
    }
}

/// Tiers from the default score-based ranking.
pub fn build_tiers(model_ids: &[String]) -> Tiers {
    TierBuilder::default().build(model_ids)
}

fn top_third(total: usize) -> usize {
    total.div_ceil(3).max(1).min(total)
}

fn top_two_thirds(total: usize) -> usize {
    (total * 2).div_ceil(3).max(1).min(total)
}

fn contains_any(id: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| id.contains(marker))
}
