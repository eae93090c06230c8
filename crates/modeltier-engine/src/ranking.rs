use std::sync::Arc;

use modeltier_contracts::ranking::{Ranker, RankerRegistry};

use crate::scoring::{ModelScorer, Score};

pub const SCORE_RANKER: &str = "score";
pub const PRIORITY_RANKER: &str = "priority";

/// Dynamic ranking: stable sort by descending heuristic score.
///
/// Ties keep their catalog order, so the same listing always ranks the same.
#[derive(Debug, Clone, Default)]
pub struct ScoreRanker {
    scorer: ModelScorer,
}

impl ScoreRanker {
    pub fn new(scorer: ModelScorer) -> Self {
        Self { scorer }
    }

    pub fn scored(&self, model_ids: &[String]) -> Vec<(Score, String)> {
        let mut scored = model_ids
            .iter()
            .map(|id| (self.scorer.score(id), id.clone()))
            .collect::<Vec<_>>();
        scored.sort_by(|left, right| right.0.cmp(&left.0));
        scored
    }
}

impl Ranker for ScoreRanker {
    fn name(&self) -> &str {
        SCORE_RANKER
    }

    fn rank(&self, model_ids: &[String]) -> Vec<String> {
        self.scored(model_ids)
            .into_iter()
            .map(|(_, id)| id)
            .collect()
    }
}

/// Hand-maintained prefix list, most preferred first.
pub const DEFAULT_PRIORITY_PREFIXES: &[&str] = &[
    "claude-opus-4-6",
    "gemini-claude-opus",
    "claude-opus-4-5",
    "gpt-5.3-codex",
    "gpt-5.2-codex",
    "gpt-5.1-codex-max",
    "claude-opus",
    "gemini-3-pro",
    "gpt-5.2",
    "claude-sonnet-4-5",
    "gpt-5.1",
    "claude-sonnet",
    "gemini-2.5-pro",
    "gpt-5",
    "gemini-3-flash",
    "claude-haiku",
    "gemini-2.5-flash",
];

/// Static ranking: an id ranks at the position of the first prefix it starts
/// with; ids matching no prefix follow in catalog order.
#[derive(Debug, Clone)]
pub struct PriorityListRanker {
    prefixes: Vec<String>,
}

impl PriorityListRanker {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &[String] {
        self.prefixes.as_slice()
    }

    fn position(&self, id: &str) -> usize {
        self.prefixes
            .iter()
            .position(|prefix| id.starts_with(prefix.as_str()))
            .unwrap_or(self.prefixes.len())
    }
}

impl Default for PriorityListRanker {
    fn default() -> Self {
        Self::new(
            DEFAULT_PRIORITY_PREFIXES
                .iter()
                .map(|prefix| (*prefix).to_string())
                .collect(),
        )
    }
}

impl Ranker for PriorityListRanker {
    fn name(&self) -> &str {
        PRIORITY_RANKER
    }

    fn rank(&self, model_ids: &[String]) -> Vec<String> {
        let mut ranked = model_ids.to_vec();
        ranked.sort_by_key(|id| self.position(id));
        ranked
    }
}

pub fn default_ranker_registry() -> RankerRegistry {
    RankerRegistry::new(vec![
        Arc::new(ScoreRanker::default()),
        Arc::new(PriorityListRanker::default()),
    ])
}
