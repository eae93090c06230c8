//! Model tiering and oh-my-opencode config synthesis.
//!
//! The engine ranks whatever catalog the upstream proxy reports, splits it into
//! four capability tiers, assigns every agent and category role a model
//! (honoring valid user pins) and assembles the final config object. It does no
//! I/O and keeps no state between calls.

use std::sync::Arc;

use modeltier_contracts::assembled::AssembledConfig;
use modeltier_contracts::models::{ModelCatalog, ModelSelector, Tiers};
use modeltier_contracts::overrides::FullOverrideConfig;
use modeltier_contracts::ranking::Ranker;
use modeltier_contracts::roles::{RoleRegistry, TierLevel};

pub mod assemble;
pub mod ranking;
pub mod resolve;
pub mod scoring;
pub mod tiers;

pub use assemble::assemble_config;
pub use ranking::{default_ranker_registry, PriorityListRanker, ScoreRanker};
pub use resolve::{assignment_maps, resolve_roles, ResolvedRole};
pub use scoring::{score_model, ModelScorer, Score, ScoreRule, SCORE_RULES};
pub use tiers::{build_tiers, TierBuilder};

/// Role tables plus ranking strategy; everything else comes in per call.
#[derive(Debug, Clone)]
pub struct ConfigEngine {
    roles: RoleRegistry,
    tier_builder: TierBuilder,
}

/// Everything computed for one catalog, for callers that want to show their
/// work rather than just the final object.
#[derive(Debug, Clone)]
pub struct EnginePlan {
    pub tiers: Tiers,
    pub roles: Vec<ResolvedRole>,
    pub config: Option<AssembledConfig>,
}

impl ConfigEngine {
    pub fn new(roles: RoleRegistry, ranker: Arc<dyn Ranker>) -> Self {
        Self {
            roles,
            tier_builder: TierBuilder::new(ranker),
        }
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn ranker(&self) -> &dyn Ranker {
        self.tier_builder.ranker()
    }

    pub fn tiers(&self, models: &[String]) -> Tiers {
        self.tier_builder.build(models)
    }

    pub fn pick_best_model(&self, models: &[String], tier: TierLevel) -> Option<String> {
        self.tiers(models).top(tier).map(str::to_string)
    }

    pub fn plan(&self, models: &[String], overrides: Option<&FullOverrideConfig>) -> EnginePlan {
        let catalog = ModelCatalog::new(models.to_vec());
        let tiers = self.tiers(catalog.list());
        let roles = resolve_roles(
            &self.roles,
            &ModelSelector::new(&catalog, &tiers),
            overrides,
        );
        let (agents, categories) = assignment_maps(&roles);
        let config = assemble_config(agents, categories, overrides);
        EnginePlan {
            tiers,
            roles,
            config,
        }
    }

    /// The config to emit, or `None` when no role could be given a model.
    pub fn build(
        &self,
        models: &[String],
        overrides: Option<&FullOverrideConfig>,
    ) -> Option<AssembledConfig> {
        self.plan(models, overrides).config
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new(RoleRegistry::builtin(), Arc::new(ScoreRanker::default()))
    }
}

pub fn build_config(
    models: &[String],
    overrides: Option<&FullOverrideConfig>,
) -> Option<AssembledConfig> {
    ConfigEngine::default().build(models, overrides)
}

/// Top pick of `tier` under the default ranking; `None` only for an empty tier.
pub fn pick_best_model(models: &[String], tier: TierLevel) -> Option<String> {
    ConfigEngine::default().pick_best_model(models, tier)
}
