use indexmap::IndexMap;
use modeltier_contracts::assembled::ModelAssignment;
use modeltier_contracts::models::{ModelSelection, ModelSelector};
use modeltier_contracts::overrides::{AgentOverride, CategoryOverride, FullOverrideConfig};
use modeltier_contracts::roles::{RoleKind, RoleRegistry, RoleSpec, TierLevel};

/// Override fields shared by agents and categories.
trait RoleOverride {
    fn pinned_model(&self) -> Option<&str>;

    /// Copy passthrough fields onto the emitted entry.
    fn apply(&self, entry: &mut ModelAssignment);
}

impl RoleOverride for AgentOverride {
    fn pinned_model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    fn apply(&self, entry: &mut ModelAssignment) {
        entry.variant = non_empty(&self.variant);
        entry.temperature = self.temperature.clone();
        entry.prompt_append = non_empty(&self.prompt_append);
    }
}

impl RoleOverride for CategoryOverride {
    fn pinned_model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    fn apply(&self, entry: &mut ModelAssignment) {
        entry.variant = non_empty(&self.variant);
        entry.temperature = self.temperature.clone();
        entry.description = non_empty(&self.description);
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|text| !text.is_empty()).cloned()
}

/// Outcome for one role that received a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRole {
    pub kind: RoleKind,
    pub name: String,
    pub label: String,
    pub tier: TierLevel,
    pub selection: ModelSelection,
    pub assignment: ModelAssignment,
}

/// Resolves every agent and category role of `registry`, in registry order.
///
/// Roles whose tier is empty and that carry no valid pinned model are left
/// out of the result.
pub fn resolve_roles(
    registry: &RoleRegistry,
    selector: &ModelSelector<'_>,
    overrides: Option<&FullOverrideConfig>,
) -> Vec<ResolvedRole> {
    let mut resolved = resolve_kind(RoleKind::Agent, registry.agents(), selector, |name| {
        overrides.and_then(|config| config.agent(name))
    });
    resolved.extend(resolve_kind(
        RoleKind::Category,
        registry.categories(),
        selector,
        |name| overrides.and_then(|config| config.category(name)),
    ));
    resolved
}

fn resolve_kind<'o, O, F>(
    kind: RoleKind,
    roles: &[RoleSpec],
    selector: &ModelSelector<'_>,
    lookup: F,
) -> Vec<ResolvedRole>
where
    O: RoleOverride + 'o,
    F: Fn(&str) -> Option<&'o O>,
{
    let mut resolved = Vec::with_capacity(roles.len());
    for role in roles {
        let role_override = lookup(role.name);
        let requested = role_override.and_then(|value| value.pinned_model());
        let Some(selection) = selector.select(requested, role.tier) else {
            tracing::debug!(
                kind = kind.as_str(),
                role = role.name,
                tier = %role.tier,
                "no model available for role; omitting"
            );
            continue;
        };
        if let (Some(requested), Some(reason)) = (requested, selection.fallback_reason.as_deref()) {
            tracing::debug!(
                kind = kind.as_str(),
                role = role.name,
                requested = %requested,
                reason,
                "ignoring pinned model"
            );
        }

        let mut assignment = ModelAssignment::routed(&selection.model);
        if let Some(role_override) = role_override {
            role_override.apply(&mut assignment);
        }
        resolved.push(ResolvedRole {
            kind,
            name: role.name.to_string(),
            label: role.label.to_string(),
            tier: role.tier,
            selection,
            assignment,
        });
    }
    resolved
}

/// Splits resolved roles into the `agents` and `categories` maps.
pub fn assignment_maps(
    resolved: &[ResolvedRole],
) -> (
    IndexMap<String, ModelAssignment>,
    IndexMap<String, ModelAssignment>,
) {
    let mut agents = IndexMap::new();
    let mut categories = IndexMap::new();
    for role in resolved {
        let target = match role.kind {
            RoleKind::Agent => &mut agents,
            RoleKind::Category => &mut categories,
        };
        target.insert(role.name.clone(), role.assignment.clone());
    }
    (agents, categories)
}

#[cfg(test)]
mod tests {
    use modeltier_contracts::models::{ModelCatalog, ModelSelector, Tiers};
    use modeltier_contracts::overrides::{AgentOverride, CategoryOverride, FullOverrideConfig};
    use modeltier_contracts::roles::{RoleKind, RoleRegistry, RoleSpec, TierLevel};
    use serde_json::{json, Number};

    use super::{assignment_maps, resolve_roles};

    fn catalog() -> ModelCatalog {
        ModelCatalog::new(vec![
            "claude-opus-4-6".to_string(),
            "gpt-5.2-codex".to_string(),
            "gemini-3-flash".to_string(),
        ])
    }

    fn tiers() -> Tiers {
        Tiers {
            tier1: vec!["claude-opus-4-6".to_string()],
            tier2: vec!["claude-opus-4-6".to_string(), "gpt-5.2-codex".to_string()],
            tier3: vec!["gemini-3-flash".to_string()],
            tier4: vec!["gpt-5.2-codex".to_string()],
        }
    }

    #[test]
    fn every_builtin_role_resolves_in_registry_order() {
        let (catalog, tiers) = (catalog(), tiers());
        let resolved = resolve_roles(
            &RoleRegistry::builtin(),
            &ModelSelector::new(&catalog, &tiers),
            None,
        );
        assert_eq!(resolved.len(), 17);
        assert_eq!(resolved[0].name, "sisyphus");
        assert_eq!(resolved[0].assignment.model, "cliproxyapi/claude-opus-4-6");
        assert_eq!(resolved[9].kind, RoleKind::Category);
        assert_eq!(resolved[9].name, "visual-engineering");
        assert_eq!(resolved[9].assignment.model, "cliproxyapi/gpt-5.2-codex");

        let (agents, categories) = assignment_maps(&resolved);
        assert_eq!(agents.len(), 9);
        assert_eq!(categories.len(), 8);
        assert_eq!(agents["explore"].model, "cliproxyapi/gemini-3-flash");
        assert_eq!(categories["writing"].model, "cliproxyapi/gemini-3-flash");
    }

    #[test]
    fn valid_pin_bypasses_tier_and_passthrough_is_copied() -> anyhow::Result<()> {
        let (catalog, tiers) = (catalog(), tiers());
        let mut overrides = FullOverrideConfig::default();
        overrides.agents.insert(
            "explore".to_string(),
            AgentOverride {
                model: Some("claude-opus-4-6".to_string()),
                variant: Some("max".to_string()),
                temperature: Some(Number::from(0)),
                prompt_append: Some("Be brief.".to_string()),
            },
        );
        overrides.categories.insert(
            "quick".to_string(),
            CategoryOverride {
                model: Some("not-served".to_string()),
                variant: Some(String::new()),
                temperature: None,
                description: Some("one-liners".to_string()),
            },
        );
        let resolved = resolve_roles(
            &RoleRegistry::builtin(),
            &ModelSelector::new(&catalog, &tiers),
            Some(&overrides),
        );
        let (agents, categories) = assignment_maps(&resolved);

        let explore = &agents["explore"];
        assert_eq!(explore.model, "cliproxyapi/claude-opus-4-6");
        assert_eq!(explore.variant.as_deref(), Some("max"));
        assert_eq!(explore.temperature, Some(Number::from(0)));
        assert_eq!(serde_json::to_value(explore)?["temperature"], json!(0));
        assert_eq!(explore.prompt_append.as_deref(), Some("Be brief."));
        assert_eq!(explore.description, None);

        let quick = &categories["quick"];
        assert_eq!(quick.model, "cliproxyapi/gemini-3-flash");
        assert_eq!(quick.variant, None);
        assert_eq!(quick.description.as_deref(), Some("one-liners"));
        assert_eq!(quick.prompt_append, None);
        Ok(())
    }

    #[test]
    fn roles_with_empty_tier_are_omitted() {
        let catalog = catalog();
        let tiers = Tiers {
            tier1: vec!["claude-opus-4-6".to_string()],
            ..Tiers::default()
        };
        let registry = RoleRegistry::new(
            vec![
                RoleSpec {
                    name: "lead",
                    tier: TierLevel::Top,
                    label: "Lead",
                },
                RoleSpec {
                    name: "scout",
                    tier: TierLevel::Fast,
                    label: "Scout",
                },
            ],
            Vec::new(),
        );
        let resolved = resolve_roles(&registry, &ModelSelector::new(&catalog, &tiers), None);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "lead");

        let mut overrides = FullOverrideConfig::default();
        overrides.agents.insert(
            "scout".to_string(),
            AgentOverride {
                model: Some("gemini-3-flash".to_string()),
                ..AgentOverride::default()
            },
        );
        let resolved = resolve_roles(
            &registry,
            &ModelSelector::new(&catalog, &tiers),
            Some(&overrides),
        );
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[1].assignment.model, "cliproxyapi/gemini-3-flash");
    }
}
