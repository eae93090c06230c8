use super::registry::ModelCatalog;
use super::tiers::Tiers;
use crate::roles::TierLevel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelection {
    pub model: String,
    pub requested: Option<String>,
    pub fallback_reason: Option<String>,
}

/// Picks a model for one role: a pinned catalog model, else the tier's top pick.
#[derive(Debug, Clone, Copy)]
pub struct ModelSelector<'a> {
    catalog: &'a ModelCatalog,
    tiers: &'a Tiers,
}

impl<'a> ModelSelector<'a> {
    pub fn new(catalog: &'a ModelCatalog, tiers: &'a Tiers) -> Self {
        Self { catalog, tiers }
    }

    /// Returns `None` only when no model is pinned and the tier is empty.
    pub fn select(&self, requested: Option<&str>, tier: TierLevel) -> Option<ModelSelection> {
        let requested = requested.filter(|value| !value.is_empty());
        let (fallback_reason, requested_text) = if let Some(requested_value) = requested {
            if self.catalog.contains(requested_value) {
                return Some(ModelSelection {
                    model: requested_value.to_string(),
                    requested: Some(requested_value.to_string()),
                    fallback_reason: None,
                });
            }
            (
                format!("Requested model '{requested_value}' not in catalog; using {tier} pick."),
                Some(requested_value.to_string()),
            )
        } else {
            (format!("No model pinned; using {tier} pick."), None)
        };

        let model = self.tiers.top(tier)?;
        Some(ModelSelection {
            model: model.to_string(),
            requested: requested_text,
            fallback_reason: Some(fallback_reason),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ModelCatalog, ModelSelector, TierLevel, Tiers};

    fn fixture() -> (ModelCatalog, Tiers) {
        let catalog = ModelCatalog::new(vec![
            "claude-opus-4-6".to_string(),
            "gpt-5.2-codex".to_string(),
            "gemini-3-flash".to_string(),
        ]);
        let tiers = Tiers {
            tier1: vec!["claude-opus-4-6".to_string()],
            tier2: vec!["claude-opus-4-6".to_string(), "gpt-5.2-codex".to_string()],
            tier3: vec!["gemini-3-flash".to_string()],
            tier4: Vec::new(),
        };
        (catalog, tiers)
    }

    #[test]
    fn pinned_catalog_model_bypasses_tier() {
        let (catalog, tiers) = fixture();
        let selection = ModelSelector::new(&catalog, &tiers)
            .select(Some("gemini-3-flash"), TierLevel::Top)
            .unwrap();
        assert_eq!(selection.model, "gemini-3-flash");
        assert_eq!(selection.requested.as_deref(), Some("gemini-3-flash"));
        assert_eq!(selection.fallback_reason, None);
    }

    #[test]
    fn pinned_model_outside_catalog_falls_back() {
        let (catalog, tiers) = fixture();
        let selection = ModelSelector::new(&catalog, &tiers)
            .select(Some("GPT-5.2-CODEX"), TierLevel::Mid)
            .unwrap();
        assert_eq!(selection.model, "claude-opus-4-6");
        assert_eq!(selection.requested.as_deref(), Some("GPT-5.2-CODEX"));
        assert_eq!(
            selection.fallback_reason.as_deref(),
            Some("Requested model 'GPT-5.2-CODEX' not in catalog; using tier2 pick.")
        );
    }

    #[test]
    fn no_pin_uses_tier_with_explanation() {
        let (catalog, tiers) = fixture();
        let selection = ModelSelector::new(&catalog, &tiers)
            .select(Some(""), TierLevel::Fast)
            .unwrap();
        assert_eq!(selection.model, "gemini-3-flash");
        assert_eq!(selection.requested, None);
        assert_eq!(
            selection.fallback_reason.as_deref(),
            Some("No model pinned; using tier3 pick.")
        );
    }

    #[test]
    fn empty_tier_without_valid_pin_selects_nothing() {
        let (catalog, tiers) = fixture();
        let selector = ModelSelector::new(&catalog, &tiers);
        assert_eq!(selector.select(None, TierLevel::Visual), None);
        assert_eq!(selector.select(Some("missing"), TierLevel::Visual), None);
        assert!(selector
            .select(Some("gpt-5.2-codex"), TierLevel::Visual)
            .is_some());
    }
}
