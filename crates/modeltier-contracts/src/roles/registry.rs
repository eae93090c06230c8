use super::tier::TierLevel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleSpec {
    pub name: &'static str,
    pub tier: TierLevel,
    pub label: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleKind {
    Agent,
    Category,
}

impl RoleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RoleKind::Agent => "agent",
            RoleKind::Category => "category",
        }
    }
}

// Names and tier bindings are parsed by oh-my-opencode; keep them verbatim.
pub const AGENT_ROLES: &[RoleSpec] = &[
    RoleSpec {
        name: "sisyphus",
        tier: TierLevel::Top,
        label: "Orchestrator",
    },
    RoleSpec {
        name: "atlas",
        tier: TierLevel::Top,
        label: "Master orchestrator",
    },
    RoleSpec {
        name: "prometheus",
        tier: TierLevel::Top,
        label: "Planner",
    },
    RoleSpec {
        name: "metis",
        tier: TierLevel::Mid,
        label: "Plan consultant",
    },
    RoleSpec {
        name: "oracle",
        tier: TierLevel::Top,
        label: "Technical advisor",
    },
    RoleSpec {
        name: "librarian",
        tier: TierLevel::Mid,
        label: "Research",
    },
    RoleSpec {
        name: "explore",
        tier: TierLevel::Fast,
        label: "Fast exploration",
    },
    RoleSpec {
        name: "multimodal-looker",
        tier: TierLevel::Mid,
        label: "Vision",
    },
    RoleSpec {
        name: "momus",
        tier: TierLevel::Mid,
        label: "Reviewer",
    },
];

pub const CATEGORY_ROLES: &[RoleSpec] = &[
    RoleSpec {
        name: "visual-engineering",
        tier: TierLevel::Visual,
        label: "UI work",
    },
    RoleSpec {
        name: "ultrabrain",
        tier: TierLevel::Top,
        label: "Hard logic",
    },
    RoleSpec {
        name: "deep",
        tier: TierLevel::Top,
        label: "Deep problem solving",
    },
    RoleSpec {
        name: "artistry",
        tier: TierLevel::Visual,
        label: "Creative work",
    },
    RoleSpec {
        name: "quick",
        tier: TierLevel::Fast,
        label: "Trivial tasks",
    },
    RoleSpec {
        name: "unspecified-low",
        tier: TierLevel::Mid,
        label: "Low effort general",
    },
    RoleSpec {
        name: "unspecified-high",
        tier: TierLevel::Top,
        label: "High effort general",
    },
    RoleSpec {
        name: "writing",
        tier: TierLevel::Fast,
        label: "Documentation",
    },
];

/// Immutable agent/category tables handed to the resolver.
///
/// `builtin()` carries the published oh-my-opencode roles; tests and callers
/// with a different downstream can inject their own tables through `new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRegistry {
    agents: Vec<RoleSpec>,
    categories: Vec<RoleSpec>,
}

impl RoleRegistry {
    pub fn new(agents: Vec<RoleSpec>, categories: Vec<RoleSpec>) -> Self {
        Self { agents, categories }
    }

    pub fn builtin() -> Self {
        Self::new(AGENT_ROLES.to_vec(), CATEGORY_ROLES.to_vec())
    }

    pub fn agents(&self) -> &[RoleSpec] {
        self.agents.as_slice()
    }

    pub fn categories(&self) -> &[RoleSpec] {
        self.categories.as_slice()
    }

    pub fn roles(&self, kind: RoleKind) -> &[RoleSpec] {
        match kind {
            RoleKind::Agent => self.agents(),
            RoleKind::Category => self.categories(),
        }
    }

    pub fn get(&self, kind: RoleKind, name: &str) -> Option<&RoleSpec> {
        self.roles(kind).iter().find(|role| role.name == name)
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
