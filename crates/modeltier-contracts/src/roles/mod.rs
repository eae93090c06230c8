mod registry;
mod tier;

pub use registry::{RoleKind, RoleRegistry, RoleSpec, AGENT_ROLES, CATEGORY_ROLES};
pub use tier::TierLevel;
