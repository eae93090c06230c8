mod registry;
mod selectors;
mod tiers;

pub use registry::ModelCatalog;
pub use selectors::{ModelSelection, ModelSelector};
pub use tiers::Tiers;
