use std::sync::Arc;

/// Orders a model catalog from most to least capable.
///
/// Implementations must keep every input id (duplicates included) and be
/// deterministic: the same input always yields the same order.
pub trait Ranker: Send + Sync {
    fn name(&self) -> &str;

    fn rank(&self, model_ids: &[String]) -> Vec<String>;
}

#[derive(Clone, Default)]
pub struct RankerRegistry {
    rankers: Vec<Arc<dyn Ranker>>,
}

impl RankerRegistry {
    pub fn new(rankers: Vec<Arc<dyn Ranker>>) -> Self {
        Self { rankers }
    }

    pub fn register(&mut self, ranker: Arc<dyn Ranker>) {
        self.rankers.retain(|existing| existing.name() != ranker.name());
        self.rankers.push(ranker);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Ranker>> {
        self.rankers
            .iter()
            .find(|ranker| ranker.name() == name)
            .cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let mut names = self
            .rankers
            .iter()
            .map(|ranker| ranker.name().to_string())
            .collect::<Vec<String>>();
        names.sort();
        names
    }

    pub fn rankers(&self) -> &[Arc<dyn Ranker>] {
        self.rankers.as_slice()
    }
}

impl std::fmt::Debug for RankerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankerRegistry")
            .field("rankers", &self.list())
            .finish()
    }
}
