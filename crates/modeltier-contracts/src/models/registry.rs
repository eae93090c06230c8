use anyhow::{bail, Context};
use serde_json::Value;

/// The model catalog reported by the upstream proxy.
///
/// Order and duplicates are kept exactly as listed; membership checks are
/// exact and case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<String>,
}

impl ModelCatalog {
    pub fn new(models: Vec<String>) -> Self {
        Self { models }
    }

    /// Parse a catalog from raw text.
    ///
    /// Accepts a JSON array of ids, an OpenAI-style listing
    /// (`{"data": [{"id": ...}]}`), or plain text with one id per line.
    pub fn from_listing(raw: &str) -> anyhow::Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            let parsed: Value =
                serde_json::from_str(trimmed).context("model listing is not valid JSON")?;
            return Ok(Self::new(ids_from_json(&parsed)?));
        }
        Ok(Self::new(
            trimmed
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect(),
        ))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.iter().any(|model| model == id)
    }

    pub fn list(&self) -> &[String] {
        self.models.as_slice()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn extend(&mut self, models: impl IntoIterator<Item = String>) {
        self.models.extend(models);
    }

    /// Drop every occurrence of the given ids, keeping the rest in order.
    pub fn without(&self, excluded: &[String]) -> Self {
        Self::new(
            self.models
                .iter()
                .filter(|model| !excluded.contains(model))
                .cloned()
                .collect(),
        )
    }

    pub fn into_inner(self) -> Vec<String> {
        self.models
    }
}

impl From<Vec<String>> for ModelCatalog {
    fn from(models: Vec<String>) -> Self {
        Self::new(models)
    }
}

fn ids_from_json(value: &Value) -> anyhow::Result<Vec<String>> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(rows)) => rows,
            _ => bail!("model listing object has no `data` array"),
        },
        _ => bail!("model listing must be an array or an object with `data`"),
    };

    let mut ids = Vec::with_capacity(rows.len());
    for row in rows {
        let id = match row {
            Value::String(id) => Some(id.as_str()),
            Value::Object(entry) => entry.get("id").and_then(Value::as_str),
            _ => None,
        };
        match id {
            Some(id) => ids.push(id.to_string()),
            None => bail!("model listing entry has no id: {row}"),
        }
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::ModelCatalog;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn parses_json_array() -> anyhow::Result<()> {
        let catalog = ModelCatalog::from_listing(r#"["gpt-5.2", "claude-opus-4-6"]"#)?;
        assert_eq!(catalog.list(), ids(&["gpt-5.2", "claude-opus-4-6"]).as_slice());
        Ok(())
    }

    #[test]
    fn parses_openai_listing() -> anyhow::Result<()> {
        let raw = r#"{"object":"list","data":[{"id":"gemini-3-pro","object":"model"},{"id":"gpt-5"}]}"#;
        let catalog = ModelCatalog::from_listing(raw)?;
        assert_eq!(catalog.list(), ids(&["gemini-3-pro", "gpt-5"]).as_slice());
        Ok(())
    }

    #[test]
    fn parses_line_listing_and_skips_comments() -> anyhow::Result<()> {
        let catalog = ModelCatalog::from_listing("# proxy models\ngpt-5\n\n  claude-haiku-4-5  \n")?;
        assert_eq!(catalog.list(), ids(&["gpt-5", "claude-haiku-4-5"]).as_slice());
        Ok(())
    }

    #[test]
    fn empty_listing_is_empty_catalog() -> anyhow::Result<()> {
        assert!(ModelCatalog::from_listing("  \n")?.is_empty());
        Ok(())
    }

    #[test]
    fn rejects_malformed_json_listing() {
        assert!(ModelCatalog::from_listing(r#"{"models": []}"#).is_err());
        assert!(ModelCatalog::from_listing(r#"[1, 2]"#).is_err());
        assert!(ModelCatalog::from_listing("[not json").is_err());
    }

    #[test]
    fn keeps_duplicates_and_exact_membership() {
        let catalog = ModelCatalog::new(ids(&["gpt-5", "gpt-5", "Gemini-3-Pro"]));
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("gpt-5"));
        assert!(!catalog.contains("gemini-3-pro"));
    }

    #[test]
    fn without_drops_every_occurrence() {
        let catalog = ModelCatalog::new(ids(&["a", "b", "a", "c"]));
        assert_eq!(catalog.without(&ids(&["a"])).list(), ids(&["b", "c"]).as_slice());
    }
}
