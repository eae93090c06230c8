use std::path::Path;

use anyhow::{bail, Context};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Per-agent override stored with the user's dashboard record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOverride {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Number>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub prompt_append: Option<String>,
}

/// Per-category override stored with the user's dashboard record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryOverride {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Number>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Everything a user can override in the generated oh-my-opencode config.
///
/// Every field is optional. Auxiliary blocks stay untyped maps: their keys are
/// owned by the downstream schema and are passed through or shallow-merged
/// as-is. Unknown top-level keys are ignored on input, and a block or scalar of
/// the wrong type reads as unset instead of failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullOverrideConfig {
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub agents: IndexMap<String, AgentOverride>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "IndexMap::is_empty")]
    pub categories: IndexMap<String, CategoryOverride>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub disabled_agents: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub disabled_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub disabled_hooks: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub disabled_commands: Vec<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub disabled_mcps: Vec<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tmux: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub background_task: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_automation_engine: Option<Value>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sisyphus_agent: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub git_master: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub lsp: Option<Map<String, Value>>,
}

impl FullOverrideConfig {
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_json::from_str(raw).context("override record is not valid JSON")?;
        if !value.is_object() {
            bail!("override record must be a JSON object");
        }
        serde_json::from_value(value).context("override record is not a valid override config")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read overrides from {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("failed to parse overrides in {}", path.display()))
    }

    pub fn agent(&self, name: &str) -> Option<&AgentOverride> {
        self.agents.get(name)
    }

    pub fn category(&self, name: &str) -> Option<&CategoryOverride> {
        self.categories.get(name)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a field as `None` when it is `null` or has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring override field with unexpected type");
            Ok(None)
        }
    }
}
