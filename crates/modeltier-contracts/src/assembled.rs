use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub const OH_MY_OPENCODE_SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/code-yeongyu/oh-my-opencode/master/assets/oh-my-opencode.schema.json";

/// Routing prefix the proxy's opencode provider expects before a raw model id.
pub const MODEL_ROUTE_PREFIX: &str = "cliproxyapi/";

/// One agent or category entry in the emitted config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelAssignment {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_append: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelAssignment {
    /// Entry for a raw catalog id, namespaced with [`MODEL_ROUTE_PREFIX`].
    pub fn routed(model_id: &str) -> Self {
        Self {
            model: format!("{MODEL_ROUTE_PREFIX}{model_id}"),
            variant: None,
            temperature: None,
            prompt_append: None,
            description: None,
        }
    }

    pub fn raw_model_id(&self) -> &str {
        self.model
            .strip_prefix(MODEL_ROUTE_PREFIX)
            .unwrap_or(&self.model)
    }
}

/// The oh-my-opencode config object. Field order is the emitted JSON order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssembledConfig {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub agents: IndexMap<String, ModelAssignment>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub categories: IndexMap<String, ModelAssignment>,
    pub auto_update: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_agents: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_hooks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_commands: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_mcps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmux: Option<Map<String, Value>>,
    pub background_task: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser_automation_engine: Option<Value>,
    pub sisyphus_agent: Map<String, Value>,
    pub git_master: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsp: Option<Map<String, Value>>,
}

impl AssembledConfig {
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
