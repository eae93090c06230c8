use indexmap::IndexMap;
use modeltier_contracts::assembled::{AssembledConfig, ModelAssignment, OH_MY_OPENCODE_SCHEMA_URL};
use modeltier_contracts::overrides::FullOverrideConfig;
use serde_json::{json, Map, Value};

pub fn tmux_defaults() -> Map<String, Value> {
    map_object(json!({
        "enabled": true,
        "layout": "main-vertical",
        "main_pane_size": 60,
        "main_pane_min_width": 120,
        "agent_pane_min_width": 40,
    }))
}

pub fn background_task_defaults() -> Map<String, Value> {
    map_object(json!({ "defaultConcurrency": 5 }))
}

pub fn sisyphus_agent_defaults() -> Map<String, Value> {
    map_object(json!({
        "planner_enabled": true,
        "replace_plan": true,
    }))
}

pub fn git_master_defaults() -> Map<String, Value> {
    map_object(json!({
        "commit_footer": false,
        "include_co_authored_by": false,
    }))
}

/// Builds the emitted config from resolved role maps and the user overrides.
///
/// Returns `None` when no role received a model; callers skip emission then.
/// Each auxiliary block keeps its own policy:
/// - `tmux`: only when overridden, merged over defaults
/// - `background_task`, `sisyphus_agent`, `git_master`: always, merged over defaults
/// - `browser_automation_engine`: passthrough when set
/// - `lsp`: passthrough when a non-empty object
pub fn assemble_config(
    agents: IndexMap<String, ModelAssignment>,
    categories: IndexMap<String, ModelAssignment>,
    overrides: Option<&FullOverrideConfig>,
) -> Option<AssembledConfig> {
    if agents.is_empty() && categories.is_empty() {
        tracing::debug!("no agent or category received a model; nothing to assemble");
        return None;
    }

    let disabled = |list: Option<&Vec<String>>| list.cloned().unwrap_or_default();

    Some(AssembledConfig {
        schema: OH_MY_OPENCODE_SCHEMA_URL.to_string(),
        agents,
        categories,
        auto_update: false,
        disabled_agents: disabled(overrides.map(|config| &config.disabled_agents)),
        disabled_skills: disabled(overrides.map(|config| &config.disabled_skills)),
        disabled_hooks: disabled(overrides.map(|config| &config.disabled_hooks)),
        disabled_commands: disabled(overrides.map(|config| &config.disabled_commands)),
        disabled_mcps: disabled(overrides.map(|config| &config.disabled_mcps)),
        tmux: overrides
            .and_then(|config| config.tmux.as_ref())
            .map(|block| shallow_merge(tmux_defaults(), Some(block))),
        background_task: shallow_merge(
            background_task_defaults(),
            overrides.and_then(|config| config.background_task.as_ref()),
        ),
        browser_automation_engine: overrides
            .and_then(|config| config.browser_automation_engine.as_ref())
            .filter(|value| is_truthy(value))
            .cloned(),
        sisyphus_agent: shallow_merge(
            sisyphus_agent_defaults(),
            overrides.and_then(|config| config.sisyphus_agent.as_ref()),
        ),
        git_master: shallow_merge(
            git_master_defaults(),
            overrides.and_then(|config| config.git_master.as_ref()),
        ),
        lsp: overrides
            .and_then(|config| config.lsp.as_ref())
            .filter(|block| !block.is_empty())
            .cloned(),
    })
}

/// Top-level keys of `block` replace the defaults; nested values are not merged.
fn shallow_merge(
    mut defaults: Map<String, Value>,
    block: Option<&Map<String, Value>>,
) -> Map<String, Value> {
    if let Some(block) = block {
        for (key, value) in block {
            defaults.insert(key.clone(), value.clone());
        }
    }
    defaults
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn map_object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
