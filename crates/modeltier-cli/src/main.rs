use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use modeltier_contracts::models::ModelCatalog;
use modeltier_contracts::overrides::FullOverrideConfig;
use modeltier_contracts::roles::RoleRegistry;
use modeltier_engine::ranking::SCORE_RANKER;
use modeltier_engine::{default_ranker_registry, ConfigEngine, EnginePlan, ScoreRanker};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::AUTHORIZATION;
use serde_json::{json, Value};

const PROXY_URL_ENV: &str = "MODELTIER_PROXY_URL";
const API_KEY_ENV: &str = "MODELTIER_API_KEY";
const PROXY_TIMEOUT: Duration = Duration::from_secs(30);

/// Exit code when there is nothing to emit (no model could be assigned).
const EXIT_NOTHING_TO_EMIT: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "modeltier",
    version,
    about = "Rank proxy models into tiers and emit an oh-my-opencode config"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the oh-my-opencode config.
    Generate(GenerateArgs),
    /// Show the tiers and the model each role resolves to.
    Tiers(TiersArgs),
    /// Print the heuristic score of each model, best first.
    Score(ScoreArgs),
}

#[derive(Debug, Args)]
struct ModelSourceArgs {
    /// JSON array, OpenAI-style `{"data": [...]}` listing, or one id per line.
    #[arg(long)]
    models_file: Option<PathBuf>,
    #[arg(long = "model")]
    models: Vec<String>,
    /// Proxy base URL; falls back to MODELTIER_PROXY_URL.
    #[arg(long)]
    proxy_url: Option<String>,
    /// Proxy API key; falls back to MODELTIER_API_KEY.
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long = "exclude")]
    excluded: Vec<String>,
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    #[command(flatten)]
    source: ModelSourceArgs,
    #[arg(long)]
    overrides: Option<PathBuf>,
    #[arg(long, default_value = SCORE_RANKER)]
    ranking: String,
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct TiersArgs {
    #[command(flatten)]
    source: ModelSourceArgs,
    #[arg(long)]
    overrides: Option<PathBuf>,
    #[arg(long, default_value = SCORE_RANKER)]
    ranking: String,
}

#[derive(Debug, Parser)]
struct ScoreArgs {
    #[command(flatten)]
    source: ModelSourceArgs,
}

fn main() {
    init_tracing();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("modeltier error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Tiers(args) => run_tiers(args),
        Command::Score(args) => run_score(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<i32> {
    let catalog = load_catalog(&args.source)?;
    let overrides = load_overrides(args.overrides.as_deref())?;
    let engine = engine_for(&args.ranking)?;

    let Some(config) = engine.build(catalog.list(), overrides.as_ref()) else {
        tracing::warn!(models = catalog.len(), "no role could be assigned a model; nothing emitted");
        return Ok(EXIT_NOTHING_TO_EMIT);
    };

    let value = config.to_value();
    match args.out {
        Some(path) => {
            write_json_value(&path, &value)?;
            tracing::info!(path = %path.display(), "wrote config");
        }
        None => println!("{}", serde_json::to_string_pretty(&value)?),
    }
    Ok(0)
}

fn run_tiers(args: TiersArgs) -> Result<i32> {
    let catalog = load_catalog(&args.source)?;
    let overrides = load_overrides(args.overrides.as_deref())?;
    let engine = engine_for(&args.ranking)?;
    let plan = engine.plan(catalog.list(), overrides.as_ref());
    println!(
        "{}",
        serde_json::to_string_pretty(&plan_report(engine.ranker().name(), &catalog, &plan))?
    );
    Ok(0)
}

fn run_score(args: ScoreArgs) -> Result<i32> {
    let catalog = load_catalog(&args.source)?;
    for (score, id) in ScoreRanker::default().scored(catalog.list()) {
        println!("{score}\t{id}");
    }
    Ok(0)
}

fn engine_for(ranking: &str) -> Result<ConfigEngine> {
    let registry = default_ranker_registry();
    let Some(ranker) = registry.get(ranking) else {
        bail!(
            "unknown ranking '{ranking}' (expected one of: {})",
            registry.list().join(", ")
        );
    };
    Ok(ConfigEngine::new(RoleRegistry::builtin(), ranker))
}

fn plan_report(ranking: &str, catalog: &ModelCatalog, plan: &EnginePlan) -> Value {
    let roles = plan
        .roles
        .iter()
        .map(|role| {
            json!({
                "kind": role.kind.as_str(),
                "name": role.name,
                "label": role.label,
                "tier": role.tier,
                "model": role.assignment.model,
                "requested": role.selection.requested,
                "fallback_reason": role.selection.fallback_reason,
            })
        })
        .collect::<Vec<Value>>();
    json!({
        "ranking": ranking,
        "models": catalog.len(),
        "tiers": plan.tiers,
        "roles": roles,
        "emits_config": plan.config.is_some(),
    })
}

fn load_catalog(source: &ModelSourceArgs) -> Result<ModelCatalog> {
    let mut catalog = ModelCatalog::default();

    if let Some(path) = &source.models_file {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read models from {}", path.display()))?;
        let listed = ModelCatalog::from_listing(&raw)
            .with_context(|| format!("failed to parse models in {}", path.display()))?;
        tracing::info!(path = %path.display(), count = listed.len(), "loaded models file");
        catalog.extend(listed.into_inner());
    }

    catalog.extend(source.models.iter().cloned());

    let proxy_url = source
        .proxy_url
        .clone()
        .or_else(|| non_empty_env(PROXY_URL_ENV));
    if let Some(proxy_url) = proxy_url {
        let api_key = source.api_key.clone().or_else(|| non_empty_env(API_KEY_ENV));
        let fetched = fetch_proxy_models(&proxy_url, api_key.as_deref())?;
        tracing::info!(proxy = %proxy_url, count = fetched.len(), "fetched proxy models");
        catalog.extend(fetched);
    }

    if !source.excluded.is_empty() {
        let before = catalog.len();
        catalog = catalog.without(&source.excluded);
        tracing::info!(removed = before - catalog.len(), "applied model exclusions");
    }
    Ok(catalog)
}

fn load_overrides(path: Option<&Path>) -> Result<Option<FullOverrideConfig>> {
    path.map(FullOverrideConfig::load).transpose()
}

fn models_endpoint(proxy_url: &str) -> String {
    let base = proxy_url.trim().trim_end_matches('/');
    if base.ends_with("/v1") {
        format!("{base}/models")
    } else {
        format!("{base}/v1/models")
    }
}

fn fetch_proxy_models(proxy_url: &str, api_key: Option<&str>) -> Result<Vec<String>> {
    let endpoint = models_endpoint(proxy_url);
    let http = HttpClient::builder()
        .timeout(PROXY_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;
    let mut request = http.get(&endpoint);
    if let Some(api_key) = api_key {
        request = request.header(AUTHORIZATION, format!("Bearer {api_key}"));
    }
    let response = request
        .send()
        .with_context(|| format!("proxy model listing request to {endpoint} failed"))?;
    let status = response.status();
    let body = response
        .text()
        .context("proxy model listing body read failed")?;
    if !status.is_success() {
        bail!(
            "proxy model listing failed ({}): {}",
            status.as_u16(),
            truncate_chars(&body, 200)
        );
    }
    Ok(ModelCatalog::from_listing(&body)
        .context("proxy returned an unreadable model listing")?
        .into_inner())
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out = text.chars().take(max_chars).collect::<String>();
    out.push_str("...");
    out
}

fn write_json_value(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let encoded = serde_json::to_string_pretty(value)?;
    fs::write(path, encoded)
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(())
}
