//! CLI binary for ancestry: run LCA queries against tree and graph fixtures.

use ancestry_core::config::{AncestryConfig, OutputConfig, OutputFormat};
use ancestry_core::fixture;
use ancestry_core::key::{Key, KeyKind};
use ancestry_core::lca::{self, DagStrategy};
use ancestry_core::{OrderedTree, PathGraph};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ancestry", about = "Lowest common ancestor queries")]
struct Cli {
    /// Directory holding .ancestry/config.toml (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Output format: text, json (overrides config)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lowest common ancestor of two keys in a binary search tree
    Bst {
        /// JSON fixture: {"keys": [...]} inserted in order
        fixture: PathBuf,
        #[arg(allow_negative_numbers = true)]
        a: String,
        #[arg(allow_negative_numbers = true)]
        b: String,
    },

    /// Lowest common ancestor of two vertices in a DAG
    Dag {
        /// JSON fixture: {"vertices": [{"id": .., "successors": [..]}, ..]}
        fixture: PathBuf,
        #[arg(allow_negative_numbers = true)]
        a: String,
        #[arg(allow_negative_numbers = true)]
        b: String,

        /// Algorithm: path-prefix, reachability (overrides config)
        #[arg(short, long)]
        strategy: Option<String>,
    },

    /// List the keys of a tree fixture in ascending order
    Keys {
        /// JSON fixture: {"keys": [...]}
        fixture: PathBuf,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let mut config = AncestryConfig::load(&project_root).context("failed to load config")?;
    if let Some(format) = &cli.format {
        config.output.format = format.parse()?;
    }

    let output = match cli.command {
        Commands::Bst { fixture, a, b } => cmd_bst(&fixture, &a, &b, &config.output)?,
        Commands::Dag {
            fixture,
            a,
            b,
            strategy,
        } => {
            let strategy = match strategy {
                Some(s) => s.parse()?,
                None => config.graph.strategy,
            };
            cmd_dag(&fixture, &a, &b, strategy, &config.output)?
        }
        Commands::Keys { fixture } => cmd_keys(&fixture, &config.output)?,
    };
    println!("{}", output);
    Ok(())
}

fn cmd_bst(path: &Path, a: &str, b: &str, output: &OutputConfig) -> Result<String> {
    let tree = fixture::load_tree(path)
        .with_context(|| format!("failed to load tree fixture {}", path.display()))?;
    let (a, b) = (tree_key(a, &tree), tree_key(b, &tree));
    let ancestor = lca::bst_lowest_common_ancestor(&tree, &a, &b)?;
    tracing::info!(nodes = tree.len(), found = ancestor.is_some(), "bst query");

    Ok(match output.format {
        OutputFormat::Text => ancestor.map_or_else(|| "none".to_string(), Key::to_string),
        OutputFormat::Json => render_json(
            &json!({ "a": a, "b": b, "ancestor": ancestor }),
            output.pretty,
        )?,
    })
}

fn cmd_dag(
    path: &Path,
    a: &str,
    b: &str,
    strategy: DagStrategy,
    output: &OutputConfig,
) -> Result<String> {
    let graph = fixture::load_graph(path)
        .with_context(|| format!("failed to load graph fixture {}", path.display()))?;
    let (a, b) = (graph_key(a, &graph), graph_key(b, &graph));
    let ancestors = strategy.query(&graph, &a, &b);
    tracing::info!(vertices = graph.len(), %strategy, found = ancestors.len(), "dag query");

    Ok(match output.format {
        OutputFormat::Text => render_list(&ancestors, ", "),
        OutputFormat::Json => {
            let value = match strategy {
                DagStrategy::PathPrefix => {
                    json!({ "a": a, "b": b, "strategy": strategy, "ancestor": ancestors.first() })
                }
                DagStrategy::Reachability => {
                    json!({ "a": a, "b": b, "strategy": strategy, "ancestors": ancestors })
                }
            };
            render_json(&value, output.pretty)?
        }
    })
}

fn cmd_keys(path: &Path, output: &OutputConfig) -> Result<String> {
    let tree = fixture::load_tree(path)
        .with_context(|| format!("failed to load tree fixture {}", path.display()))?;
    let keys: Vec<Key> = tree.in_order().cloned().collect();

    Ok(match output.format {
        OutputFormat::Text => render_list(&keys, "\n"),
        OutputFormat::Json => render_json(&json!(keys), output.pretty)?,
    })
}

fn parse_key(raw: &str) -> Key {
    match raw.parse() {
        Ok(key) => key,
        Err(never) => match never {},
    }
}

/// Read a query against a text-keyed tree as text, so `"3"` stays queryable.
fn tree_key(raw: &str, tree: &OrderedTree<Key>) -> Key {
    match tree.root_key().map(Key::kind) {
        Some(KeyKind::Text) => Key::Text(raw.to_string()),
        _ => parse_key(raw),
    }
}

/// Fall back to the text form when only that one names a vertex.
fn graph_key(raw: &str, graph: &PathGraph<Key>) -> Key {
    let parsed = parse_key(raw);
    let text = Key::Text(raw.to_string());
    if !graph.contains(&parsed) && graph.contains(&text) {
        text
    } else {
        parsed
    }
}

fn render_list(keys: &[Key], separator: &str) -> String {
    if keys.is_empty() {
        return "none".to_string();
    }
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_json(value: &Value, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context("failed to serialize output")
}
