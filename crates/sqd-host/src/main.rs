//! `sqd` entry point.
//!
//! Thin shell: loads `.env.local`, layered config and the catalog, installs
//! tracing, then either replays a script or runs the live dispatcher until
//! Ctrl-C.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqd_catalog::{load_catalog, load_catalog_or_empty};
use sqd_config::{load_layered_yaml, LoadedConfig};
use sqd_host::{
    load_script, run_scripted_session, spawn_dispatcher, spawn_tick_source, Dispatcher,
    HostMessage, Presenter, ScriptedSampler, SessionOptions, SharedReadings, View,
};
use sqd_reconcile::Reconciler;
use sqd_solver::PartySolver;
use tokio::sync::mpsc;
use tracing::info;

#[derive(Parser)]
#[command(name = "sqd")]
#[command(about = "Squadron mission planner host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dispatcher (live until Ctrl-C, or replaying a script)
    Run {
        /// Layered config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Replay script; exits when the script ends and work settles
        #[arg(long)]
        script: Option<PathBuf>,

        /// Max wait for the final computation after a replay
        #[arg(long, default_value_t = 5000)]
        settle_ms: u64,
    },

    /// Load a catalog dataset and print what survives filtering
    CatalogCheck { path: PathBuf },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> override...)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Dev convenience; production sets env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Run {
            config_paths,
            script,
            settle_ms,
        } => {
            let loaded = load_config(&config_paths)?;
            init_tracing(&loaded.config.log_filter);
            info!(config_hash = %loaded.config_hash, "config loaded");
            match script {
                Some(path) => run_script(&loaded, &path, Duration::from_millis(settle_ms)).await?,
                None => run_live(&loaded).await?,
            }
        }

        Commands::CatalogCheck { path } => {
            init_tracing("warn");
            let catalog = load_catalog(&path)
                .with_context(|| format!("catalog check failed: {}", path.display()))?;
            println!("missions={}", catalog.missions().len());
            println!("trainings={}", catalog.trainings().len());
            for m in catalog.missions() {
                println!(
                    "mission id={} level={} flagged={} variants={} name={}",
                    m.id,
                    m.level,
                    m.is_flagged,
                    m.variants.len(),
                    m.name
                );
            }
        }

        Commands::ConfigHash { paths } => {
            let loaded = load_config(&paths)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

fn load_config(paths: &[String]) -> Result<LoadedConfig> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    load_layered_yaml(&path_refs)
}

fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .init();
}

async fn run_script(loaded: &LoadedConfig, path: &Path, settle_timeout: Duration) -> Result<()> {
    let cfg = &loaded.config;
    let script =
        load_script(path).with_context(|| format!("load script failed: {}", path.display()))?;
    let catalog = load_catalog_or_empty(cfg.catalog_path.as_deref());
    let options = SessionOptions {
        tick_interval: Some(cfg.tick_interval()),
        max_members: cfg.effective_max_members(),
        settle_timeout,
        ..SessionOptions::default()
    };

    let dispatcher =
        run_scripted_session(catalog, Arc::new(PartySolver::default()), &script, &options)
            .await
            .context("script replay failed")?;

    let report = dispatcher.report();
    println!(
        "events={} recomputes={} commands_handled={} commands_ignored={}",
        report.events, report.recomputes, report.commands_handled, report.commands_ignored
    );
    print_result(&dispatcher)
}

fn print_result(dispatcher: &Dispatcher<ScriptedSampler, PartySolver>) -> Result<()> {
    // Render as if the window were open, whatever the script left it at.
    let view = Presenter::new(true).poll(dispatcher.reconciler());
    match view {
        View::Ready {
            mission,
            variant_index,
            result: Ok(results),
        } => {
            println!(
                "view=ready mission={} variant_index={variant_index}",
                mission.id
            );
            let json = serde_json::to_string_pretty(results).context("serialize results failed")?;
            println!("{json}");
        }
        View::Ready {
            mission,
            result: Err(e),
            ..
        } => println!("view=ready mission={} error={e}", mission.id),
        other => println!("view={}", other.label()),
    }
    Ok(())
}

async fn run_live(loaded: &LoadedConfig) -> Result<()> {
    let cfg = &loaded.config;
    let catalog = load_catalog_or_empty(cfg.catalog_path.as_deref());
    let readings = SharedReadings::new();
    let reconciler = Reconciler::new(
        catalog,
        readings.sampler(cfg.effective_max_members()),
        Arc::new(PartySolver::default()),
        tokio::runtime::Handle::current(),
    );

    let (tx, rx) = mpsc::channel(256);
    let dispatcher = spawn_dispatcher(Dispatcher::new(reconciler, Presenter::default()), rx);
    let ticks = spawn_tick_source(tx.clone(), cfg.tick_interval());
    info!(tick_ms = cfg.tick_interval_ms, "dispatcher running; Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("waiting for Ctrl-C failed")?;

    ticks.abort();
    let _ = tx.send(HostMessage::Shutdown).await;
    let dispatcher = dispatcher.await.context("dispatcher task failed")?;
    info!(events = dispatcher.report().events, "stopped");
    Ok(())
}
