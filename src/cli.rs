//! # Command Line Interface
//!
//! Serve the API, check a configuration, or run one list query against a
//! manifest without starting the server.

use crate::api::{handlers::ListParams, start_api_server, ApiState};
use crate::config::AppConfig;
use crate::domain::{PipelineRun, Template};
use crate::jenkins::JenkinsForwarder;
use crate::listing::{process, PipelineRunListHandler, TemplateListHandler};
use crate::observability::{init_logging, log_config_info};
use crate::store::{InMemoryStore, ObjectStore};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "devops-apiserver")]
#[command(about = "DevOps API server: resource listing and Jenkins forwarding")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Resource manifest override
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server (default)
    Serve {
        /// Port override
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Load and validate configuration, then exit
    CheckConfig,

    /// Run one list query against the manifest and print the page as JSON
    List {
        #[arg(value_enum)]
        kind: ResourceKind,

        /// Namespace (PipelineRuns) or DevOps project (Templates)
        namespace: String,

        #[arg(long)]
        name: Option<String>,

        /// `key=value` label selector
        #[arg(long)]
        label: Option<String>,

        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long)]
        ascending: bool,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ResourceKind {
    Pipelineruns,
    Templates,
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.observability.log_level = "debug".to_string();
    }
    if let Some(manifest) = cli.manifest {
        config.store.manifest_path = Some(manifest);
    }

    init_logging(&config.observability)?;

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await?;
        }

        Some(Commands::CheckConfig) => {
            log_config_info(&config);
            println!("Configuration is valid");
        }

        Some(Commands::List { kind, namespace, name, label, sort_by, ascending, limit, offset }) => {
            let params =
                ListParams { name, label, annotation: None, sort_by, ascending, limit, offset };
            let store = load_store(&config)?;
            let output = list(store.as_ref(), kind, &namespace, params)?;
            println!("{}", output);
        }

        None => serve(config).await?,
    }

    Ok(())
}

fn load_store(config: &AppConfig) -> crate::Result<Arc<InMemoryStore>> {
    let store = match config.store.manifest_path.as_deref() {
        Some(path) => InMemoryStore::from_manifest_file(path)?,
        None => {
            tracing::warn!("No manifest configured, serving an empty store");
            InMemoryStore::new()
        }
    };
    Ok(Arc::new(store))
}

async fn serve(config: AppConfig) -> crate::Result<()> {
    log_config_info(&config);

    let store = load_store(&config)?;
    let mut state = ApiState::new(store);
    match JenkinsForwarder::from_config(&config.jenkins)? {
        Some(forwarder) => state = state.with_forwarder(forwarder),
        None => tracing::info!("No Jenkins server configured, forwarding disabled"),
    }

    start_api_server(&config.server, state).await
}

fn list(
    store: &dyn ObjectStore,
    kind: ResourceKind,
    namespace: &str,
    params: ListParams,
) -> crate::Result<String> {
    let descriptor = params.into_descriptor()?;
    let output = match kind {
        ResourceKind::Pipelineruns => {
            let runs: Vec<PipelineRun> = store.pipeline_runs(namespace);
            serde_json::to_string_pretty(&process(
                &runs,
                &descriptor,
                &PipelineRunListHandler::new(),
            )?)?
        }
        ResourceKind::Templates => {
            let templates: Vec<Template> = store.templates(namespace);
            serde_json::to_string_pretty(&process(
                &templates,
                &descriptor,
                &TemplateListHandler::summary(),
            )?)?
        }
    };
    Ok(output)
}
