pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod gesture;
pub mod services;

use anyhow::Context;
use clap::{CommandFactory, Parser};
pub use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // `init` must work before a config exists; everything else loads and
    // validates the config first.
    if matches!(command, Commands::Init) {
        return cli::cmd_init();
    }

    let config = Config::load()?;
    config.validate()?;

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let (layer, task) = tracing_loki::builder()
            .label("app", "lectio")?
            .extra_field("env", "production")?
            .build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    match command {
        Commands::AddUser => cli::cmd_add_user(&config).await,
        Commands::ListUsers => cli::cmd_list_users(&config).await,
        // Init returned early; anything else starts the server.
        _ => cli::cmd_serve(config, prometheus_handle).await,
    }
}
