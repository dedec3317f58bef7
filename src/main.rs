// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use kuma_ingress_watcher::{
    cluster::KubeClusterSource,
    config::Config,
    differ::Reconciler,
    kuma::KumaClient,
    routing::RoutingKind,
    static_file::apply_monitor_file,
    sync::MonitorSynchronizer,
    watcher::{SleepTicker, Watcher},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

fn main() -> Result<()> {
    let config = Config::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("kuma-ingress-watcher")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(config))
}

fn init_logging(config: &Config) {
    // Respects RUST_LOG if set, otherwise falls back to LOG_LEVEL
    // Respects RUST_LOG_FORMAT for output format (text or json)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::try_new(config.log_level.to_lowercase())
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    });

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn async_main(config: Config) -> Result<()> {
    init_logging(&config);

    info!("Starting Kuma ingress watcher");

    let settings = config.backend_settings().inspect_err(|e| error!("{e}"))?;

    debug!(url = %settings.url, "Connecting to Uptime Kuma");
    let kuma = KumaClient::login(&settings.url, &settings.user, &settings.password)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to connect to Uptime Kuma API"))
        .context("Failed to connect to Uptime Kuma API")?;

    let sync = MonitorSynchronizer::new(Arc::new(kuma));

    if config.enable_monitor_file {
        let applied = apply_monitor_file(&config.monitor_file_path, &sync).await;
        info!(count = applied, "Static monitor file processed");
    }

    let mut kinds = config.watched_kinds();
    if kinds.is_empty() {
        info!("No routing object kind is watched, exiting");
        return Ok(());
    }

    debug!("Initializing Kubernetes client");
    let cluster = KubeClusterSource::try_default(config.crd_group())
        .await
        .inspect_err(|e| error!("{e}"))?;
    debug!("Kubernetes client initialized successfully");

    if kinds.contains(&RoutingKind::IngressRoute) && !cluster.ingress_route_crd_exists().await {
        warn!(
            group = %config.crd_group().api_group(),
            "IngressRoute CRD not found, IngressRoute objects will not be watched"
        );
        kinds.retain(|kind| *kind != RoutingKind::IngressRoute);
        if kinds.is_empty() {
            info!("No routing object kind left to watch, exiting");
            return Ok(());
        }
    }

    let reconciler = Reconciler::new(sync, config.default_parent().map(str::to_string));
    let mut watcher = Watcher::new(Arc::new(cluster), reconciler, kinds);
    let mut ticker = SleepTicker::new(config.watch_interval());

    tokio::select! {
        () = watcher.run(&mut ticker) => {
            anyhow::bail!("Poll loop exited unexpectedly")
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received, exiting");
            Ok(())
        }
    }
}

/// Wait for SIGTERM or Ctrl-C.
async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            _ = sigterm.recv() => Ok(()),
            result = tokio::signal::ctrl_c() => result.map_err(Into::into),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map_err(Into::into)
    }
}
