use clap::Parser;
use relaydns_domain::CliOverrides;
use relaydns_jobs::{CacheSweepJob, JobRunner, PendingSweepJob};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "relaydns")]
#[command(version)]
#[command(about = "relaydns - caching DNS forwarder with upstream ID remapping")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// UDP port to listen on for DNS queries
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver as ip:port
    #[arg(short = 'u', long, value_name = "ADDR")]
    upstream: Option<String>,

    /// Introspection HTTP port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Do not start the introspection HTTP server
    #[arg(long)]
    no_web: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.port,
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        upstream: cli.upstream.clone(),
        disable_web: cli.no_web,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config.logging);

    info!("Starting relaydns v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config).await?;
    let use_cases = di::UseCases::new(&config, &dns_services);

    let shutdown = CancellationToken::new();

    let job_handles = JobRunner::new()
        .with_pending_sweep(
            PendingSweepJob::new(use_cases.sweep_pending.clone())
                .with_interval(config.dns.pending_sweep_interval_secs),
        )
        .with_cache_sweep(
            CacheSweepJob::new(use_cases.purge_cache.clone())
                .with_interval(config.cache.purge_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let web_handle = if config.server.web_enabled {
        let web_addr = config.server.web_socket_addr()?;
        let listener = server::bind_web_listener(web_addr).await?;
        let state = use_cases.app_state();
        let token = shutdown.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = server::serve_web(listener, state, token).await {
                error!(error = %e, "Web server error");
            }
        }))
    } else {
        info!("Introspection HTTP server disabled");
        None
    };

    let grace = Duration::from_millis(config.server.shutdown_grace_ms);
    let dns_handle = tokio::spawn(server::run_dns_server(
        dns_services.server.clone(),
        shutdown.clone(),
        grace,
    ));

    server::shutdown_signal().await;
    info!("Shutdown requested");
    shutdown.cancel();

    if let Err(e) = dns_handle.await {
        error!(error = %e, "DNS server task failed");
    }
    if let Some(handle) = web_handle {
        if let Err(e) = handle.await {
            error!(error = %e, "Web server task failed");
        }
    }
    for handle in job_handles {
        if let Err(e) = handle.await {
            error!(error = %e, "Background job task failed");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
