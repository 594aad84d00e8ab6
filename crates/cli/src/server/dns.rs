use relaydns_infrastructure::dns::DnsServer;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Runs the receive loop until `shutdown`, then gives in-flight handlers
/// `grace` to finish.
pub async fn run_dns_server(server: Arc<DnsServer>, shutdown: CancellationToken, grace: Duration) {
    server.run(shutdown).await;
    server.drain(grace).await;
    info!("DNS server stopped");
}
