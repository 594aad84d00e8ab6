use axum::Router;
use relaydns_api::{create_api_routes, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub async fn bind_web_listener(bind_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!(
        bind_address = %bind_addr,
        api_url = format!("http://{}/api", bind_addr),
        "Introspection HTTP server listening"
    );
    Ok(listener)
}

pub async fn serve_web(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = Router::new().nest("/api", create_api_routes(state));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Web server stopped");
    Ok(())
}
