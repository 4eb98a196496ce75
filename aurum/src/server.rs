use crate::shutdown::Shutdown;
use axum::{Router, extract::State, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::broadcast};
use tracing::info;

/// Liveness [`Router`] answering `GET /` with the provided static body.
pub fn router(body: String) -> Router {
    Router::new()
        .route("/", get(alive))
        .with_state(Arc::<str>::from(body))
}

async fn alive(State(body): State<Arc<str>>) -> String {
    body.to_string()
}

/// Serve the liveness [`router`] on the provided [`TcpListener`] until a [`Shutdown`] is
/// received.
pub async fn serve(
    listener: TcpListener,
    body: String,
    mut shutdown: broadcast::Receiver<Shutdown>,
) -> std::io::Result<()> {
    info!(address = %listener.local_addr()?, "liveness server listening");

    axum::serve(listener, router(body))
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    info!("liveness server stopped");
    Ok(())
}
