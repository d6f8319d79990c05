//! Serving with a bounded graceful shutdown.

use axum::Router;
use std::future::{Future, IntoFuture};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve `app` until `signal` resolves, then drain in-flight requests for at
/// most `grace` before returning.
///
/// # Errors
///
/// Returns the I/O error that stopped the server before the signal.
pub async fn serve_with_grace<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            signal.await;
            let _ = signalled_tx.send(());
        })
        .into_future();
    tokio::pin!(server);

    let drain_deadline = async move {
        match signalled_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = &mut server => result,
        () = drain_deadline => {
            tracing::warn!(grace_secs = grace.as_secs(), "Timed out draining in-flight requests");
            Ok(())
        }
    }
}
