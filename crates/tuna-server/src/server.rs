use std::future::Future;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use tuna_runtime::config::ListenerConfig;
use tuna_runtime::{NowPlaying, NowPlayingStore, TrackUpdate, TunaError};

pub fn router(store: NowPlayingStore) -> Router {
    Router::new()
        .route("/", get(get_track).post(post_track))
        .layer(CorsLayer::permissive())
        .with_state(store)
}

/// Serve the listener until `shutdown` resolves.
pub async fn serve<F>(config: &ListenerConfig, shutdown: F) -> Result<(), TunaError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening for reports at http://{addr}");

    axum::serve(listener, router(NowPlayingStore::new()))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn get_track(State(store): State<NowPlayingStore>) -> Json<NowPlaying> {
    Json(store.current().await)
}

/// Takes the raw body so malformed JSON gets our error shape instead of
/// axum's plain-text rejection.
async fn post_track(State(store): State<NowPlayingStore>, body: Bytes) -> (StatusCode, Json<Value>) {
    match TrackUpdate::from_body(&body) {
        Ok(update) => {
            store.apply(update).await;
            (StatusCode::OK, Json(json!({ "status": "ok" })))
        }
        Err(e) => {
            warn!("POST failed: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": e.to_string() })),
            )
        }
    }
}
