use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::post;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::ports::{CatalogSource, MetadataSink};
use crate::services::SyncService;

pub struct AppState<C, S>
where
    C: CatalogSource,
    S: MetadataSink,
{
    pub service: SyncService<C, S>,
    pub config: Config,
}

pub const PLUGIN_INSTANCE_PARAM: &str = "plugin_instance";

/// First value of `key` in the query string. Later repeats are ignored.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

pub fn router<C, S>(state: Arc<AppState<C, S>>) -> Router
where
    C: CatalogSource + 'static,
    S: MetadataSink + 'static,
{
    Router::new()
        .route(
            "/sync",
            post(sync_handler::<C, S>).fallback(method_not_allowed),
        )
        .with_state(state)
}

pub async fn serve<C, S>(state: Arc<AppState<C, S>>, port: u16) -> Result<()>
where
    C: CatalogSource + 'static,
    S: MetadataSink + 'static,
{
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("Listening on port {}", port);
    serve_on(listener, state).await
}

pub async fn serve_on<C, S>(listener: TcpListener, state: Arc<AppState<C, S>>) -> Result<()>
where
    C: CatalogSource + 'static,
    S: MetadataSink + 'static,
{
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn method_not_allowed() -> (StatusCode, &'static str) {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

pub async fn sync_handler<C, S>(
    State(state): State<Arc<AppState<C, S>>>,
    Query(params): Query<Vec<(String, String)>>,
) -> (StatusCode, &'static str)
where
    C: CatalogSource,
    S: MetadataSink,
{
    let Some(instance) = first_param(&params, PLUGIN_INSTANCE_PARAM).filter(|p| !p.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            "Missing plugin_instance query parameter",
        );
    };

    let Ok(owner) = state.config.owner() else {
        tracing::error!("Missing swaggerhub owner in plugin config");
        return (StatusCode::BAD_REQUEST, "Invalid plugin configuration");
    };

    let plugin_instance = match state.config.plugin_instance(instance) {
        Ok(name) => name,
        Err(SyncError::InvalidResourceName(e)) => {
            tracing::warn!("Rejected plugin instance {:?}: {}", instance, e);
            return (StatusCode::BAD_REQUEST, "Invalid plugin_instance query parameter");
        }
        Err(e) => {
            tracing::error!("Cannot resolve plugin instance: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    match state.service.sync(owner, plugin_instance).await {
        Ok(_) => (StatusCode::OK, "Success"),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
    }
}
