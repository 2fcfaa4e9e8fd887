//! HTTP endpoint serving generated datasets.

use crate::config::ServerConfig;
use crate::data_types::DataPoint;
use crate::stream::generate_initial_dataset;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use eyre::WrapErr;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct DataQuery {
    pub count: Option<usize>,
}

#[derive(Clone, Debug)]
struct AppState {
    default_count: usize,
    max_count: usize,
}

impl AppState {
    fn resolve_count(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_count).min(self.max_count)
    }
}

pub fn router(config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        default_count: config.default_count,
        max_count: config.max_count,
    });
    Router::new()
        .route("/api/data", get(get_data))
        .with_state(state)
}

async fn get_data(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataQuery>,
) -> Result<Json<Vec<DataPoint>>, (StatusCode, String)> {
    let count = state.resolve_count(query.count);
    tracing::debug!(requested = ?query.count, count, "dataset requested");
    let data = tokio::task::spawn_blocking(move || generate_initial_dataset(count))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "dataset generation failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "generation failed".to_string())
        })?;
    Ok(Json(data))
}

/// Binds and serves until the process is stopped.
pub async fn serve(config: &ServerConfig) -> eyre::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .wrap_err_with(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, "dataset server listening");
    axum::serve(listener, router(config))
        .await
        .wrap_err("dataset server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_defaults_and_clamps() {
        let state = AppState {
            default_count: 10_000,
            max_count: 50_000,
        };
        assert_eq!(state.resolve_count(None), 10_000);
        assert_eq!(state.resolve_count(Some(12)), 12);
        assert_eq!(state.resolve_count(Some(1_000_000)), 50_000);
        assert_eq!(state.resolve_count(Some(0)), 0);
    }
}
