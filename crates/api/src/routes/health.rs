//! Liveness endpoint mounted at `/health`, outside `/api` and without auth.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    /// The process is serving but Postgres did not answer `SELECT 1`.
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    pub fn from_database(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy {
                HealthStatus::Ok
            } else {
                HealthStatus::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// Always answers 200 so load balancers can tell a live process from a dead
/// one; database trouble shows up as `"degraded"` in the body.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match gestion_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse::from_database(db_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_reports_degraded() {
        let json = serde_json::to_value(HealthResponse::from_database(false)).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["db_healthy"], false);
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn reachable_database_reports_ok() {
        let response = HealthResponse::from_database(true);
        assert_eq!(response.status, HealthStatus::Ok);
        assert!(response.db_healthy);
    }
}
