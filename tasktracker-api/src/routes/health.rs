//! Health and diagnostics endpoint
//!
//! # Endpoint
//!
//! ```text
//! GET /health
//! ```
//!
//! # Response
//!
//! ```json
//! {
//!   "status": "ok",
//!   "uptime": 42.17,
//!   "memoryUsage": {
//!     "rss": "24.5 MB",
//!     "heapTotal": "12.34 MB",
//!     "heapUsed": "18.2 MB",
//!     "external": "6.3 MB"
//!   }
//! }
//! ```
//!
//! Each request also logs the same snapshot, in addition to the periodic
//! monitor in `background`.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::{
    app::AppState,
    diagnostics::{MemoryReport, MemorySnapshot},
};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Seconds since process start
    pub uptime: f64,

    /// Current memory counters, in megabytes
    pub memory_usage: MemoryReport,
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = MemorySnapshot::capture();
    snapshot.log();

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime: state.uptime_seconds(),
        memory_usage: snapshot.report(),
    })
}
