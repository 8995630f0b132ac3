//! Background jobs
//!
//! Two detached loops, both best-effort and independent of request
//! handling:
//!
//! - the memory monitor logs a process memory snapshot on a fixed timer
//! - the session sweep removes expired session records
//!
//! Neither loop can fail the process; errors are logged and the next pass
//! proceeds as usual.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tasktracker_shared::store::SessionStore;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::diagnostics::MemorySnapshot;

/// Spawns the periodic memory-usage logger
///
/// The startup snapshot is logged by `main`, so this loop waits a full
/// period before its first log.
pub fn spawn_memory_monitor(period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sleep(period).await;
            MemorySnapshot::capture().log();
        }
    })
}

/// Spawns the periodic expired-session sweep
///
/// Sweeps once immediately, then once per period.
pub fn spawn_session_sweep(sessions: Arc<dyn SessionStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            sweep_expired_sessions(sessions.as_ref()).await;
            sleep(period).await;
        }
    })
}

/// Removes every session whose expiry has passed
///
/// Failures are logged and left for the next pass.
async fn sweep_expired_sessions(sessions: &dyn SessionStore) {
    match sessions.delete_expired(Utc::now()).await {
        Ok(0) => tracing::debug!("Session sweep found nothing to remove"),
        Ok(removed) => tracing::info!(removed, "Session sweep removed expired sessions"),
        Err(err) => tracing::warn!("Session sweep failed: {}", err),
    }
}
