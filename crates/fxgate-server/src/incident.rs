//! Append-only log of unhandled request failures.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Local};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::FailureReport;
use crate::state::AppState;

const SEPARATOR_WIDTH: usize = 50;

/// File that receives one block per unhandled failure.
///
/// Writes are serialized so concurrent failures never interleave.
#[derive(Clone)]
pub struct IncidentLog {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl IncidentLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a block for `endpoint`. Best-effort: I/O errors are logged, not returned.
    pub async fn record(&self, endpoint: &str, detail: &str) {
        let entry = format_entry(Local::now(), endpoint, detail);
        let _guard = self.lock.lock().await;

        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .await?;
            file.write_all(entry.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write incident log");
        }
    }
}

pub fn format_entry(at: DateTime<Local>, endpoint: &str, detail: &str) -> String {
    format!(
        "{} \n{} ERROR:: {endpoint} \n {detail} \n",
        "=".repeat(SEPARATOR_WIDTH),
        at.format("%Y-%m-%d %H:%M:%S%.6f"),
    )
}

/// Records any response carrying a [`FailureReport`] to the incident log.
pub async fn record_failures(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let endpoint = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;

    if let Some(report) = response.extensions().get::<FailureReport>() {
        state.incidents.record(&endpoint, &report.0).await;
    }
    response
}
