//! Interactive session context.
//!
//! A `Session` owns everything scoped to one user engagement: the
//! prediction history and its statistics. It is created when the
//! engagement starts and dropped when it ends; nothing is persisted.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::export::{Export, ExportKind};
use crate::history::HistoryLog;
use crate::metrics::SessionMetrics;
use crate::pipeline::PredictionPipeline;
use crate::types::patient::PatientRecord;
use crate::types::prediction::PredictionResult;
use chrono::{DateTime, Utc};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    config: SessionConfig,
    history: HistoryLog,
    metrics: SessionMetrics,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            config,
            history: HistoryLog::new(),
            metrics: SessionMetrics::new(),
        };
        info!(session_id = %session.id, "Session started");
        session
    }

    /// Predict and, on success, append the result to the history.
    ///
    /// A failed prediction leaves the history untouched.
    pub fn predict(
        &mut self,
        pipeline: &PredictionPipeline<'_>,
        record: &PatientRecord,
    ) -> Result<PredictionResult> {
        let start = Instant::now();
        let result = match pipeline.predict_risk(record) {
            Ok(result) => result,
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "Prediction failed");
                return Err(e);
            }
        };

        self.metrics.record_prediction(&result, start.elapsed());
        info!(
            session_id = %self.id,
            probability = result.probability,
            risk_label = ?result.risk_label,
            history_len = self.history.len() + 1,
            "Prediction recorded"
        );
        self.history.append(result.clone());

        Ok(result)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// Export of the most recent prediction, if any was made
    pub fn export_latest(&self) -> Result<Option<Export>> {
        self.history
            .latest()
            .map(|latest| {
                Export::new(ExportKind::Latest, std::slice::from_ref(latest), &self.config)
            })
            .transpose()
    }

    /// Export of the whole history; `None` while the history is empty
    pub fn export_history(&self) -> Result<Option<Export>> {
        if self.history.is_empty() {
            return Ok(None);
        }
        Export::new(ExportKind::FullHistory, self.history.all(), &self.config).map(Some)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// End the session, logging its summary
    pub fn finish(self) {
        self.metrics.print_summary();
        info!(
            session_id = %self.id,
            predictions = self.history.len(),
            duration_s = (Utc::now() - self.started_at).num_seconds(),
            "Session ended"
        );
    }
}
