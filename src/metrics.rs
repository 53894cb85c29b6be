//! Per-session prediction statistics.

use crate::types::prediction::{PredictionResult, RiskLabel};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Statistics collected over one session
pub struct SessionMetrics {
    /// Total predictions recorded
    predictions: u64,
    /// Predictions by risk label
    by_label: HashMap<RiskLabel, u64>,
    /// Inference times (in microseconds)
    inference_times: Vec<u64>,
    /// Risk probability distribution buckets
    score_buckets: [u64; 10],
    /// Session start for rate calculation
    start_time: Instant,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            predictions: 0,
            by_label: HashMap::new(),
            inference_times: Vec::new(),
            score_buckets: [0; 10],
            start_time: Instant::now(),
        }
    }

    /// Record a successful prediction
    pub fn record_prediction(&mut self, result: &PredictionResult, inference_time: Duration) {
        self.predictions += 1;
        *self.by_label.entry(result.risk_label).or_insert(0) += 1;
        self.inference_times.push(inference_time.as_micros() as u64);

        let bucket = (result.probability * 10.0).clamp(0.0, 9.0) as usize;
        self.score_buckets[bucket] += 1;
    }

    pub fn predictions(&self) -> u64 {
        self.predictions
    }

    pub fn count_for(&self, label: RiskLabel) -> u64 {
        self.by_label.get(&label).copied().unwrap_or(0)
    }

    /// Get inference time statistics
    pub fn get_inference_stats(&self) -> InferenceStats {
        if self.inference_times.is_empty() {
            return InferenceStats::default();
        }

        let mut sorted = self.inference_times.clone();
        sorted.sort_unstable();

        let sum: u64 = sorted.iter().sum();
        let count = sorted.len();
        let percentile = |q: f64| sorted[((count as f64 * q) as usize).min(count - 1)];

        InferenceStats {
            count: count as u64,
            mean_us: sum / count as u64,
            p50_us: sorted[count / 2],
            p95_us: percentile(0.95),
            p99_us: percentile(0.99),
            max_us: sorted[count - 1],
        }
    }

    pub fn get_score_distribution(&self) -> [u64; 10] {
        self.score_buckets
    }

    /// Log summary statistics
    pub fn print_summary(&self) {
        for line in self.summary_lines() {
            info!("{line}");
        }
    }

    /// Boxed summary, one entry per log line. Every line has the same width.
    pub fn summary_lines(&self) -> Vec<String> {
        let stats = self.get_inference_stats();
        let elapsed = self.start_time.elapsed();
        let rule = "═".repeat(BOX_WIDTH);

        let mut lines = vec![
            format!("╔{rule}╗"),
            boxed(&format!("{:^width$}", "RISK ANALYST - SESSION SUMMARY", width = BOX_WIDTH)),
            format!("╠{rule}╣"),
            boxed(&format!(
                " Predictions: {:>8}  │  Session length: {:>8.1} s",
                self.predictions,
                elapsed.as_secs_f64()
            )),
            boxed(&format!(
                " Inference (μs): mean={:>5} p50={:>5} p95={:>5} p99={:>5}",
                stats.mean_us, stats.p50_us, stats.p95_us, stats.p99_us
            )),
            format!("╠{rule}╣"),
            boxed(" Predictions by Risk Label:"),
        ];
        for label in RiskLabel::ALL {
            let count = self.count_for(label);
            let pct = if self.predictions > 0 {
                (count as f64 / self.predictions as f64) * 100.0
            } else {
                0.0
            };
            lines.push(boxed(&format!("   {:12}: {:>6} ({:>5.1}%)", label.as_str(), count, pct)));
        }
        lines.push(format!("╠{rule}╣"));
        lines.push(boxed(" Risk Probability Distribution:"));
        let total: u64 = self.score_buckets.iter().sum();
        for (i, &count) in self.score_buckets.iter().enumerate() {
            let pct = if total > 0 { (count as f64 / total as f64) * 100.0 } else { 0.0 };
            let bar: String = "█".repeat(((pct / 5.0) as usize).min(20));
            lines.push(boxed(&format!(
                "   {:.1}-{:.1}: {:>6} ({:>5.1}%) {}",
                i as f64 / 10.0,
                (i + 1) as f64 / 10.0,
                count,
                pct,
                bar
            )));
        }
        lines.push(format!("╚{rule}╝"));
        lines
    }
}

/// Inner width of the summary box, in characters
const BOX_WIDTH: usize = 62;

fn boxed(content: &str) -> String {
    let pad = BOX_WIDTH.saturating_sub(content.chars().count());
    format!("║{content}{}║", " ".repeat(pad))
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Inference time statistics
#[derive(Debug, Default, PartialEq)]
pub struct InferenceStats {
    pub count: u64,
    pub mean_us: u64,
    pub p50_us: u64,
    pub p95_us: u64,
    pub p99_us: u64,
    pub max_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::patient::PatientRecord;

    fn result(probability: f64, label: RiskLabel) -> PredictionResult {
        PredictionResult::new(PatientRecord::default(), probability, label)
    }

    #[test]
    fn test_metrics_recording() {
        let mut metrics = SessionMetrics::new();

        metrics.record_prediction(&result(0.2, RiskLabel::Low), Duration::from_micros(100));
        metrics.record_prediction(&result(0.8, RiskLabel::High), Duration::from_micros(300));
        metrics.record_prediction(&result(1.0, RiskLabel::High), Duration::from_micros(200));

        assert_eq!(metrics.predictions(), 3);
        assert_eq!(metrics.count_for(RiskLabel::High), 2);
        assert_eq!(metrics.count_for(RiskLabel::Medium), 0);

        let buckets = metrics.get_score_distribution();
        assert_eq!(buckets[2], 1);
        assert_eq!(buckets[8], 1);
        assert_eq!(buckets[9], 1);
    }

    #[test]
    fn test_inference_stats() {
        let mut metrics = SessionMetrics::new();
        assert_eq!(metrics.get_inference_stats(), InferenceStats::default());

        for micros in [100, 200, 300, 400] {
            metrics.record_prediction(&result(0.5, RiskLabel::Medium), Duration::from_micros(micros));
        }

        let stats = metrics.get_inference_stats();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean_us, 250);
        assert_eq!(stats.p50_us, 300);
        assert_eq!(stats.p99_us, 400);
        assert_eq!(stats.max_us, 400);
    }

    #[test]
    fn test_summary_box_is_aligned() {
        let mut metrics = SessionMetrics::new();
        metrics.record_prediction(&result(0.2, RiskLabel::Low), Duration::from_micros(120));
        metrics.record_prediction(&result(0.95, RiskLabel::High), Duration::from_micros(80));

        let lines = metrics.summary_lines();
        assert_eq!(lines.len(), 23);
        for line in &lines {
            assert_eq!(line.chars().count(), BOX_WIDTH + 2, "misaligned: {line}");
        }
        assert!(lines.iter().any(|line| line.contains("HIGH RISK")));
    }
}
