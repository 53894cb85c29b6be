//! Session-scoped prediction history

use crate::types::prediction::PredictionResult;

/// Append-only, chronologically ordered log of predictions.
///
/// There is no removal and no size bound; the log lives as long as the
/// session that owns it.
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<PredictionResult>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, result: PredictionResult) {
        self.entries.push(result);
    }

    /// Every result in insertion order
    pub fn all(&self) -> &[PredictionResult] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&PredictionResult> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::patient::PatientRecord;
    use crate::types::prediction::RiskLabel;

    fn result(age: i32, probability: f64) -> PredictionResult {
        PredictionResult::new(PatientRecord::new(age, 120, 100, 22.0), probability, RiskLabel::Low)
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = HistoryLog::new();
        history.append(result(20, 0.1));
        history.append(result(30, 0.2));
        history.append(result(40, 0.3));

        let ages: Vec<i32> = history.all().iter().map(|r| r.input.age).collect();
        assert_eq!(ages, vec![20, 30, 40]);
        assert_eq!(history.latest().unwrap().input.age, 40);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = HistoryLog::new();
        history.append(result(30, 0.2));
        history.append(result(30, 0.2));

        assert_eq!(history.len(), 2);
        assert_eq!(history.all()[0], history.all()[1]);
    }

    #[test]
    fn test_empty_history() {
        let history = HistoryLog::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history.all().is_empty());
    }
}
