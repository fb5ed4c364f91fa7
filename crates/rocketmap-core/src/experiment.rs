use crate::types::{ExperimentResult, ExperimentStatus, ExperimentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Experiment
// ---------------------------------------------------------------------------

/// A planned or completed validation activity for one assumption.
///
/// Created as `planned` with no result. Completion travels through
/// `Canvas::complete_experiment`, which also settles the owning
/// assumption's status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    pub id: String,
    pub experiment_type: ExperimentType,
    pub status: ExperimentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ExperimentResult>,
    pub success_criteria: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Experiment {
    pub fn new(experiment_type: ExperimentType, success_criteria: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            experiment_type,
            status: ExperimentStatus::Planned,
            result: None,
            success_criteria: success_criteria.into(),
            evidence: None,
            source_url: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ExperimentStatus::Completed
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_experiment_is_planned() {
        let e = Experiment::new(ExperimentType::Survey, "20 responses, >60% positive");
        assert_eq!(e.status, ExperimentStatus::Planned);
        assert!(e.result.is_none());
        assert!(e.completed_at.is_none());
    }

    #[test]
    fn planned_fields_omitted_from_yaml() {
        let e = Experiment::new(ExperimentType::Interview, "5 interviews");
        let yaml = serde_yaml::to_string(&e).unwrap();
        assert!(!yaml.contains("result"));
        assert!(!yaml.contains("completed_at"));
    }

    #[test]
    fn experiment_roundtrip() {
        let mut e = Experiment::new(ExperimentType::AbTest, "CTR +10%");
        e.status = ExperimentStatus::Completed;
        e.result = Some(ExperimentResult::Supports);
        e.evidence = Some("variant B won".to_string());
        e.completed_at = Some(Utc::now());

        let yaml = serde_yaml::to_string(&e).unwrap();
        let parsed: Experiment = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.status, ExperimentStatus::Completed);
        assert_eq!(parsed.result, Some(ExperimentResult::Supports));
        assert_eq!(parsed.evidence.as_deref(), Some("variant B won"));
    }
}
