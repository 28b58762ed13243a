use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A company-level metric that roadmap features are aligned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicMetric {
    pub id: Uuid,
    /// Growth engine the metric belongs to (e.g. "Acquisition").
    pub engine: String,
    /// Short focus name, used as the lane title and legend label.
    pub focus: String,
    /// What is measured.
    pub metric: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub detailed_measurement: Option<String>,
    #[serde(default)]
    pub base_goal: Option<String>,
    #[serde(default)]
    pub target_goal: Option<String>,
    #[serde(default)]
    pub stretch_goal: Option<String>,
    #[serde(default)]
    pub current_value: Option<f64>,
}

impl StrategicMetric {
    pub fn new(
        engine: impl Into<String>,
        focus: impl Into<String>,
        metric: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            engine: engine.into(),
            focus: focus.into(),
            metric: metric.into(),
            description: None,
            detailed_measurement: None,
            base_goal: None,
            target_goal: None,
            stretch_goal: None,
            current_value: None,
        }
    }

    /// Lane/legend label; falls back when the focus is blank.
    pub fn label(&self) -> &str {
        if self.focus.trim().is_empty() {
            "Unspecified Metric"
        } else {
            &self.focus
        }
    }
}
