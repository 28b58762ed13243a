use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display order of the strategic pillars. Unknown pillars follow, in
/// stored order.
pub const PILLAR_ORDER: [&str; 5] = ["Tech", "Diversification", "Growth", "Culture", "Brand"];

fn pillar_rank(pillar: &str) -> usize {
    PILLAR_ORDER
        .iter()
        .position(|p| *p == pillar)
        .unwrap_or(PILLAR_ORDER.len())
}

/// Sort anything with a pillar into [`PILLAR_ORDER`]. The sort is stable.
pub fn sort_by_pillar<T>(items: &mut [&T], pillar: impl Fn(&T) -> &str) {
    items.sort_by_key(|item| pillar_rank(pillar(item)));
}

/// ISO week label used for weekly check-ins, e.g. `"2026-W07"`.
pub fn week_label(day: NaiveDate) -> String {
    let week = day.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Traffic-light status of a key result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OkrStatus {
    #[default]
    Green,
    Amber,
    Red,
}

impl OkrStatus {
    pub fn all() -> &'static [OkrStatus] {
        &[OkrStatus::Green, OkrStatus::Amber, OkrStatus::Red]
    }

    pub fn label(&self) -> &'static str {
        match self {
            OkrStatus::Green => "Green",
            OkrStatus::Amber => "Amber",
            OkrStatus::Red => "Red",
        }
    }
}

/// Classify a current value against amber/green thresholds.
///
/// Without both thresholds a key result is considered on track.
pub fn compute_status(current: f64, amber: Option<f64>, green: Option<f64>) -> OkrStatus {
    let (Some(amber), Some(green)) = (amber, green) else {
        return OkrStatus::Green;
    };
    if current >= green {
        OkrStatus::Green
    } else if current >= amber {
        OkrStatus::Amber
    } else {
        OkrStatus::Red
    }
}

/// A measurable key result under an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    pub id: Uuid,
    pub pillar: String,
    pub objective: String,
    pub key_result: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub target: f64,
    pub current: f64,
    #[serde(default)]
    pub status: OkrStatus,
    /// Owner's confidence, 1–10.
    pub confidence: u8,
    /// Quarter tag such as `"Q1"`.
    #[serde(default)]
    pub quarter: Option<String>,
    #[serde(default)]
    pub threshold_amber: Option<f64>,
    #[serde(default)]
    pub threshold_green: Option<f64>,
}

impl KeyResult {
    pub fn new(
        pillar: impl Into<String>,
        objective: impl Into<String>,
        key_result: impl Into<String>,
        target: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            pillar: pillar.into(),
            objective: objective.into(),
            key_result: key_result.into(),
            owner: None,
            target,
            current: 0.0,
            status: OkrStatus::Green,
            confidence: 7,
            quarter: Some("Q1".to_string()),
            threshold_amber: None,
            threshold_green: None,
        }
    }

    /// Progress towards target in `[0, 1]`. A zero target counts as 1.
    pub fn progress(&self) -> f64 {
        let target = if self.target == 0.0 { 1.0 } else { self.target };
        (self.current / target).clamp(0.0, 1.0)
    }

    pub fn has_thresholds(&self) -> bool {
        self.threshold_amber.is_some() && self.threshold_green.is_some()
    }

    /// Re-derive the status from thresholds. A manually chosen status is
    /// kept when thresholds are not configured.
    pub fn refresh_status(&mut self) {
        if self.has_thresholds() {
            self.status = compute_status(self.current, self.threshold_amber, self.threshold_green);
        }
        self.confidence = self.confidence.clamp(1, 10);
    }
}

/// Long-range ambition for one pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiveYearTarget {
    pub id: Uuid,
    pub pillar: String,
    pub target: String,
    #[serde(default)]
    pub owner: Option<String>,
    /// Where the pillar stands today, free text such as `"10% adoption"`.
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(default)]
    pub target_value: Option<String>,
}

impl FiveYearTarget {
    pub fn new(pillar: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pillar: pillar.into(),
            target: target.into(),
            owner: None,
            current_position: None,
            target_value: None,
        }
    }
}

/// This year's objective for a pillar, linked to a five-year target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualObjective {
    pub id: Uuid,
    pub pillar: String,
    pub objective: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub linked_target: Option<String>,
    #[serde(default)]
    pub success_metric: Option<String>,
}

impl AnnualObjective {
    pub fn new(pillar: impl Into<String>, objective: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pillar: pillar.into(),
            objective: objective.into(),
            owner: None,
            linked_target: None,
            success_metric: None,
        }
    }
}

/// A weekly check-in against a key result. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyEntry {
    pub id: Uuid,
    /// ISO week label, see [`week_label`].
    pub week: String,
    pub pillar: String,
    pub objective: String,
    pub key_result: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub current: Option<f64>,
    /// Progress in `[0, 1]`.
    #[serde(default)]
    pub progress: Option<f64>,
    #[serde(default)]
    pub status: Option<OkrStatus>,
    #[serde(default)]
    pub blockers: Option<String>,
    #[serde(default)]
    pub decision_required: Option<String>,
}

impl WeeklyEntry {
    /// Snapshot a key result's current state for the given week.
    pub fn check_in(key_result: &KeyResult, week: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            week: week.into(),
            pillar: key_result.pillar.clone(),
            objective: key_result.objective.clone(),
            key_result: key_result.key_result.clone(),
            owner: key_result.owner.clone(),
            target: Some(key_result.target),
            current: Some(key_result.current),
            progress: Some(key_result.progress()),
            status: Some(key_result.status),
            blockers: None,
            decision_required: None,
        }
    }

    /// Fill in progress from target and current when it was not given.
    pub fn derive_progress(&mut self) {
        if self.progress.is_none() {
            if let (Some(target), Some(current)) = (self.target, self.current) {
                let target = if target == 0.0 { 1.0 } else { target };
                self.progress = Some((current / target).clamp(0.0, 1.0));
            }
        }
    }

    pub fn needs_decision(&self) -> bool {
        self.decision_required
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}
