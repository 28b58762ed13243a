use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::department::Department;
use super::feature::{Feature, FeatureStatus};
use super::metric::StrategicMetric;
use super::okr::{sort_by_pillar, AnnualObjective, FiveYearTarget, KeyResult, OkrStatus, WeeklyEntry};

/// The roadmap document: departments, their features, the strategic metrics
/// features align to, and the OKR hierarchy from five-year targets down to
/// weekly check-ins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    pub name: String,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub metrics: Vec<StrategicMetric>,
    #[serde(default)]
    pub key_results: Vec<KeyResult>,
    #[serde(default)]
    pub five_year_targets: Vec<FiveYearTarget>,
    #[serde(default)]
    pub annual_objectives: Vec<AnnualObjective>,
    #[serde(default)]
    pub weekly_entries: Vec<WeeklyEntry>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Roadmap {
    fn default() -> Self {
        Self {
            name: "Untitled Roadmap".to_string(),
            departments: Vec::new(),
            features: Vec::new(),
            metrics: Vec::new(),
            key_results: Vec::new(),
            five_year_targets: Vec::new(),
            annual_objectives: Vec::new(),
            weekly_entries: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Roadmap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn feature(&self, id: Uuid) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn feature_mut(&mut self, id: Uuid) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.id == id)
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    pub fn metric(&self, id: Uuid) -> Option<&StrategicMetric> {
        self.metrics.iter().find(|m| m.id == id)
    }

    /// Position of a metric in stored order; drives its palette colour.
    pub fn metric_index(&self, id: Uuid) -> Option<usize> {
        self.metrics.iter().position(|m| m.id == id)
    }

    pub fn key_result_mut(&mut self, id: Uuid) -> Option<&mut KeyResult> {
        self.key_results.iter_mut().find(|k| k.id == id)
    }

    /// Five-year targets in pillar display order.
    pub fn targets_by_pillar(&self) -> Vec<&FiveYearTarget> {
        let mut targets: Vec<&FiveYearTarget> = self.five_year_targets.iter().collect();
        sort_by_pillar(&mut targets, |t| t.pillar.as_str());
        targets
    }

    /// Annual objectives in pillar display order.
    pub fn objectives_by_pillar(&self) -> Vec<&AnnualObjective> {
        let mut objectives: Vec<&AnnualObjective> = self.annual_objectives.iter().collect();
        sort_by_pillar(&mut objectives, |o| o.pillar.as_str());
        objectives
    }

    /// Check-ins newest week first; entries of the same week keep the order
    /// they were added in.
    pub fn weekly_entries_newest_first(&self) -> Vec<&WeeklyEntry> {
        let mut entries: Vec<&WeeklyEntry> = self.weekly_entries.iter().collect();
        entries.sort_by(|a, b| b.week.cmp(&a.week));
        entries
    }

    pub fn weekly_entries_for(&self, week: &str) -> impl Iterator<Item = &WeeklyEntry> + '_ {
        let week = week.to_string();
        self.weekly_entries.iter().filter(move |e| e.week == week)
    }

    /// Department display name for a feature, falling back to the raw slug.
    pub fn department_name<'a>(&'a self, feature: &'a Feature) -> &'a str {
        self.department(&feature.department_id)
            .map(|d| d.name.as_str())
            .unwrap_or(feature.department_id.as_str())
    }

    /// Earliest and latest scheduled dates across all features.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.features.iter().filter_map(|f| f.start_date).min()?;
        let max = self.features.iter().filter_map(|f| f.end_date).max()?;
        Some((min, max))
    }

    /// Small built-in roadmap shown on first launch.
    pub fn sample(year: i32) -> Self {
        let day = |m: u32, d: u32| {
            NaiveDate::from_ymd_opt(year, m, d).unwrap_or_default()
        };
        let mut roadmap = Roadmap::new(format!("Roadmap {}", year));

        roadmap.departments = vec![
            Department::new("tax", "Tax").with_role("Tax Consultants", "Tax Compliance & Advisory"),
            Department::new("insurance", "Insurance")
                .with_role("Insurance Brokers", "Risk Management & coverage"),
            Department::new("accounting", "Accounting")
                .with_role("Accountants", "Financial Reporting & Bookkeeping"),
            Department::new("fa", "Financial Advisory")
                .with_role("Financial Advisors", "Wealth Management & Investment"),
            Department::new("group", "Group").with_role("Group Admin", "Group Operations & Strategy"),
        ];

        let acquisition = StrategicMetric::new("Growth", "Client Acquisition", "New clients onboarded");
        let retention = StrategicMetric::new("Growth", "Cross-sell", "Clients using 2+ products");
        let efficiency = StrategicMetric::new("Tech", "Digital Adoption", "Clients active in the app");

        let mut portal = Feature::new("fa", "Client Portal")
            .with_schedule(day(2, 1), day(4, 1))
            .with_metric(efficiency.id);
        portal.status = FeatureStatus::InDevelopment;
        portal.progress = 40;

        let mut efiling = Feature::new("tax", "E-filing Integration")
            .with_schedule(day(3, 15), day(6, 30))
            .with_metric(efficiency.id);
        efiling.status = FeatureStatus::Planning;

        let mut referral = Feature::new("group", "Referral Programme")
            .with_schedule(day(1, 10), day(3, 31))
            .with_metric(acquisition.id);
        referral.status = FeatureStatus::Live;
        referral.progress = 100;

        let mut bundle = Feature::new("insurance", "Bundled Cover Quotes")
            .with_schedule(day(5, 1), day(8, 31))
            .with_metric(retention.id);
        bundle.status = FeatureStatus::Discovery;
        bundle.progress = 10;

        let mut ledger = Feature::new("accounting", "Automated Ledger Sync")
            .with_schedule(day(7, 1), day(7, 1) + Duration::days(75));
        ledger.status = FeatureStatus::HighPriority;

        let unscheduled = Feature::new("fa", "Advice Playbook").with_metric(retention.id);

        roadmap.features = vec![portal, efiling, referral, bundle, ledger, unscheduled];
        roadmap.metrics = vec![acquisition, retention, efficiency];

        let mut recruits = KeyResult::new("Growth", "Growing and motivating sales team", "2 new BAs recruited", 2.0);
        recruits.current = 1.0;
        recruits.threshold_amber = Some(1.0);
        recruits.threshold_green = Some(2.0);
        recruits.refresh_status();

        let mut adoption = KeyResult::new("Tech", "App adoption", "25% of clients active monthly", 25.0);
        adoption.current = 8.0;
        adoption.status = OkrStatus::Red;
        adoption.confidence = 4;

        roadmap.key_results = vec![recruits, adoption];

        let mut tech = FiveYearTarget::new(
            "Tech",
            "At the tip of your fingers, you have access to all of your financial information",
        );
        tech.current_position = Some("10% adoption".to_string());
        tech.target_value = Some("100% adoption".to_string());
        let mut growth = FiveYearTarget::new("Growth", "Empower 50,000 families to achieve financial clarity");
        growth.target_value = Some("50,000 clients".to_string());
        roadmap.five_year_targets = vec![
            growth,
            FiveYearTarget::new("Brand", "Most respected and trusted financial services company"),
            tech,
            FiveYearTarget::new("Culture", "The best company in the country to work for"),
        ];

        let mut clients = AnnualObjective::new("Growth", "4500 new clients");
        clients.linked_target = Some("50,000 clients".to_string());
        clients.success_metric = Some("3600 new clients".to_string());
        roadmap.annual_objectives = vec![clients];

        roadmap
    }
}
