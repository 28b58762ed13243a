use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{Result, RoadmapError};
use crate::model::{AnnualObjective, Feature, FiveYearTarget, KeyResult, Roadmap, StrategicMetric, WeeklyEntry};

/// Owns the roadmap document and applies every mutation to it.
///
/// Writes are last-write-wins. When a backing file is set and autosave is
/// on, each successful mutation is written straight to disk.
#[derive(Debug)]
pub struct RoadmapStore {
    roadmap: Roadmap,
    path: Option<PathBuf>,
    autosave: bool,
}

impl RoadmapStore {
    pub fn new(roadmap: Roadmap) -> Self {
        Self {
            roadmap,
            path: None,
            autosave: false,
        }
    }

    /// Load a store from disk, remembering the path for later saves.
    pub fn open(path: &Path, autosave: bool) -> Result<Self> {
        let roadmap = crate::io::load_roadmap(path)?;
        log::info!(
            "Loaded roadmap '{}' ({} features) from {}",
            roadmap.name,
            roadmap.features.len(),
            path.display()
        );
        Ok(Self {
            roadmap,
            path: Some(path.to_path_buf()),
            autosave,
        })
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_autosave(&mut self, autosave: bool) {
        self.autosave = autosave;
    }

    /// Replace the whole document (new, open, or CSV import).
    pub fn replace(&mut self, roadmap: Roadmap, path: Option<PathBuf>) {
        self.roadmap = roadmap;
        self.path = path;
    }

    /// Save to the current path.
    pub fn save(&mut self) -> Result<PathBuf> {
        let Some(path) = self.path.clone() else {
            return Err(RoadmapError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "roadmap has no file yet",
            )));
        };
        self.save_as(&path)?;
        Ok(path)
    }

    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.roadmap.touch();
        crate::io::save_roadmap(&self.roadmap, path)?;
        self.path = Some(path.to_path_buf());
        log::info!("Saved roadmap to {}", path.display());
        Ok(())
    }

    fn committed(&mut self) -> Result<()> {
        self.roadmap.touch();
        if self.autosave {
            if let Some(path) = self.path.clone() {
                crate::io::save_roadmap(&self.roadmap, &path)?;
            }
        }
        Ok(())
    }

    // --- Features ---

    pub fn add_feature(&mut self, feature: Feature) -> Result<Uuid> {
        if let Some((start, end)) = feature.schedule() {
            if start > end {
                return Err(RoadmapError::InvalidDateRange { start, end });
            }
        }
        let id = feature.id;
        log::info!("Adding feature '{}' ({})", feature.title, id);
        self.roadmap.features.push(feature);
        self.committed()?;
        Ok(id)
    }

    /// Replace a feature's fields, keeping its id.
    pub fn update_feature(&mut self, feature: Feature) -> Result<()> {
        let id = feature.id;
        let slot = self
            .roadmap
            .feature_mut(id)
            .ok_or_else(|| RoadmapError::not_found("feature", id))?;
        *slot = feature;
        log::info!("Updated feature {}", id);
        self.committed()
    }

    pub fn delete_feature(&mut self, id: Uuid) -> Result<Feature> {
        let index = self
            .roadmap
            .features
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| RoadmapError::not_found("feature", id))?;
        let removed = self.roadmap.features.remove(index);
        log::info!("Deleted feature '{}' ({})", removed.title, id);
        self.committed()?;
        Ok(removed)
    }

    /// Patch only the schedule of a feature.
    pub fn update_feature_dates(&mut self, id: Uuid, start: NaiveDate, end: NaiveDate) -> Result<()> {
        if start > end {
            return Err(RoadmapError::InvalidDateRange { start, end });
        }
        let feature = self
            .roadmap
            .feature_mut(id)
            .ok_or_else(|| RoadmapError::not_found("feature", id))?;
        feature.start_date = Some(start);
        feature.end_date = Some(end);
        log::info!("Rescheduled feature {} to {} → {}", id, start, end);
        self.committed()
    }

    // --- Metrics ---

    pub fn add_metric(&mut self, metric: StrategicMetric) -> Result<Uuid> {
        let id = metric.id;
        self.roadmap.metrics.push(metric);
        self.committed()?;
        Ok(id)
    }

    pub fn update_metric(&mut self, metric: StrategicMetric) -> Result<()> {
        let id = metric.id;
        let slot = self
            .roadmap
            .metrics
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| RoadmapError::not_found("metric", id))?;
        *slot = metric;
        self.committed()
    }

    // --- Key results ---

    pub fn add_key_result(&mut self, mut key_result: KeyResult) -> Result<Uuid> {
        key_result.refresh_status();
        let id = key_result.id;
        self.roadmap.key_results.push(key_result);
        self.committed()?;
        Ok(id)
    }

    /// Replace a key result; the status is re-derived from its thresholds.
    pub fn update_key_result(&mut self, mut key_result: KeyResult) -> Result<()> {
        key_result.refresh_status();
        let id = key_result.id;
        let slot = self
            .roadmap
            .key_result_mut(id)
            .ok_or_else(|| RoadmapError::not_found("key result", id))?;
        *slot = key_result;
        self.committed()
    }

    pub fn delete_key_result(&mut self, id: Uuid) -> Result<()> {
        let before = self.roadmap.key_results.len();
        self.roadmap.key_results.retain(|k| k.id != id);
        if self.roadmap.key_results.len() == before {
            return Err(RoadmapError::not_found("key result", id));
        }
        self.committed()
    }

    // --- Targets, objectives and check-ins ---

    pub fn five_year_targets(&self) -> &[FiveYearTarget] {
        &self.roadmap.five_year_targets
    }

    pub fn annual_objectives(&self) -> &[AnnualObjective] {
        &self.roadmap.annual_objectives
    }

    pub fn weekly_entries(&self) -> &[WeeklyEntry] {
        &self.roadmap.weekly_entries
    }

    pub fn add_five_year_target(&mut self, target: FiveYearTarget) -> Result<Uuid> {
        let id = target.id;
        log::info!("Adding {} target ({})", target.pillar, id);
        self.roadmap.five_year_targets.push(target);
        self.committed()?;
        Ok(id)
    }

    pub fn add_annual_objective(&mut self, objective: AnnualObjective) -> Result<Uuid> {
        let id = objective.id;
        log::info!("Adding {} objective '{}' ({})", objective.pillar, objective.objective, id);
        self.roadmap.annual_objectives.push(objective);
        self.committed()?;
        Ok(id)
    }

    /// Append a weekly check-in. Progress is derived from target and current
    /// when the entry leaves it out.
    pub fn add_weekly_entry(&mut self, mut entry: WeeklyEntry) -> Result<Uuid> {
        entry.derive_progress();
        let id = entry.id;
        log::info!("Weekly check-in for '{}' in {}", entry.key_result, entry.week);
        self.roadmap.weekly_entries.push(entry);
        self.committed()?;
        Ok(id)
    }

    /// Snapshot a key result into a check-in for `week`.
    pub fn check_in_key_result(
        &mut self,
        id: Uuid,
        week: &str,
        blockers: Option<String>,
        decision_required: Option<String>,
    ) -> Result<Uuid> {
        let key_result = self
            .roadmap
            .key_results
            .iter()
            .find(|k| k.id == id)
            .ok_or_else(|| RoadmapError::not_found("key result", id))?;
        let mut entry = WeeklyEntry::check_in(key_result, week);
        entry.blockers = blockers.filter(|b| !b.trim().is_empty());
        entry.decision_required = decision_required.filter(|d| !d.trim().is_empty());
        self.add_weekly_entry(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OkrStatus;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    #[test]
    fn test_update_feature_dates_patches_only_dates() {
        let mut store = RoadmapStore::new(Roadmap::sample(2026));
        let before = store.roadmap().features[0].clone();
        store.update_feature_dates(before.id, d(3, 1), d(3, 20)).unwrap();
        let after = store.roadmap().feature(before.id).unwrap();
        assert_eq!(after.schedule(), Some((d(3, 1), d(3, 20))));
        assert_eq!(after.title, before.title);
        assert_eq!(after.progress, before.progress);
    }

    #[test]
    fn test_update_feature_dates_rejects_unknown_and_inverted() {
        let mut store = RoadmapStore::new(Roadmap::sample(2026));
        let id = store.roadmap().features[0].id;
        assert!(matches!(
            store.update_feature_dates(Uuid::new_v4(), d(1, 1), d(1, 2)),
            Err(RoadmapError::NotFound { kind: "feature", .. })
        ));
        assert!(matches!(
            store.update_feature_dates(id, d(5, 1), d(4, 1)),
            Err(RoadmapError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_last_write_wins() {
        let mut store = RoadmapStore::new(Roadmap::sample(2026));
        let id = store.roadmap().features[1].id;
        store.update_feature_dates(id, d(2, 1), d(2, 5)).unwrap();
        store.update_feature_dates(id, d(9, 1), d(9, 5)).unwrap();
        assert_eq!(store.roadmap().feature(id).unwrap().schedule(), Some((d(9, 1), d(9, 5))));
    }

    #[test]
    fn test_feature_crud() {
        let mut store = RoadmapStore::new(Roadmap::new("Crud"));
        let id = store.add_feature(Feature::new("tax", "Draft")).unwrap();
        let mut edited = store.roadmap().feature(id).unwrap().clone();
        edited.title = "Final".to_string();
        store.update_feature(edited).unwrap();
        assert_eq!(store.roadmap().feature(id).unwrap().title, "Final");
        let removed = store.delete_feature(id).unwrap();
        assert_eq!(removed.title, "Final");
        assert!(store.delete_feature(id).is_err());
    }

    #[test]
    fn test_key_result_status_is_derived_on_update() {
        let mut store = RoadmapStore::new(Roadmap::new("Okr"));
        let mut kr = KeyResult::new("Growth", "Clients", "New clients", 100.0);
        kr.threshold_amber = Some(50.0);
        kr.threshold_green = Some(90.0);
        kr.current = 10.0;
        let id = store.add_key_result(kr.clone()).unwrap();
        assert_eq!(store.roadmap().key_results[0].status, OkrStatus::Red);

        kr.current = 60.0;
        store.update_key_result(kr).unwrap();
        assert_eq!(store.roadmap().key_results[0].status, OkrStatus::Amber);

        store.delete_key_result(id).unwrap();
        assert!(store.delete_key_result(id).is_err());
    }

    #[test]
    fn test_metric_add_and_update() {
        let mut store = RoadmapStore::new(Roadmap::new("Metrics"));
        let id = store
            .add_metric(StrategicMetric::new("Acquisition", "Leads", "Qualified leads per month"))
            .unwrap();
        let mut metric = store.roadmap().metric(id).unwrap().clone();
        metric.current_value = Some(42.0);
        store.update_metric(metric).unwrap();
        assert_eq!(store.roadmap().metric(id).unwrap().current_value, Some(42.0));

        let stranger = StrategicMetric::new("x", "y", "z");
        assert!(matches!(
            store.update_metric(stranger),
            Err(RoadmapError::NotFound { kind: "metric", .. })
        ));
    }

    #[test]
    fn test_add_weekly_entry_derives_missing_progress() {
        let mut store = RoadmapStore::new(Roadmap::new("Weekly"));
        let kr = KeyResult::new("Growth", "Sales team", "150 new clients", 150.0);
        let mut entry = WeeklyEntry::check_in(&kr, "2026-W09");
        entry.current = Some(19.5);
        entry.progress = None;
        entry.blockers = Some("Waiting on marketing leads".to_string());
        let id = store.add_weekly_entry(entry).unwrap();

        assert_eq!(store.weekly_entries().len(), 1);
        let stored = &store.weekly_entries()[0];
        assert_eq!(stored.id, id);
        assert_eq!(stored.progress, Some(0.13));
        assert_eq!(stored.blockers.as_deref(), Some("Waiting on marketing leads"));
    }

    #[test]
    fn test_check_in_key_result() {
        let mut store = RoadmapStore::new(Roadmap::new("Weekly"));
        let mut kr = KeyResult::new("Growth", "Sales team", "2 new BAs", 2.0);
        kr.current = 1.0;
        let kr_id = store.add_key_result(kr).unwrap();

        store
            .check_in_key_result(kr_id, "2026-W10", Some("  ".to_string()), Some("Approve budget".to_string()))
            .unwrap();
        let entry = &store.weekly_entries()[0];
        assert_eq!(entry.week, "2026-W10");
        assert_eq!(entry.progress, Some(0.5));
        assert_eq!(entry.blockers, None);
        assert!(entry.needs_decision());

        assert!(matches!(
            store.check_in_key_result(Uuid::new_v4(), "2026-W10", None, None),
            Err(RoadmapError::NotFound { kind: "key result", .. })
        ));
        assert_eq!(store.weekly_entries().len(), 1);
    }

    #[test]
    fn test_targets_and_objectives() {
        let mut store = RoadmapStore::new(Roadmap::new("Plan"));
        store
            .add_five_year_target(FiveYearTarget::new("Growth", "50,000 families"))
            .unwrap();
        let mut objective = AnnualObjective::new("Growth", "4500 new clients");
        objective.linked_target = Some("50,000 clients".to_string());
        store.add_annual_objective(objective).unwrap();
        assert_eq!(store.five_year_targets().len(), 1);
        assert_eq!(
            store.annual_objectives()[0].linked_target.as_deref(),
            Some("50,000 clients")
        );
    }

    #[test]
    fn test_autosave_writes_each_mutation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roadmap.json");
        let mut store = RoadmapStore::new(Roadmap::sample(2026));
        store.save_as(&path).unwrap();
        store.set_autosave(true);

        let id = store.roadmap().features[0].id;
        store.update_feature_dates(id, d(10, 1), d(11, 1)).unwrap();

        let reopened = RoadmapStore::open(&path, false).unwrap();
        assert_eq!(
            reopened.roadmap().feature(id).unwrap().schedule(),
            Some((d(10, 1), d(11, 1)))
        );
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut store = RoadmapStore::new(Roadmap::new("Nowhere"));
        assert!(store.save().is_err());
    }
}
