use chrono::NaiveDate;
use uuid::Uuid;

use super::drag::{BarPosition, GestureOutcome};
use crate::model::PlanningWindow;

/// Callbacks a timeline view needs from whoever owns the data.
pub trait TimelineHost {
    /// Persist new dates for a dragged feature. Fire-and-forget: failures
    /// are the host's to report.
    fn commit_dates(&mut self, item_id: Uuid, start: NaiveDate, end: NaiveDate);

    /// Open a clicked feature for editing.
    fn activate(&mut self, item_id: Uuid);
}

/// Dates produced by a finished drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCommit {
    pub item_id: Uuid,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateCommit {
    pub fn from_preview(item_id: Uuid, position: BarPosition, window: &PlanningWindow) -> Self {
        Self {
            item_id,
            start: window.date_of(position.left),
            end: window.date_of(position.right()),
        }
    }

    pub fn start_iso(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// Route a finished gesture to the host. Returns the commit, if one was sent.
pub fn dispatch<H>(outcome: GestureOutcome, window: &PlanningWindow, host: &mut H) -> Option<DateCommit>
where
    H: TimelineHost + ?Sized,
{
    match outcome {
        GestureOutcome::Commit { item_id, position, .. } => {
            let commit = DateCommit::from_preview(item_id, position, window);
            log::debug!(
                "committing {} → {} for {}",
                commit.start_iso(),
                commit.end_iso(),
                item_id
            );
            host.commit_dates(commit.item_id, commit.start, commit.end);
            Some(commit)
        }
        GestureOutcome::Activate { item_id, .. } => {
            host.activate(item_id);
            None
        }
        GestureOutcome::Cancelled => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::drag::ItemKey;

    #[derive(Default)]
    struct Recorder {
        commits: Vec<(Uuid, NaiveDate, NaiveDate)>,
        activations: Vec<Uuid>,
    }

    impl TimelineHost for Recorder {
        fn commit_dates(&mut self, item_id: Uuid, start: NaiveDate, end: NaiveDate) {
            self.commits.push((item_id, start, end));
        }

        fn activate(&mut self, item_id: Uuid) {
            self.activations.push(item_id);
        }
    }

    #[test]
    fn test_commit_converts_preview_to_dates() {
        let window = PlanningWindow::for_year(2026);
        let id = Uuid::new_v4();
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 5, 15).unwrap();
        let left = window.position_of(Some(start));
        let width = window.width_of(Some(start), Some(end));
        let outcome = GestureOutcome::Commit {
            item_id: id,
            key: ItemKey::new(0, 0),
            position: BarPosition::new(left, width),
        };

        let mut host = Recorder::default();
        let commit = dispatch(outcome, &window, &mut host).unwrap();
        assert_eq!(host.commits, vec![(id, start, end)]);
        assert!(host.activations.is_empty());
        assert_eq!(commit.start_iso(), "2026-03-01");
        assert_eq!(commit.end_iso(), "2026-05-15");
    }

    #[test]
    fn test_activate_and_cancel() {
        let window = PlanningWindow::default();
        let id = Uuid::new_v4();
        let mut host = Recorder::default();
        let activate = GestureOutcome::Activate { item_id: id, key: ItemKey::new(2, 1) };
        assert!(dispatch(activate, &window, &mut host).is_none());
        assert!(dispatch(GestureOutcome::Cancelled, &window, &mut host).is_none());
        assert_eq!(host.activations, vec![id]);
        assert!(host.commits.is_empty());
    }
}
