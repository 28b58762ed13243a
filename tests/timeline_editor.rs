use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use roadmap_planner::model::{Department, Feature, PlanningWindow, Roadmap};
use roadmap_planner::store::RoadmapStore;
use roadmap_planner::timeline::drag::MIN_RESIZE_WIDTH_PCT;
use roadmap_planner::timeline::lane::{lanes_by_department, layout_lane};
use roadmap_planner::timeline::{
    dispatch, DragController, DragMode, DragStart, GestureOutcome, PointerSource, TimelineHost,
};

const CONTAINER_PX: f32 = 1000.0;
const PRESS_X: f32 = 400.0;

fn d(m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, m, day).unwrap()
}

/// Host that persists commits into a real store, the way the app does.
struct StoreHost {
    store: RoadmapStore,
    activated: Vec<Uuid>,
    failures: Vec<String>,
}

impl TimelineHost for StoreHost {
    fn commit_dates(&mut self, item_id: Uuid, start: NaiveDate, end: NaiveDate) {
        if let Err(e) = self.store.update_feature_dates(item_id, start, end) {
            self.failures.push(e.to_string());
        }
    }

    fn activate(&mut self, item_id: Uuid) {
        self.activated.push(item_id);
    }
}

fn setup() -> (StoreHost, Uuid) {
    let mut roadmap = Roadmap::new("Scenario");
    roadmap.departments = vec![Department::new("fa", "Financial Advisory")];
    let feature = Feature::new("fa", "Client Portal").with_schedule(d(2, 1), d(4, 1));
    let id = feature.id;
    roadmap.features = vec![feature];
    let host = StoreHost {
        store: RoadmapStore::new(roadmap),
        activated: Vec::new(),
        failures: Vec::new(),
    };
    (host, id)
}

fn drag_start(host: &StoreHost, window: &PlanningWindow, mode: DragMode) -> DragStart {
    let lanes = lanes_by_department(host.store.roadmap());
    let layout = layout_lane(0, &lanes[0], window);
    let bar = &layout.bars[0];
    DragStart {
        key: bar.key,
        item_id: bar.feature.id,
        mode,
        pointer_x: PRESS_X,
        container_width: CONTAINER_PX,
        original: bar.position,
    }
}

#[test]
fn move_by_ten_percent_commits_shifted_dates() {
    let window = PlanningWindow::for_year(2026);
    let (mut host, id) = setup();

    let left = window.position_of(Some(d(2, 1)));
    let right = window.position_of(Some(d(4, 1)));
    assert!((left - 8.5).abs() < 0.1);
    assert!((right - left - window.width_of(Some(d(2, 1)), Some(d(4, 1)))).abs() < 1e-9);

    let start = drag_start(&host, &window, DragMode::Move);
    assert_eq!(start.original.left, left);

    let mut drag = DragController::new();
    assert!(drag.begin(start, PointerSource::Mouse));
    let preview = drag
        .pointer_move(PRESS_X + CONTAINER_PX * 0.10, PointerSource::Mouse)
        .unwrap();
    assert!((preview.left - (left + 10.0)).abs() < 1e-9);
    assert!((preview.width - start.original.width).abs() < 1e-9);

    let outcome = drag.pointer_up().unwrap();
    let commit = dispatch(outcome, &window, &mut host).unwrap();

    assert_eq!(commit.start, window.date_of(left + 10.0));
    assert_eq!(commit.end, window.date_of(right + 10.0));
    assert!(commit.start > d(3, 5) && commit.start < d(3, 15));
    assert_eq!((commit.end - commit.start).num_days(), (d(4, 1) - d(2, 1)).num_days());

    let stored = host.store.roadmap().feature(id).unwrap();
    assert_eq!(stored.schedule(), Some((commit.start, commit.end)));
    assert!(host.activated.is_empty());
    assert!(host.failures.is_empty());
    assert!(drag.click_suppressed());
}

#[test]
fn small_wiggle_activates_instead_of_committing() {
    let window = PlanningWindow::for_year(2026);
    let (mut host, id) = setup();
    let mut drag = DragController::new();

    drag.begin(drag_start(&host, &window, DragMode::Move), PointerSource::Mouse);
    drag.pointer_move(PRESS_X + 3.0, PointerSource::Mouse);
    let outcome = drag.pointer_up().unwrap();
    assert!(dispatch(outcome, &window, &mut host).is_none());

    assert_eq!(host.activated, vec![id]);
    assert_eq!(host.store.roadmap().feature(id).unwrap().schedule(), Some((d(2, 1), d(4, 1))));
}

#[test]
fn two_finger_touch_never_reaches_the_host() {
    let window = PlanningWindow::for_year(2026);
    let (host, _) = setup();
    let mut drag = DragController::new();

    assert!(!drag.begin(drag_start(&host, &window, DragMode::Move), PointerSource::Touch { touches: 2 }));
    assert!(drag.pointer_move(900.0, PointerSource::Touch { touches: 2 }).is_none());
    assert!(drag.pointer_up().is_none());
}

#[test]
fn resize_start_past_end_keeps_a_valid_range() {
    let window = PlanningWindow::for_year(2026);
    let (mut host, id) = setup();
    let start = drag_start(&host, &window, DragMode::ResizeStart);
    let mut drag = DragController::new();

    drag.begin(start, PointerSource::Mouse);
    let preview = drag.pointer_move(PRESS_X + 600.0, PointerSource::Mouse).unwrap();
    assert!(preview.width >= MIN_RESIZE_WIDTH_PCT - 1e-9);
    assert!((preview.right() - start.original.right()).abs() < 1e-9);

    let outcome = drag.pointer_up().unwrap();
    let commit = dispatch(outcome, &window, &mut host).unwrap();
    assert!(commit.start <= commit.end);
    assert_eq!(commit.end, d(4, 1));
    assert!(host.failures.is_empty());
    assert_eq!(host.store.roadmap().feature(id).unwrap().end_date, Some(d(4, 1)));
}

#[test]
fn cancelled_gesture_is_silent() {
    let window = PlanningWindow::for_year(2026);
    let (mut host, id) = setup();
    let mut drag = DragController::new();

    drag.begin(drag_start(&host, &window, DragMode::ResizeEnd), PointerSource::Mouse);
    drag.pointer_move(PRESS_X + 250.0, PointerSource::Mouse);
    let outcome = drag.cancel().unwrap();
    assert_eq!(outcome, GestureOutcome::Cancelled);
    assert!(dispatch(outcome, &window, &mut host).is_none());

    assert!(host.activated.is_empty());
    assert_eq!(host.store.roadmap().feature(id).unwrap().schedule(), Some((d(2, 1), d(4, 1))));
}

#[test]
fn commit_for_a_deleted_feature_is_reported_not_applied() {
    let window = PlanningWindow::for_year(2026);
    let (mut host, id) = setup();
    let mut drag = DragController::new();

    drag.begin(drag_start(&host, &window, DragMode::Move), PointerSource::Mouse);
    drag.pointer_move(PRESS_X + 80.0, PointerSource::Mouse);
    host.store.delete_feature(id).unwrap();

    let outcome = drag.pointer_up().unwrap();
    assert!(dispatch(outcome, &window, &mut host).is_some());
    assert_eq!(host.failures.len(), 1);
    assert!(host.failures[0].contains("not found"));
    assert!(host.store.roadmap().features.is_empty());
}
