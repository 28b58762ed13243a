use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::drag::{BarPosition, ItemKey};
use crate::model::timeline::MIN_WATERFALL_WIDTH_PCT;
use crate::model::{Feature, PlanningWindow, Roadmap};

/// Vertical distance between stacked bars in a lane.
pub const ROW_PITCH: f32 = 34.0;
/// Offset of the first bar from the top of the lane.
pub const BAR_TOP_OFFSET: f32 = 6.0;
/// Extra space below the last bar.
pub const LANE_PADDING: f32 = 12.0;
pub const MIN_LANE_HEIGHT: f32 = 64.0;

/// How features are grouped into lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    #[default]
    Metric,
    Department,
}

impl Grouping {
    pub fn label(&self) -> &'static str {
        match self {
            Grouping::Metric => "By Metric",
            Grouping::Department => "By Department",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Grouping::Metric => "Strategic Alignment",
            Grouping::Department => "Department Execution",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Grouping::Metric => {
                "Features grouped by strategic metric · drag to move, resize edges to adjust duration"
            }
            Grouping::Department => {
                "Features grouped by department · drag to move, resize edges to adjust duration"
            }
        }
    }
}

/// A horizontal group of features.
#[derive(Debug, Clone)]
pub struct Lane<'a> {
    pub id: String,
    pub title: String,
    pub items: Vec<&'a Feature>,
}

impl<'a> Lane<'a> {
    /// Items that can be drawn as bars, in input order.
    pub fn drawable(&self) -> impl Iterator<Item = &'a Feature> + '_ {
        self.items.iter().copied().filter(|f| f.has_schedule())
    }
}

/// One lane per strategic metric, holding the features linked to it.
/// Unlinked features do not appear in this grouping.
pub fn lanes_by_metric(roadmap: &Roadmap) -> Vec<Lane<'_>> {
    roadmap
        .metrics
        .iter()
        .map(|metric| Lane {
            id: metric.id.to_string(),
            title: metric.label().to_string(),
            items: roadmap
                .features
                .iter()
                .filter(|f| f.metric_id == Some(metric.id))
                .collect(),
        })
        .collect()
}

/// One lane per department, in stored order.
pub fn lanes_by_department(roadmap: &Roadmap) -> Vec<Lane<'_>> {
    roadmap
        .departments
        .iter()
        .map(|dept| Lane {
            id: dept.id.clone(),
            title: dept.name.clone(),
            items: roadmap
                .features
                .iter()
                .filter(|f| f.department_id == dept.id)
                .collect(),
        })
        .collect()
}

pub fn build_lanes(roadmap: &Roadmap, grouping: Grouping) -> Vec<Lane<'_>> {
    match grouping {
        Grouping::Metric => lanes_by_metric(roadmap),
        Grouping::Department => lanes_by_department(roadmap),
    }
}

/// A bar placed in a lane.
#[derive(Debug, Clone)]
pub struct BarSlot<'a> {
    pub key: ItemKey,
    pub feature: &'a Feature,
    pub position: BarPosition,
    /// Offset from the lane top in pixels.
    pub top: f32,
}

#[derive(Debug, Clone)]
pub struct LaneLayout<'a> {
    pub bars: Vec<BarSlot<'a>>,
    pub height: f32,
    /// All items in the lane, including ones without dates.
    pub total_items: usize,
}

/// Place every drawable item of a lane on its own row.
pub fn layout_lane<'a>(lane_index: usize, lane: &Lane<'a>, window: &PlanningWindow) -> LaneLayout<'a> {
    let bars: Vec<BarSlot<'a>> = lane
        .drawable()
        .enumerate()
        .map(|(slot, feature)| BarSlot {
            key: ItemKey::new(lane_index, slot),
            feature,
            position: BarPosition::new(
                window.position_of(feature.start_date),
                window.width_of(feature.start_date, feature.end_date),
            ),
            top: slot as f32 * ROW_PITCH + BAR_TOP_OFFSET,
        })
        .collect();
    let height = (bars.len() as f32 * ROW_PITCH + LANE_PADDING).max(MIN_LANE_HEIGHT);
    LaneLayout {
        bars,
        height,
        total_items: lane.items.len(),
    }
}

/// A row of the chronological overview.
#[derive(Debug, Clone)]
pub struct WaterfallRow<'a> {
    pub feature: &'a Feature,
    pub department: &'a str,
    pub position: BarPosition,
    pub active: bool,
}

/// All scheduled features sorted by start date, then end date.
pub fn waterfall_rows<'a>(
    roadmap: &'a Roadmap,
    window: &PlanningWindow,
    today: NaiveDate,
) -> Vec<WaterfallRow<'a>> {
    let mut scheduled: Vec<&Feature> = roadmap.features.iter().filter(|f| f.has_schedule()).collect();
    scheduled.sort_by_key(|f| (f.start_date, f.end_date));
    scheduled
        .into_iter()
        .map(|feature| WaterfallRow {
            feature,
            department: roadmap.department_name(feature),
            position: BarPosition::new(
                window.position_of(feature.start_date),
                window.width_with_floor(feature.start_date, feature.end_date, MIN_WATERFALL_WIDTH_PCT),
            ),
            active: feature.is_active_on(today),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, StrategicMetric};
    use pretty_assertions::assert_eq;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    fn roadmap() -> Roadmap {
        let mut roadmap = Roadmap::new("Test");
        let metric = StrategicMetric::new("Growth", "Acquisition", "New clients");
        roadmap.departments = vec![Department::new("tax", "Tax"), Department::new("fa", "Advisory")];
        roadmap.features = vec![
            Feature::new("tax", "Late").with_schedule(d(6, 1), d(7, 1)).with_metric(metric.id),
            Feature::new("tax", "Undated").with_metric(metric.id),
            Feature::new("fa", "Early").with_schedule(d(2, 1), d(3, 1)),
            Feature::new("tax", "Earliest").with_schedule(d(1, 5), d(1, 20)),
        ];
        roadmap.metrics = vec![metric];
        roadmap
    }

    #[test]
    fn test_department_lanes_keep_input_order() {
        let roadmap = roadmap();
        let lanes = lanes_by_department(&roadmap);
        let titles: Vec<_> = lanes.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Tax", "Advisory"]);
        let tax: Vec<_> = lanes[0].items.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(tax, ["Late", "Undated", "Earliest"]);
    }

    #[test]
    fn test_metric_lanes_skip_unlinked_features() {
        let roadmap = roadmap();
        let lanes = build_lanes(&roadmap, Grouping::Metric);
        assert_eq!(lanes.len(), 1);
        assert_eq!(lanes[0].id, roadmap.metrics[0].id.to_string());
        assert_eq!(lanes[0].items.len(), 2);
    }

    #[test]
    fn test_layout_filters_undated_and_stacks_in_order() {
        let roadmap = roadmap();
        let window = PlanningWindow::default();
        let lanes = lanes_by_department(&roadmap);
        let layout = layout_lane(0, &lanes[0], &window);

        let titles: Vec<_> = layout.bars.iter().map(|b| b.feature.title.as_str()).collect();
        assert_eq!(titles, ["Late", "Earliest"]);
        assert_eq!(layout.bars[0].key, ItemKey::new(0, 0));
        assert_eq!(layout.bars[1].key, ItemKey::new(0, 1));
        assert_eq!(layout.bars[0].top, 6.0);
        assert_eq!(layout.bars[1].top, 40.0);
        assert_eq!(layout.total_items, 3);
        assert_eq!(layout.height, 2.0 * 34.0 + 12.0);

        let single = layout_lane(1, &lanes[1], &window);
        assert_eq!(single.bars[0].key, ItemKey::new(1, 0));
        assert_eq!(single.height, MIN_LANE_HEIGHT);
    }

    #[test]
    fn test_lane_height_grows_with_items() {
        let mut roadmap = Roadmap::new("Tall");
        roadmap.departments = vec![Department::new("ops", "Ops")];
        roadmap.features = (0..5)
            .map(|i| Feature::new("ops", format!("F{i}")).with_schedule(d(3, 1), d(3, 2)))
            .collect();
        let lanes = lanes_by_department(&roadmap);
        let layout = layout_lane(0, &lanes[0], &PlanningWindow::default());
        assert_eq!(layout.height, 5.0 * 34.0 + 12.0);
        assert!(layout.bars.iter().all(|b| b.position.width == 1.0));
    }

    #[test]
    fn test_waterfall_sorts_chronologically() {
        let roadmap = roadmap();
        let rows = waterfall_rows(&roadmap, &PlanningWindow::default(), d(2, 15));
        let titles: Vec<_> = rows.iter().map(|r| r.feature.title.as_str()).collect();
        assert_eq!(titles, ["Earliest", "Early", "Late"]);
        assert_eq!(rows[1].department, "Advisory");
        assert!(rows[1].active);
        assert!(!rows[0].active);
    }
}
