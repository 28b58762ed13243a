use chrono::NaiveDate;
use egui::{Align2, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::{Feature, PlanningWindow, Roadmap};
use crate::timeline::lane::{build_lanes, layout_lane, BarSlot, Grouping, LaneLayout};
use crate::timeline::{BarPosition, DragController, DragMode, DragStart, GestureOutcome, PointerSource};
use crate::ui::theme::{self, MetricColors};

/// What happened in the chart this frame.
#[derive(Debug, Default)]
pub struct ChartInteraction {
    /// A finished gesture, to be dispatched once rendering is done.
    pub outcome: Option<GestureOutcome>,
    pub grouping_changed: bool,
}

/// Render the lane-grouped Gantt chart.
pub fn show_gantt_chart(
    roadmap: &Roadmap,
    window: &PlanningWindow,
    grouping: &mut Grouping,
    drag: &mut DragController,
    selected: Option<Uuid>,
    today: NaiveDate,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(grouping.title()).strong().size(15.0));
            ui.label(
                egui::RichText::new(grouping.subtitle())
                    .font(theme::font_sub())
                    .color(theme::TEXT_DIM),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            for option in [Grouping::Department, Grouping::Metric] {
                if ui.selectable_value(grouping, option, option.label()).changed() {
                    interaction.grouping_changed = true;
                }
            }
        });
    });
    // Lane and slot indices change with the grouping.
    if interaction.grouping_changed {
        drag.cancel();
    }
    ui.add_space(6.0);

    let full_width = ui.available_width();
    let track_width = (full_width - theme::LANE_LABEL_WIDTH).max(1.0);

    draw_quarter_header(ui, window, full_width, track_width);

    let lanes = build_lanes(roadmap, *grouping);
    let source = pointer_source(ui);

    if lanes.is_empty() {
        ui.add_space(12.0);
        ui.label(egui::RichText::new(match grouping {
            Grouping::Metric => "No strategic metrics defined yet.",
            Grouping::Department => "No departments defined yet.",
        })
        .color(theme::TEXT_DIM));
    }

    for (lane_index, lane) in lanes.iter().enumerate() {
        let layout = layout_lane(lane_index, lane, window);
        let (lane_rect, _) = ui.allocate_exact_size(Vec2::new(full_width, layout.height), Sense::hover());
        let track = Rect::from_min_max(
            Pos2::new(lane_rect.left() + theme::LANE_LABEL_WIDTH, lane_rect.top()),
            lane_rect.max,
        );

        draw_lane_background(ui, lane_rect, track, window, today, &lane.title, &layout);

        for bar in &layout.bars {
            let outcome = show_bar(ui, roadmap, window, drag, bar, track, selected == Some(bar.feature.id), source);
            if outcome.is_some() {
                interaction.outcome = outcome;
            }
        }
    }

    // A gesture whose bar vanished (or whose release we never saw) cannot
    // finish normally.
    if drag.is_active() && interaction.outcome.is_none() {
        let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));
        let released = ui.input(|i| !i.pointer.any_down());
        if escape || released {
            interaction.outcome = drag.cancel();
        }
    }

    ui.add_space(8.0);
    draw_legend(ui, roadmap);

    interaction
}

fn pointer_source(ui: &Ui) -> PointerSource {
    match ui.input(|i| i.multi_touch()) {
        Some(touch) => PointerSource::Touch {
            touches: touch.num_touches,
        },
        None if ui.input(|i| i.any_touches()) => PointerSource::Touch { touches: 1 },
        None => PointerSource::Mouse,
    }
}

/// Interaction id of a bar body. A feature appears at most once in the chart.
pub fn bar_id(feature_id: Uuid) -> egui::Id {
    egui::Id::new(("bar", feature_id))
}

fn bar_rect(track: Rect, position: BarPosition, top: f32) -> Rect {
    let x = track.left() + (position.left / 100.0) as f32 * track.width();
    let w = (position.width / 100.0) as f32 * track.width();
    Rect::from_min_size(Pos2::new(x, track.top() + top), Vec2::new(w, theme::BAR_HEIGHT))
}

#[allow(clippy::too_many_arguments)]
fn show_bar(
    ui: &mut Ui,
    roadmap: &Roadmap,
    window: &PlanningWindow,
    drag: &mut DragController,
    bar: &BarSlot<'_>,
    track: Rect,
    is_selected: bool,
    source: PointerSource,
) -> Option<GestureOutcome> {
    let feature = bar.feature;
    let resting = bar_rect(track, bar.position, bar.top);

    let body = ui.interact(resting, bar_id(feature.id), Sense::click_and_drag());
    let left = ui.interact(
        Rect::from_min_size(resting.min, Vec2::new(theme::HANDLE_WIDTH, resting.height())),
        egui::Id::new(("bar-start", feature.id)),
        Sense::drag(),
    );
    let right = ui.interact(
        Rect::from_min_size(
            Pos2::new(resting.right() - theme::HANDLE_WIDTH, resting.top()),
            Vec2::new(theme::HANDLE_WIDTH, resting.height()),
        ),
        egui::Id::new(("bar-end", feature.id)),
        Sense::drag(),
    );

    // The session starts on press, anchored at the press origin, and every
    // pointer position is fed through the controller. egui's own click
    // distance is wider than ours, so its drag/click split is not used.
    if !drag.is_active() && !drag.click_suppressed() {
        let pressed = [
            (&left, DragMode::ResizeStart),
            (&right, DragMode::ResizeEnd),
            (&body, DragMode::Move),
        ]
        .into_iter()
        .find(|(response, _)| response.is_pointer_button_down_on());
        if let Some((_, mode)) = pressed {
            if let Some(origin) = ui.input(|i| i.pointer.press_origin()) {
                drag.begin(
                    DragStart {
                        key: bar.key,
                        item_id: feature.id,
                        mode,
                        pointer_x: origin.x,
                        container_width: track.width(),
                        original: bar.position,
                    },
                    source,
                );
            }
        }
    }

    let mut outcome = None;
    let active_mode = drag.session().filter(|s| s.key == bar.key).map(|s| s.mode);
    if let Some(mode) = active_mode {
        let (pointer_x, released) = ui.input(|i| {
            (i.pointer.interact_pos().map(|p| p.x), i.pointer.primary_released())
        });
        if let Some(x) = pointer_x {
            drag.pointer_move(x, source);
        }
        if released {
            outcome = drag.pointer_up();
        } else if drag.session().is_some_and(|s| s.has_moved) {
            ui.ctx().set_cursor_icon(match mode {
                DragMode::Move => egui::CursorIcon::Grabbing,
                _ => egui::CursorIcon::ResizeHorizontal,
            });
        }
    }

    if left.hovered() || right.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    } else if body.hovered() && !drag.is_active() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    let preview = drag.preview_for(bar.key);
    let position = preview.unwrap_or(bar.position);
    let rect = bar_rect(track, position, bar.top);
    let colors = theme::metric_colors(feature.metric_id.and_then(|id| roadmap.metric_index(id)));
    let hovered = body.hovered() || left.hovered() || right.hovered();
    draw_bar(ui, feature, rect, colors, is_selected, hovered || preview.is_some());

    if hovered || preview.is_some() {
        let (start_date, end_date) = match preview {
            Some(p) => (window.date_of(p.left), window.date_of(p.right())),
            None => feature.schedule().unwrap_or((window.start(), window.start())),
        };
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("bar-tip", feature.id)),
            |ui| {
                ui.strong(&feature.title);
                ui.label(format!(
                    "{} → {}",
                    start_date.format("%d %b %Y"),
                    end_date.format("%d %b %Y"),
                ));
                ui.label(format!(
                    "{} · {} · {}%",
                    roadmap.department_name(feature),
                    feature.status.label(),
                    feature.progress
                ));
            },
        );
    }

    outcome
}

fn draw_bar(ui: &Ui, feature: &Feature, rect: Rect, colors: MetricColors, is_selected: bool, show_handles: bool) {
    let painter = ui.painter();
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(rect.translate(Vec2::new(1.0, 2.0)), rounding, egui::Color32::from_black_alpha(35));
    painter.rect(rect, rounding, colors.bg, Stroke::new(1.0, colors.border));

    if feature.progress > 0 {
        let progress = Rect::from_min_size(
            Pos2::new(rect.left(), rect.bottom() - 4.0),
            Vec2::new(rect.width() * f32::from(feature.progress) / 100.0, 4.0),
        );
        painter.rect_filled(
            progress,
            Rounding {
                nw: 0.0,
                ne: 0.0,
                sw: theme::BAR_ROUNDING,
                se: 0.0,
            },
            colors.progress,
        );
    }

    if is_selected {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if rect.width() > 24.0 {
        let galley = painter.layout_no_wrap(feature.title.clone(), theme::font_bar(), colors.text);
        let text_y = rect.top() + (rect.height() - 4.0 - galley.size().y) / 2.0;
        painter
            .with_clip_rect(rect.shrink(2.0))
            .galley(Pos2::new(rect.left() + 8.0, text_y), galley, colors.text);
    }

    if show_handles {
        let handle_h = rect.height() * 0.5;
        let y = rect.center().y - handle_h / 2.0;
        for x in [rect.left() + 2.0, rect.right() - 5.0] {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x, y), Vec2::new(3.0, handle_h)),
                Rounding::same(1.5),
                colors.progress,
            );
        }
    }
}

fn draw_quarter_header(ui: &mut Ui, window: &PlanningWindow, full_width: f32, track_width: f32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(full_width, theme::HEADER_HEIGHT), Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);

    let left = rect.left() + theme::LANE_LABEL_WIDTH;
    painter.text(
        Pos2::new(rect.left() + 10.0, rect.center().y),
        Align2::LEFT_CENTER,
        "Lane",
        theme::font_header(),
        theme::TEXT_SECONDARY,
    );
    for quarter in window.quarters() {
        let x0 = left + window.position_of(Some(quarter.start)) as f32 / 100.0 * track_width;
        let x1 = left + window.position_of(Some(quarter.end)) as f32 / 100.0 * track_width;
        painter.line_segment(
            [Pos2::new(x0, rect.top()), Pos2::new(x0, rect.bottom())],
            Stroke::new(1.0, theme::QUARTER_LINE),
        );
        painter.text(
            Pos2::new((x0 + x1) / 2.0, rect.center().y),
            Align2::CENTER_CENTER,
            &quarter.label,
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
    }
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_lane_background(
    ui: &Ui,
    lane_rect: Rect,
    track: Rect,
    window: &PlanningWindow,
    today: NaiveDate,
    title: &str,
    layout: &LaneLayout<'_>,
) {
    let painter = ui.painter();
    painter.rect_filled(lane_rect, 0.0, theme::BG_DARK);
    painter.rect_filled(
        Rect::from_min_max(lane_rect.min, Pos2::new(track.left(), lane_rect.bottom())),
        0.0,
        theme::BG_LANE_LABEL,
    );

    let label = painter.layout(
        title.to_string(),
        theme::font_header(),
        theme::TEXT_PRIMARY,
        theme::LANE_LABEL_WIDTH - 20.0,
    );
    let label_height = label.size().y;
    painter.galley(Pos2::new(lane_rect.left() + 10.0, lane_rect.top() + 8.0), label, theme::TEXT_PRIMARY);
    painter.text(
        Pos2::new(lane_rect.left() + 10.0, lane_rect.top() + 12.0 + label_height),
        Align2::LEFT_TOP,
        lane_count_label(layout.total_items),
        theme::font_small(),
        theme::TEXT_DIM,
    );

    for month in window.month_starts() {
        let x = track.left() + window.position_of(Some(month)) as f32 / 100.0 * track.width();
        painter.line_segment(
            [Pos2::new(x, track.top()), Pos2::new(x, track.bottom())],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }

    if let Some(pct) = window.today_marker(today) {
        let x = track.left() + pct as f32 / 100.0 * track.width();
        painter.line_segment(
            [Pos2::new(x, track.top()), Pos2::new(x, track.bottom())],
            Stroke::new(1.5, theme::TODAY_LINE),
        );
    }

    if layout.bars.is_empty() {
        painter.text(
            track.center(),
            Align2::CENTER_CENTER,
            "No active features",
            theme::font_sub(),
            theme::TEXT_DIM,
        );
    }

    painter.line_segment(
        [lane_rect.left_bottom(), lane_rect.right_bottom()],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );
}

/// Item count shown under a lane title. Counts undrawable items too.
fn lane_count_label(total_items: usize) -> String {
    match total_items {
        1 => "1 item".to_string(),
        n => format!("{n} items"),
    }
}

fn draw_legend(ui: &mut Ui, roadmap: &Roadmap) {
    ui.horizontal_wrapped(|ui| {
        let swatch = |ui: &mut Ui, colors: MetricColors, label: &str| {
            let (rect, _) = ui.allocate_exact_size(Vec2::new(12.0, 12.0), Sense::hover());
            ui.painter()
                .rect(rect, Rounding::same(3.0), colors.bg, Stroke::new(1.0, colors.progress));
            ui.label(egui::RichText::new(label).font(theme::font_sub()).color(theme::TEXT_SECONDARY));
            ui.add_space(8.0);
        };
        for (i, metric) in roadmap.metrics.iter().enumerate() {
            swatch(ui, theme::metric_colors(Some(i)), metric.label());
        }
        swatch(ui, theme::UNLINKED, "Unlinked");
        ui.label(
            egui::RichText::new("│ Today")
                .font(theme::font_sub())
                .color(theme::TODAY_LINE),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Department;
    use egui::{Event, PointerButton, RawInput};

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    /// Runs the chart in a headless egui context, one frame per call.
    struct Harness {
        ctx: egui::Context,
        roadmap: Roadmap,
        window: PlanningWindow,
        grouping: Grouping,
        drag: DragController,
        frame: u32,
    }

    impl Harness {
        fn new() -> (Self, Uuid) {
            let mut roadmap = Roadmap::new("Chart");
            roadmap.departments = vec![Department::new("fa", "Financial Advisory")];
            let feature = Feature::new("fa", "Client Portal").with_schedule(d(2, 1), d(11, 30));
            let id = feature.id;
            roadmap.features = vec![feature];
            let harness = Self {
                ctx: egui::Context::default(),
                roadmap,
                window: PlanningWindow::for_year(2026),
                grouping: Grouping::Department,
                drag: DragController::new(),
                frame: 0,
            };
            (harness, id)
        }

        fn step(&mut self, events: Vec<Event>) -> Option<GestureOutcome> {
            let input = RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(1200.0, 800.0))),
                time: Some(f64::from(self.frame) / 60.0),
                events,
                ..Default::default()
            };
            self.frame += 1;
            self.drag.next_frame();

            let Self { ctx, roadmap, window, grouping, drag, .. } = self;
            let mut outcome = None;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let interaction = show_gantt_chart(roadmap, window, grouping, drag, None, d(6, 1), ui);
                    if interaction.outcome.is_some() {
                        outcome = interaction.outcome;
                    }
                });
            });
            outcome
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    /// Press on the middle of the bar, move `dx` pixels right, release.
    fn gesture(dx: f32) -> (Vec<GestureOutcome>, BarPosition) {
        let (mut harness, id) = Harness::new();
        assert!(harness.step(Vec::new()).is_none());
        let rect = harness.ctx.read_response(bar_id(id)).expect("bar is drawn").rect;
        let original = {
            let lanes = build_lanes(&harness.roadmap, Grouping::Department);
            layout_lane(0, &lanes[0], &harness.window).bars[0].position
        };

        let press = rect.center();
        let release = press + Vec2::new(dx, 0.0);
        let mut outcomes = Vec::new();
        outcomes.extend(harness.step(vec![Event::PointerMoved(press)]));
        outcomes.extend(harness.step(vec![button(press, true)]));
        outcomes.extend(harness.step(vec![Event::PointerMoved(release)]));
        outcomes.extend(harness.step(vec![button(release, false)]));
        outcomes.extend(harness.step(Vec::new()));
        assert!(!harness.drag.is_active());
        (outcomes, original)
    }

    #[test]
    fn test_press_and_release_in_place_activates() {
        let (outcomes, _) = gesture(0.0);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], GestureOutcome::Activate { .. }));
    }

    #[test]
    fn test_movement_within_threshold_activates() {
        let (outcomes, _) = gesture(2.0);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], GestureOutcome::Activate { .. }));
    }

    #[test]
    fn test_five_pixel_move_commits() {
        let (outcomes, original) = gesture(5.0);
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            GestureOutcome::Commit { position, .. } => {
                assert!(position.left > original.left);
                assert!((position.width - original.width).abs() < 1e-9);
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn test_long_move_commits() {
        let (outcomes, original) = gesture(40.0);
        assert_eq!(outcomes.len(), 1);
        assert!(matches!(
            &outcomes[0],
            GestureOutcome::Commit { position, .. } if position.left > original.left
        ));
    }

    #[test]
    fn test_lane_count_label() {
        assert_eq!(lane_count_label(0), "0 items");
        assert_eq!(lane_count_label(1), "1 item");
        assert_eq!(lane_count_label(7), "7 items");
    }
}
