use chrono::NaiveDate;
use egui::{Align2, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::model::{PlanningWindow, Roadmap};
use crate::timeline::lane::waterfall_rows;
use crate::ui::theme;

/// Read-only chronological overview of every scheduled feature.
/// Returns the feature whose row was clicked, if any.
pub fn show_waterfall(
    roadmap: &Roadmap,
    window: &PlanningWindow,
    today: NaiveDate,
    ui: &mut Ui,
) -> Option<Uuid> {
    let rows = waterfall_rows(roadmap, window, today);
    let mut clicked = None;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Delivery Waterfall").strong().size(14.0));
        ui.label(
            egui::RichText::new(format!("{} scheduled", rows.len()))
                .font(theme::font_sub())
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    if rows.is_empty() {
        ui.label(egui::RichText::new("No scheduled features").color(theme::TEXT_DIM));
        return None;
    }

    let full_width = ui.available_width();
    let track_width = (full_width - theme::LANE_LABEL_WIDTH).max(1.0);
    let today_pct = window.today_marker(today);

    for row in &rows {
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(full_width, theme::WATERFALL_ROW_HEIGHT),
            Sense::click(),
        );
        let painter = ui.painter();
        if response.hovered() {
            painter.rect_filled(rect, 0.0, theme::BG_SELECTED);
        }

        let label = format!("{} · {}", row.feature.title, row.department);
        painter
            .with_clip_rect(Rect::from_min_size(
                rect.min,
                Vec2::new(theme::LANE_LABEL_WIDTH - 8.0, rect.height()),
            ))
            .text(
                Pos2::new(rect.left() + 10.0, rect.center().y),
                Align2::LEFT_CENTER,
                label,
                theme::font_sub(),
                if row.active { theme::TEXT_PRIMARY } else { theme::TEXT_SECONDARY },
            );

        let track_left = rect.left() + theme::LANE_LABEL_WIDTH;
        let colors = theme::metric_colors(row.feature.metric_id.and_then(|id| roadmap.metric_index(id)));
        let bar = Rect::from_min_size(
            Pos2::new(
                track_left + (row.position.left / 100.0) as f32 * track_width,
                rect.top() + 4.0,
            ),
            Vec2::new((row.position.width / 100.0) as f32 * track_width, rect.height() - 8.0),
        );
        let stroke = if row.active {
            Stroke::new(1.5, colors.progress)
        } else {
            Stroke::new(1.0, colors.border)
        };
        painter.rect(bar, Rounding::same(3.0), colors.bg, stroke);

        if let Some(pct) = today_pct {
            let x = track_left + pct as f32 / 100.0 * track_width;
            painter.line_segment(
                [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                Stroke::new(1.0, theme::TODAY_LINE),
            );
        }

        let response = response.on_hover_text(match row.feature.schedule() {
            Some((start, end)) => format!(
                "{}\n{} → {}",
                row.feature.title,
                start.format("%d %b %Y"),
                end.format("%d %b %Y")
            ),
            None => row.feature.title.clone(),
        });
        if response.clicked() {
            clicked = Some(row.feature.id);
        }
    }

    clicked
}
