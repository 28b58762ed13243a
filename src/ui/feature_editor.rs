use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{Feature, FeatureStatus, Roadmap};
use crate::ui::theme;

/// Actions the editor can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    None,
    Save,
    Delete(Uuid),
    Close,
}

fn field_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

/// Render the side-panel editor for a draft copy of the selected feature.
pub fn show_feature_editor(draft: &mut Feature, roadmap: &Roadmap, ui: &mut Ui) -> EditorAction {
    let mut action = EditorAction::None;

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Edit Feature").strong().size(13.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close = ui.add(
                egui::Button::new(RichText::new(egui_phosphor::regular::X).size(11.0).color(theme::TEXT_DIM))
                    .frame(false),
            );
            if close.on_hover_text("Close editor").clicked() {
                action = EditorAction::Close;
            }
        });
    });
    ui.add_space(4.0);

    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(5.0),
        inner_margin: egui::Margin::same(10.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;
        ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;

        field_label(ui, "Title");
        ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut draft.title).font(egui::FontId::proportional(12.0)),
        );

        field_label(ui, "Department");
        let dept_label = roadmap.department_name(draft).to_string();
        egui::ComboBox::from_id_salt("feature_department")
            .selected_text(RichText::new(dept_label).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for dept in &roadmap.departments {
                    ui.selectable_value(&mut draft.department_id, dept.id.clone(), &dept.name);
                }
            });

        field_label(ui, "Status");
        egui::ComboBox::from_id_salt("feature_status")
            .selected_text(RichText::new(draft.status.label()).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for status in FeatureStatus::all() {
                    ui.selectable_value(&mut draft.status, *status, status.label());
                }
            });

        field_label(ui, "Strategic Metric");
        let metric_label = draft
            .metric_id
            .and_then(|id| roadmap.metric(id))
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| "Unlinked".to_string());
        egui::ComboBox::from_id_salt("feature_metric")
            .selected_text(RichText::new(metric_label).size(11.0))
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut draft.metric_id, None, "Unlinked");
                for metric in &roadmap.metrics {
                    ui.selectable_value(&mut draft.metric_id, Some(metric.id), metric.label());
                }
            });

        // ── Schedule ──────────────────────────────────────────────────
        let mut scheduled = draft.has_schedule();
        if ui.checkbox(&mut scheduled, "Scheduled").changed() {
            if scheduled {
                let today = chrono::Local::now().date_naive();
                let start = draft.start_date.unwrap_or(today);
                draft.start_date = Some(start);
                draft.end_date = Some(draft.end_date.unwrap_or(start + chrono::Duration::days(30)).max(start));
            } else {
                draft.start_date = None;
                draft.end_date = None;
            }
        }
        if let (Some(mut start), Some(mut end)) = (draft.start_date, draft.end_date) {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    field_label(ui, "Start");
                    if ui
                        .add(egui_extras::DatePickerButton::new(&mut start).id_salt("feature_dp_start"))
                        .changed()
                        && start > end
                    {
                        end = start;
                    }
                });
                ui.add_space(8.0);
                ui.vertical(|ui| {
                    field_label(ui, "End");
                    if ui
                        .add(egui_extras::DatePickerButton::new(&mut end).id_salt("feature_dp_end"))
                        .changed()
                        && end < start
                    {
                        start = end;
                    }
                });
            });
            draft.start_date = Some(start);
            draft.end_date = Some(end);
        }

        field_label(ui, "Progress");
        ui.add_sized(
            [ui.available_width(), 20.0],
            egui::Slider::new(&mut draft.progress, 0..=100).suffix("%"),
        );

        field_label(ui, "Description");
        ui.add_sized(
            [ui.available_width(), 60.0],
            egui::TextEdit::multiline(&mut draft.description)
                .font(egui::FontId::proportional(11.0))
                .hint_text("What does this feature deliver?"),
        );

        field_label(ui, "WhatsApp Group");
        let mut whatsapp = draft.whatsapp.clone().unwrap_or_default();
        if ui
            .add_sized(
                [ui.available_width(), 22.0],
                egui::TextEdit::singleline(&mut whatsapp).hint_text("https://chat.whatsapp.com/..."),
            )
            .changed()
        {
            draft.whatsapp = Some(whatsapp.trim().to_string()).filter(|s| !s.is_empty());
        }

        show_docs(draft, ui);

        ui.add_space(4.0);
        ui.separator();
        ui.horizontal(|ui| {
            let save = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([80.0, 26.0], save).clicked() {
                action = EditorAction::Save;
            }
            let delete = egui::Button::new(
                RichText::new(format!("{}  Delete", egui_phosphor::regular::TRASH)).color(theme::DANGER),
            );
            if ui.add_sized([90.0, 26.0], delete).clicked() {
                action = EditorAction::Delete(draft.id);
            }
        });
    });

    action
}

fn show_docs(draft: &mut Feature, ui: &mut Ui) {
    field_label(ui, "Documents");
    let mut remove = None;
    for (i, doc) in draft.docs.iter().enumerate() {
        ui.horizontal(|ui| {
            let link = ui.add(egui::Label::new(RichText::new(doc).size(11.0).color(theme::ACCENT)).truncate().sense(egui::Sense::click()));
            if link.on_hover_text("Open").clicked() {
                if let Err(e) = open::that(doc) {
                    log::warn!("Could not open document {}: {}", doc, e);
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del = ui.add(
                    egui::Button::new(RichText::new(egui_phosphor::regular::X).size(9.0).color(theme::TEXT_DIM))
                        .frame(false),
                );
                if del.on_hover_text("Remove document").clicked() {
                    remove = Some(i);
                }
            });
        });
    }
    if let Some(i) = remove {
        draft.docs.remove(i);
    }

    let input_id = egui::Id::new(("doc-input", draft.id));
    let mut input: String = ui.ctx().data_mut(|d| d.get_temp(input_id).unwrap_or_default());
    ui.horizontal(|ui| {
        let width = (ui.available_width() - 36.0).max(60.0);
        ui.add_sized([width, 22.0], egui::TextEdit::singleline(&mut input).hint_text("Link or path"));
        if ui.button(egui_phosphor::regular::PLUS).clicked() && !input.trim().is_empty() {
            draft.docs.push(input.trim().to_string());
            input.clear();
        }
    });
    ui.ctx().data_mut(|d| d.insert_temp(input_id, input));
}
