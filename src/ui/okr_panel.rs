use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::{KeyResult, OkrStatus, Roadmap, StrategicMetric};
use crate::ui::theme;

/// Actions the OKR panel can request.
#[derive(Debug, Clone, PartialEq)]
pub enum OkrAction {
    None,
    Add,
    Update(KeyResult),
    Delete(Uuid),
    AddMetric,
    UpdateMetric(StrategicMetric),
    /// Record this week's check-in for a key result.
    CheckIn {
        key_result: Uuid,
        blockers: String,
        decision_required: String,
    },
}

/// Draft text of a key result's check-in form, kept in egui temp data.
#[derive(Debug, Clone, Default)]
struct CheckInDraft {
    blockers: String,
    decision_required: String,
}

fn section_header(ui: &mut Ui, title: &str, count: usize) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).strong().size(15.0));
        ui.label(RichText::new(format!("({count})")).size(11.0).color(theme::TEXT_DIM));
    });
}

fn optional_line(ui: &mut Ui, name: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
        ui.label(
            RichText::new(format!("{name}: {value}"))
                .size(9.5)
                .color(theme::TEXT_DIM),
        );
    }
}

fn status_badge(ui: &mut Ui, status: OkrStatus) {
    let color = theme::okr_status_color(status);
    egui::Frame {
        fill: color.gamma_multiply(0.25),
        rounding: egui::Rounding::same(8.0),
        inner_margin: egui::Margin::symmetric(6.0, 1.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, color),
        shadow: egui::epaint::Shadow::NONE,
    }
    .show(ui, |ui| {
        ui.label(RichText::new(status.label()).size(9.5).color(color).strong());
    });
}

/// Render strategic metrics and key results.
pub fn show_okr_panel(roadmap: &Roadmap, ui: &mut Ui) -> OkrAction {
    let mut action = OkrAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Strategic Metrics").strong().size(15.0));
        ui.label(
            RichText::new(format!("({})", roadmap.metrics.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let add = ui.add(
                egui::Button::new(RichText::new(egui_phosphor::regular::PLUS).size(11.0)).frame(false),
            );
            if add.on_hover_text("Add metric").clicked() {
                action = OkrAction::AddMetric;
            }
        });
    });
    ui.add_space(4.0);

    for (i, metric) in roadmap.metrics.iter().enumerate() {
        let colors = theme::metric_colors(Some(i));
        ui.horizontal(|ui| {
            let (dot, _) = ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
            ui.painter().circle_filled(dot.center(), 4.0, colors.progress);
            ui.label(RichText::new(metric.label()).size(12.0));
            ui.label(RichText::new(&metric.engine).size(10.0).color(theme::TEXT_DIM));
        });
        let goals = [
            ("Base", &metric.base_goal),
            ("Target", &metric.target_goal),
            ("Stretch", &metric.stretch_goal),
        ]
        .into_iter()
        .filter_map(|(name, goal)| goal.as_ref().map(|g| format!("{name}: {g}")))
        .collect::<Vec<_>>()
        .join(" · ");
        ui.label(RichText::new(&metric.metric).size(10.5).color(theme::TEXT_SECONDARY));
        if !goals.is_empty() {
            ui.label(RichText::new(goals).size(9.5).color(theme::TEXT_DIM));
        }
        ui.horizontal(|ui| {
            ui.label(RichText::new("Current").size(9.5).color(theme::TEXT_DIM));
            let mut current = metric.current_value.unwrap_or_default();
            if ui.add(egui::DragValue::new(&mut current).speed(0.1)).changed() && action == OkrAction::None {
                let mut edited = metric.clone();
                edited.current_value = Some(current);
                action = OkrAction::UpdateMetric(edited);
            }
        });
        ui.add_space(4.0);
    }

    ui.add_space(4.0);
    ui.separator();
    ui.add_space(2.0);

    section_header(ui, "5-Year Targets", roadmap.five_year_targets.len());
    ui.add_space(4.0);
    for target in roadmap.targets_by_pillar() {
        ui.label(RichText::new(&target.pillar).size(10.0).strong().color(theme::ACCENT));
        ui.label(RichText::new(&target.target).size(11.5));
        optional_line(ui, "Owner", &target.owner);
        optional_line(ui, "Now", &target.current_position);
        optional_line(ui, "Target", &target.target_value);
        ui.add_space(4.0);
    }

    ui.add_space(2.0);
    section_header(ui, "Annual Objectives", roadmap.annual_objectives.len());
    ui.add_space(4.0);
    for objective in roadmap.objectives_by_pillar() {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&objective.pillar).size(10.0).strong().color(theme::ACCENT));
            ui.label(RichText::new(&objective.objective).size(11.5));
        });
        optional_line(ui, "Owner", &objective.owner);
        optional_line(ui, "Linked target", &objective.linked_target);
        optional_line(ui, "Success metric", &objective.success_metric);
        ui.add_space(4.0);
    }

    ui.add_space(4.0);
    ui.separator();
    ui.add_space(2.0);

    ui.horizontal(|ui| {
        ui.label(RichText::new("Key Results").strong().size(15.0));
        ui.label(
            RichText::new(format!("({})", roadmap.key_results.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(
        RichText::new(format!("{}  Add Key Result", egui_phosphor::regular::PLUS))
            .color(Color32::WHITE)
            .size(12.0),
    )
    .fill(theme::ACCENT)
    .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 28.0], btn).clicked() {
        action = OkrAction::Add;
    }
    ui.add_space(6.0);

    for kr in &roadmap.key_results {
        let frame = egui::Frame {
            fill: theme::BG_DARK,
            rounding: egui::Rounding::same(4.0),
            inner_margin: egui::Margin::symmetric(8.0, 6.0),
            outer_margin: egui::Margin::ZERO,
            stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
            shadow: egui::epaint::Shadow::NONE,
        };
        frame.show(ui, |ui| {
            let mut edited = kr.clone();
            let mut changed = false;

            ui.horizontal(|ui| {
                status_badge(ui, kr.status);
                ui.add(egui::Label::new(RichText::new(&kr.key_result).size(12.0)).truncate());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let del = ui.add(
                        egui::Button::new(RichText::new(egui_phosphor::regular::X).size(10.0).color(theme::TEXT_DIM))
                            .frame(false),
                    );
                    if del.on_hover_text("Delete key result").clicked() {
                        action = OkrAction::Delete(kr.id);
                    }
                });
            });
            ui.label(
                RichText::new(format!("{} · {}", kr.pillar, kr.objective))
                    .size(9.5)
                    .color(theme::TEXT_DIM),
            );

            ui.add(
                egui::ProgressBar::new(kr.progress() as f32)
                    .desired_width(ui.available_width())
                    .fill(theme::okr_status_color(kr.status))
                    .rounding(egui::Rounding::same(3.0))
                    .text(format!("{} / {}", kr.current, kr.target)),
            );

            ui.horizontal(|ui| {
                ui.label(RichText::new("Current").size(10.0).color(theme::TEXT_DIM));
                changed |= ui.add(egui::DragValue::new(&mut edited.current).speed(0.5)).changed();
                ui.label(RichText::new("Confidence").size(10.0).color(theme::TEXT_DIM));
                changed |= ui.add(egui::DragValue::new(&mut edited.confidence).range(1..=10)).changed();
            });

            if kr.has_thresholds() {
                ui.label(
                    RichText::new(format!(
                        "Auto status · amber ≥ {} · green ≥ {}",
                        kr.threshold_amber.unwrap_or_default(),
                        kr.threshold_green.unwrap_or_default()
                    ))
                    .size(9.5)
                    .color(theme::TEXT_DIM),
                );
            } else {
                egui::ComboBox::from_id_salt(("kr_status", kr.id))
                    .selected_text(RichText::new(kr.status.label()).size(11.0))
                    .show_ui(ui, |ui| {
                        for status in OkrStatus::all() {
                            changed |= ui.selectable_value(&mut edited.status, *status, status.label()).changed();
                        }
                    });
            }

            let meta: Vec<&str> = [kr.owner.as_deref(), kr.quarter.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !meta.is_empty() {
                ui.label(RichText::new(meta.join(" · ")).size(9.5).color(theme::TEXT_DIM));
            }

            egui::CollapsingHeader::new(RichText::new("Weekly check-in").size(10.5))
                .id_salt(("kr_check_in", kr.id))
                .show(ui, |ui| {
                    let draft_id = egui::Id::new(("kr_check_in_draft", kr.id));
                    let mut draft: CheckInDraft = ui.ctx().data_mut(|d| d.get_temp(draft_id).unwrap_or_default());
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.blockers)
                            .hint_text("Blockers")
                            .desired_width(f32::INFINITY),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut draft.decision_required)
                            .hint_text("Decision required")
                            .desired_width(f32::INFINITY),
                    );
                    if ui.button("Record check-in").clicked() && action == OkrAction::None {
                        action = OkrAction::CheckIn {
                            key_result: kr.id,
                            blockers: std::mem::take(&mut draft.blockers),
                            decision_required: std::mem::take(&mut draft.decision_required),
                        };
                    }
                    ui.ctx().data_mut(|d| d.insert_temp(draft_id, draft));
                });

            if changed && action == OkrAction::None {
                action = OkrAction::Update(edited);
            }
        });
        ui.add_space(4.0);
    }

    ui.add_space(4.0);
    ui.separator();
    ui.add_space(2.0);
    section_header(ui, "Weekly Check-ins", roadmap.weekly_entries.len());
    ui.add_space(4.0);
    for entry in roadmap.weekly_entries_newest_first() {
        ui.horizontal(|ui| {
            ui.label(RichText::new(&entry.week).size(10.0).monospace().color(theme::TEXT_DIM));
            if let Some(status) = entry.status {
                status_badge(ui, status);
            }
            ui.add(egui::Label::new(RichText::new(&entry.key_result).size(11.0)).truncate());
        });
        if let Some(progress) = entry.progress {
            ui.label(
                RichText::new(format!("{:.0}% of target", progress * 100.0))
                    .size(9.5)
                    .color(theme::TEXT_SECONDARY),
            );
        }
        optional_line(ui, "Blockers", &entry.blockers);
        if entry.needs_decision() {
            optional_line(ui, "Decision required", &entry.decision_required);
        }
        ui.add_space(3.0);
    }

    action
}
