use crate::app::RoadmapApp;
use crate::model::FeatureStatus;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Add Feature" dialog.
pub fn show_add_feature_dialog(app: &mut RoadmapApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Add Feature").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([theme::DIALOG_WIDTH, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            let roadmap = app.store.roadmap();
            let dept_label = roadmap
                .department(&app.new_feature.department_id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "Pick a department".to_string());
            let metric_label = app
                .new_feature
                .metric_id
                .and_then(|id| roadmap.metric(id))
                .map(|m| m.label().to_string())
                .unwrap_or_else(|| "Unlinked".to_string());

            egui::Grid::new("add_feature_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [220.0, 24.0],
                        egui::TextEdit::singleline(&mut app.new_feature.title).hint_text("Feature title..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Department").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_department")
                        .selected_text(dept_label)
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for dept in &roadmap.departments {
                                ui.selectable_value(&mut app.new_feature.department_id, dept.id.clone(), &dept.name);
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Metric").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_metric")
                        .selected_text(metric_label)
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut app.new_feature.metric_id, None, "Unlinked");
                            for metric in &roadmap.metrics {
                                ui.selectable_value(&mut app.new_feature.metric_id, Some(metric.id), metric.label());
                            }
                        });
                    ui.end_row();

                    ui.label(RichText::new("Status").color(theme::TEXT_SECONDARY));
                    egui::ComboBox::from_id_salt("dlg_status")
                        .selected_text(app.new_feature.status.label())
                        .width(220.0)
                        .show_ui(ui, |ui| {
                            for status in FeatureStatus::all() {
                                ui.selectable_value(&mut app.new_feature.status, *status, status.label());
                            }
                        });
                    ui.end_row();

                    ui.label("");
                    ui.checkbox(&mut app.new_feature.scheduled, "Scheduled");
                    ui.end_row();

                    if app.new_feature.scheduled {
                        ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                        ui.add(egui_extras::DatePickerButton::new(&mut app.new_feature.start).id_salt("dlg_dp_start"));
                        ui.end_row();

                        ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                        ui.add(egui_extras::DatePickerButton::new(&mut app.new_feature.end).id_salt("dlg_dp_end"));
                        ui.end_row();
                    }
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let create_btn = egui::Button::new(RichText::new("Create").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                let can_create = !app.new_feature.department_id.is_empty();
                if ui.add_enabled_ui(can_create, |ui| ui.add_sized([80.0, 28.0], create_btn)).inner.clicked() {
                    app.create_feature_from_dialog();
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_add_feature = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut RoadmapApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 170.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Roadmap Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION"))).color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Departmental roadmaps aligned");
                ui.label("to strategic metrics and OKRs.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "CSV Import Format" help dialog.
pub fn show_csv_help_dialog(app: &mut RoadmapApp, ctx: &Context) {
    let mut should_close = false;

    Window::new(RichText::new("CSV Import Format").strong().size(14.0))
        .resizable(true)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_size([560.0, 460.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                ui.label(RichText::new("Delimiters").strong());
                ui.label("The delimiter is auto-detected: comma (,), semicolon (;), or tab.");
                ui.add_space(8.0);

                ui.label(RichText::new("Columns").strong());
                ui.add_space(2.0);
                egui::Grid::new("csv_columns")
                    .num_columns(2)
                    .striped(true)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").underline());
                        ui.label(RichText::new("Accepted headers (case-insensitive)").underline());
                        ui.end_row();

                        for (column, headers) in [
                            ("Title *", "Title, Feature, Name, Feature Name, Label"),
                            ("Start Date *", "Start, Start Date, From, Begin"),
                            ("End Date *", "End, End Date, To, Finish, Due, Due Date"),
                            ("Department", "Department, Dept, Team, Owner"),
                            ("Status", "Status, Stage, State"),
                            ("Progress", "Progress, Complete, Percent, Done"),
                            ("Description", "Description, Notes, Details"),
                        ] {
                            ui.label(RichText::new(column).strong());
                            ui.label(headers);
                            ui.end_row();
                        }
                    });
                ui.add_space(8.0);

                ui.label(RichText::new("Supported Date Formats").strong());
                ui.add_space(2.0);
                for fmt in [
                    "YYYY-MM-DD   (e.g. 2026-06-15)",
                    "DD/MM/YYYY   (e.g. 15/06/2026)",
                    "MM/DD/YYYY   (e.g. 06/15/2026)",
                    "DD-MM-YYYY   (e.g. 15-06-2026)",
                    "DD.MM.YYYY   (e.g. 15.06.2026)",
                    "YYYY/MM/DD   (e.g. 2026/06/15)",
                ] {
                    ui.label(RichText::new(fmt).monospace().size(11.0));
                }
                ui.add_space(8.0);

                ui.label(RichText::new("Notes").strong());
                for note in [
                    "• Columns marked * are required; empty date cells import an unscheduled feature.",
                    "• Unknown departments are created from the names found in the file.",
                    "• Rows with no title or an unreadable date are skipped.",
                    "• Export writes the same layout, semicolon-delimited.",
                ] {
                    ui.label(RichText::new(note).small());
                }
                ui.add_space(10.0);

                ui.label(RichText::new("Example").strong());
                let example = "Title;Department;Start Date;End Date;Status;Progress\n\
                               Client Portal;Financial Advisory;2026-02-01;2026-04-30;In Development;40\n\
                               E-filing;Tax;01/05/2026;30/06/2026;Planning;0\n\
                               Advice Playbook;Group;;;Discovery;";
                egui::Frame::dark_canvas(ui.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut example.to_string())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .interactive(false),
                    );
                });
                ui.add_space(8.0);
            });

            ui.separator();
            ui.add_space(4.0);
            if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                should_close = true;
            }
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_csv_help = false;
    }
}
