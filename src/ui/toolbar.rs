use crate::app::RoadmapApp;
use crate::timeline::Grouping;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut RoadmapApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Roadmap").clicked() {
                app.new_roadmap();
                ui.close_menu();
            }
            if ui.button("  Sample Roadmap").clicked() {
                app.load_sample();
                ui.close_menu();
            }
            if ui.button("  Open...").clicked() {
                app.open_roadmap();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Save          Ctrl+S").clicked() {
                app.save_roadmap();
                ui.close_menu();
            }
            if ui.button("  Save As...").clicked() {
                app.save_roadmap_as();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            let mut autosave = app.config.autosave;
            if ui.checkbox(&mut autosave, "Autosave").changed() {
                app.set_autosave(autosave);
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            ui.label(RichText::new("Group lanes").small().weak());
            for grouping in [Grouping::Metric, Grouping::Department] {
                if ui.radio(app.grouping == grouping, grouping.label()).clicked() {
                    app.set_grouping(grouping);
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.checkbox(&mut app.show_waterfall, "Delivery waterfall");
            ui.checkbox(&mut app.show_okr_panel, "Metrics & key results");
            ui.separator();
            ui.label(RichText::new("Planning year").small().weak());
            ui.horizontal(|ui| {
                if ui.button(egui_phosphor::regular::CARET_LEFT).clicked() {
                    app.set_planning_year(app.window.year() - 1);
                }
                ui.label(app.window.year().to_string());
                if ui.button(egui_phosphor::regular::CARET_RIGHT).clicked() {
                    app.set_planning_year(app.window.year() + 1);
                }
            });
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("CSV Import Format").clicked() {
                app.show_csv_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();
        if ui
            .button(format!("{}  Add Feature", egui_phosphor::regular::PLUS))
            .clicked()
        {
            app.show_add_feature = true;
        }

        // Right-aligned roadmap name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let unsaved = if app.store.path().is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.store.roadmap().name, unsaved))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
