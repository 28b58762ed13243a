use chrono::NaiveDate;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::model::{week_label, Feature, FeatureStatus, KeyResult, PlanningWindow, Roadmap, StrategicMetric};
use crate::store::RoadmapStore;
use crate::timeline::{dispatch, DragController, Grouping, TimelineHost};
use crate::ui;

/// Fields of the "Add Feature" dialog.
#[derive(Debug, Clone)]
pub struct NewFeatureDraft {
    pub title: String,
    pub department_id: String,
    pub metric_id: Option<Uuid>,
    pub status: FeatureStatus,
    pub scheduled: bool,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl NewFeatureDraft {
    fn new(roadmap: &Roadmap) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            title: String::new(),
            department_id: roadmap.departments.first().map(|d| d.id.clone()).unwrap_or_default(),
            metric_id: None,
            status: FeatureStatus::default(),
            scheduled: true,
            start: today,
            end: today + chrono::Duration::days(30),
        }
    }
}

/// Main application state.
pub struct RoadmapApp {
    pub store: RoadmapStore,
    pub window: PlanningWindow,
    pub config: AppConfig,
    pub grouping: Grouping,
    pub drag: DragController,
    pub selected_feature: Option<Uuid>,
    /// Working copy shown in the feature editor; applied on save.
    pub editor_draft: Option<Feature>,

    // Dialog / panel state
    pub show_add_feature: bool,
    pub show_about: bool,
    pub show_csv_help: bool,
    pub show_waterfall: bool,
    pub show_okr_panel: bool,
    pub new_feature: NewFeatureDraft,

    pub status_message: String,
}

impl RoadmapApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let mut status_message = "Ready".to_string();
        let store = match config.last_file.as_deref().filter(|p| p.exists()) {
            Some(path) => match RoadmapStore::open(path, config.autosave) {
                Ok(store) => {
                    status_message = format!("Opened {}", path.display());
                    store
                }
                Err(e) => {
                    log::error!("Could not reopen {}: {}", path.display(), e);
                    status_message = format!("Could not reopen last roadmap: {}", e);
                    RoadmapStore::new(Roadmap::sample(config.planning_year))
                }
            },
            None => RoadmapStore::new(Roadmap::sample(config.planning_year)),
        };

        let new_feature = NewFeatureDraft::new(store.roadmap());
        Self {
            window: PlanningWindow::for_year(config.planning_year),
            grouping: config.default_grouping,
            store,
            config,
            drag: DragController::new(),
            selected_feature: None,
            editor_draft: None,
            show_add_feature: false,
            show_about: false,
            show_csv_help: false,
            show_waterfall: true,
            show_okr_panel: true,
            new_feature,
            status_message,
        }
    }

    // --- File operations ---

    /// Swap in a different document. Any in-flight drag refers to bars that
    /// no longer exist, so it is dropped.
    fn replace_roadmap(&mut self, roadmap: Roadmap, path: Option<PathBuf>) {
        self.drag.cancel();
        self.selected_feature = None;
        self.editor_draft = None;
        self.new_feature = NewFeatureDraft::new(&roadmap);
        self.store.replace(roadmap, path.clone());
        self.store.set_autosave(self.config.autosave);
        self.config.last_file = path;
        self.config.save();
    }

    pub fn new_roadmap(&mut self) {
        self.replace_roadmap(Roadmap::default(), None);
        self.status_message = "New roadmap created".to_string();
    }

    pub fn load_sample(&mut self) {
        self.replace_roadmap(Roadmap::sample(self.window.year()), None);
        self.status_message = "Sample roadmap loaded".to_string();
    }

    pub fn open_roadmap(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Roadmap", &["roadmap.json", "json"])
            .pick_file()
        {
            match crate::io::load_roadmap(&path) {
                Ok(roadmap) => {
                    log::info!("Opened roadmap from {}", path.display());
                    self.replace_roadmap(roadmap, Some(path));
                    self.status_message = "Roadmap loaded".to_string();
                }
                Err(e) => {
                    log::error!("Failed to open {}: {}", path.display(), e);
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_roadmap(&mut self) {
        if self.store.path().is_none() {
            self.save_roadmap_as();
            return;
        }
        match self.store.save() {
            Ok(path) => self.status_message = format!("Saved to {}", path.display()),
            Err(e) => {
                log::error!("Save failed: {}", e);
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    pub fn save_roadmap_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Roadmap", &["roadmap.json", "json"])
            .set_file_name(format!("{}.roadmap.json", self.store.roadmap().name))
            .save_file()
        {
            match self.store.save_as(&path) {
                Ok(()) => {
                    self.store.set_autosave(self.config.autosave);
                    self.config.last_file = Some(path);
                    self.config.save();
                    self.status_message = "Roadmap saved".to_string();
                }
                Err(e) => {
                    log::error!("Save failed: {}", e);
                    self.status_message = format!("Error saving: {}", e);
                }
            }
        }
    }

    pub fn import_csv(&mut self) {
        if !self.store.roadmap().features.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current roadmap. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((roadmap, skipped)) => {
                    let count = roadmap.features.len();
                    self.replace_roadmap(roadmap, None);
                    self.status_message = if skipped > 0 {
                        format!("Imported {} features ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} features", count)
                    };
                }
                Err(e) => {
                    log::error!("CSV import from {} failed: {}", path.display(), e);
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.store.roadmap().features.is_empty() {
            self.status_message = "Nothing to export: the roadmap has no features".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.store.roadmap().name);
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(self.store.roadmap(), &path) {
                Ok(count) => self.status_message = format!("Exported {} features to CSV", count),
                Err(e) => {
                    log::error!("CSV export failed: {}", e);
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    // --- Settings ---

    pub fn set_autosave(&mut self, autosave: bool) {
        self.config.autosave = autosave;
        self.store.set_autosave(autosave);
        self.config.save();
    }

    pub fn set_grouping(&mut self, grouping: Grouping) {
        if self.grouping != grouping {
            self.grouping = grouping;
            self.grouping_changed();
        }
    }

    fn grouping_changed(&mut self) {
        self.drag.cancel();
        self.config.default_grouping = self.grouping;
        self.config.save();
    }

    pub fn set_planning_year(&mut self, year: i32) {
        self.drag.cancel();
        self.window = PlanningWindow::for_year(year);
        self.config.planning_year = self.window.year();
        self.config.save();
        self.status_message = format!("Planning year {}", self.window.year());
    }

    // --- Feature operations ---

    pub fn select_feature(&mut self, id: Uuid) {
        self.selected_feature = Some(id);
        self.editor_draft = self.store.roadmap().feature(id).cloned();
    }

    fn close_editor(&mut self) {
        self.selected_feature = None;
        self.editor_draft = None;
    }

    pub fn create_feature_from_dialog(&mut self) {
        let draft = &self.new_feature;
        let title = if draft.title.trim().is_empty() {
            "New Feature".to_string()
        } else {
            draft.title.trim().to_string()
        };
        let mut feature = Feature::new(draft.department_id.clone(), title);
        feature.status = draft.status;
        feature.metric_id = draft.metric_id;
        if draft.scheduled {
            feature = feature.with_schedule(draft.start, draft.end.max(draft.start));
        }

        match self.store.add_feature(feature) {
            Ok(id) => {
                self.new_feature = NewFeatureDraft::new(self.store.roadmap());
                self.select_feature(id);
                self.status_message = "Feature added".to_string();
            }
            Err(e) => {
                log::error!("Could not add feature: {}", e);
                self.status_message = format!("Could not add feature: {}", e);
            }
        }
    }

    fn save_editor(&mut self) {
        let Some(draft) = self.editor_draft.clone() else {
            return;
        };
        let title = draft.title.clone();
        match self.store.update_feature(draft) {
            Ok(()) => self.status_message = format!("Updated '{}'", title),
            Err(e) => {
                log::error!("Could not update feature: {}", e);
                self.status_message = format!("Could not update feature: {}", e);
            }
        }
    }

    pub fn delete_feature(&mut self, id: Uuid) {
        match self.store.delete_feature(id) {
            Ok(removed) => {
                if self.selected_feature == Some(id) {
                    self.close_editor();
                }
                self.status_message = format!("Deleted '{}'", removed.title);
            }
            Err(e) => {
                log::error!("Could not delete feature: {}", e);
                self.status_message = format!("Could not delete feature: {}", e);
            }
        }
    }

    fn handle_okr_action(&mut self, action: ui::okr_panel::OkrAction) {
        use ui::okr_panel::OkrAction;
        let result = match action {
            OkrAction::None => return,
            OkrAction::Add => {
                let kr = KeyResult::new("Pillar", "Objective", "New key result", 100.0);
                self.store.add_key_result(kr).map(|_| "Key result added")
            }
            OkrAction::Update(kr) => self.store.update_key_result(kr).map(|_| "Key result updated"),
            OkrAction::Delete(id) => self.store.delete_key_result(id).map(|_| "Key result deleted"),
            OkrAction::AddMetric => {
                let metric = StrategicMetric::new("Engine", "New focus", "What is measured");
                self.store.add_metric(metric).map(|_| "Metric added")
            }
            OkrAction::UpdateMetric(metric) => self.store.update_metric(metric).map(|_| "Metric updated"),
            OkrAction::CheckIn {
                key_result,
                blockers,
                decision_required,
            } => {
                let week = week_label(chrono::Local::now().date_naive());
                self.store
                    .check_in_key_result(key_result, &week, Some(blockers), Some(decision_required))
                    .map(|_| "Weekly check-in recorded")
            }
        };
        match result {
            Ok(message) => self.status_message = message.to_string(),
            Err(e) => {
                log::error!("Key result change failed: {}", e);
                self.status_message = format!("Key result change failed: {}", e);
            }
        }
    }
}

impl TimelineHost for RoadmapApp {
    fn commit_dates(&mut self, item_id: Uuid, start: NaiveDate, end: NaiveDate) {
        match self.store.update_feature_dates(item_id, start, end) {
            Ok(()) => {
                if let Some(draft) = self.editor_draft.as_mut().filter(|d| d.id == item_id) {
                    draft.start_date = Some(start);
                    draft.end_date = Some(end);
                }
                let title = self
                    .store
                    .roadmap()
                    .feature(item_id)
                    .map(|f| f.title.clone())
                    .unwrap_or_default();
                self.status_message = format!(
                    "Rescheduled '{}' ({} → {})",
                    title,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
            }
            // The bar snaps back on the next frame because it is drawn
            // from the store.
            Err(e) => {
                log::error!("Failed to save dates for {}: {}", item_id, e);
                self.status_message = format!("Could not save new dates: {}", e);
            }
        }
    }

    fn activate(&mut self, item_id: Uuid) {
        self.select_feature(item_id);
    }
}

impl eframe::App for RoadmapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drag.next_frame();

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.config.window_size = [rect.width(), rect.height()];
        }

        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_roadmap();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let roadmap = self.store.roadmap();
                        let scheduled = roadmap.features.iter().filter(|f| f.has_schedule()).count();
                        let autosave = if self.config.autosave && self.store.path().is_some() {
                            "Autosave on"
                        } else {
                            "Autosave off"
                        };
                        ui.label(
                            egui::RichText::new(format!(
                                "Features: {} · Scheduled: {} · {} · {}",
                                roadmap.features.len(),
                                scheduled,
                                self.window.year(),
                                autosave
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: feature editor + metrics/OKRs
        let mut editor_action = ui::feature_editor::EditorAction::None;
        let mut okr_action = ui::okr_panel::OkrAction::None;
        if self.editor_draft.is_some() || self.show_okr_panel {
            egui::SidePanel::left("side_panel")
                .default_width(ui::theme::SIDE_PANEL_WIDTH)
                .min_width(240.0)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                        if let Some(draft) = self.editor_draft.as_mut() {
                            editor_action = ui::feature_editor::show_feature_editor(draft, self.store.roadmap(), ui);
                            ui.add_space(4.0);
                            ui.separator();
                        }
                        if self.show_okr_panel {
                            okr_action = ui::okr_panel::show_okr_panel(self.store.roadmap(), ui);
                        }
                    });
                });
        }

        match editor_action {
            ui::feature_editor::EditorAction::Save => self.save_editor(),
            ui::feature_editor::EditorAction::Delete(id) => self.delete_feature(id),
            ui::feature_editor::EditorAction::Close => self.close_editor(),
            ui::feature_editor::EditorAction::None => {}
        }
        self.handle_okr_action(okr_action);

        // Central panel: Gantt chart and waterfall
        let today = chrono::Local::now().date_naive();
        let mut outcome = None;
        let mut grouping_changed = false;
        let mut waterfall_click = None;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::same(10.0));
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
                let interaction = ui::gantt_chart::show_gantt_chart(
                    self.store.roadmap(),
                    &self.window,
                    &mut self.grouping,
                    &mut self.drag,
                    self.selected_feature,
                    today,
                    ui,
                );
                outcome = interaction.outcome;
                grouping_changed = interaction.grouping_changed;

                if self.show_waterfall {
                    ui.add_space(16.0);
                    waterfall_click = ui::waterfall::show_waterfall(self.store.roadmap(), &self.window, today, ui);
                }
            });
        });

        if grouping_changed {
            self.grouping_changed();
        }
        if let Some(outcome) = outcome {
            let window = self.window.clone();
            dispatch(outcome, &window, self);
        }
        if let Some(id) = waterfall_click {
            self.select_feature(id);
        }

        // Dialogs
        if self.show_add_feature {
            ui::dialogs::show_add_feature_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_csv_help {
            ui::dialogs::show_csv_help_dialog(self, ctx);
        }
    }
}

impl Drop for RoadmapApp {
    fn drop(&mut self) {
        self.config.save();
    }
}
