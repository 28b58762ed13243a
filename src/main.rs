#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use roadmap_planner::app::RoadmapApp;
use roadmap_planner::config::AppConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load();
    log::info!(
        "Starting roadmap planner (planning year {}, grouping {:?})",
        config.planning_year,
        config.default_grouping
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 400.0])
            .with_title("Roadmap Planner"),
        ..Default::default()
    };

    eframe::run_native(
        "Roadmap Planner",
        options,
        Box::new(|cc| Ok(Box::new(RoadmapApp::new(cc, config)))),
    )
}
