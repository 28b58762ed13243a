pub mod dialogs;
pub mod feature_editor;
pub mod gantt_chart;
pub mod okr_panel;
pub mod theme;
pub mod toolbar;
pub mod waterfall;
