use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use crate::model::OkrStatus;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_FIELD: Color32 = Color32::from_rgb(20, 20, 28);
pub const BG_LANE_LABEL: Color32 = Color32::from_rgb(28, 29, 38);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(80, 140, 220, 45);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(90, 140, 220);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const TODAY_LINE: Color32 = Color32::from_rgb(240, 75, 75);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);
pub const QUARTER_LINE: Color32 = Color32::from_rgb(64, 68, 84);
pub const HANDLE_COLOR: Color32 = Color32::from_rgb(255, 255, 255);
pub const DANGER: Color32 = Color32::from_rgb(229, 57, 53);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 36.0;
pub const LANE_LABEL_WIDTH: f32 = 190.0;
pub const BAR_HEIGHT: f32 = 28.0;
pub const HANDLE_WIDTH: f32 = 8.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const WATERFALL_ROW_HEIGHT: f32 = 22.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const SIDE_PANEL_WIDTH: f32 = 320.0;
pub const DIALOG_WIDTH: f32 = 360.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_menu() -> FontId {
    FontId::proportional(13.0)
}

// ── Metric colours ───────────────────────────────────────────────────────────

/// Fill, border, progress and label colours for one metric lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricColors {
    pub bg: Color32,
    pub border: Color32,
    pub progress: Color32,
    pub text: Color32,
}

const fn metric(bg: u32, border: u32, progress: u32, text: u32) -> MetricColors {
    MetricColors {
        bg: hex(bg),
        border: hex(border),
        progress: hex(progress),
        text: hex(text),
    }
}

const fn hex(rgb: u32) -> Color32 {
    Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

pub const METRIC_PALETTE: [MetricColors; 8] = [
    metric(0xDBEAFE, 0x93C5FD, 0x3B82F6, 0x1E3A5F), // blue
    metric(0xD1FAE5, 0x6EE7B7, 0x10B981, 0x064E3B), // emerald
    metric(0xEDE9FE, 0xC4B5FD, 0x8B5CF6, 0x4C1D95), // violet
    metric(0xFEF3C7, 0xFCD34D, 0xF59E0B, 0x78350F), // amber
    metric(0xFCE7F3, 0xF9A8D4, 0xEC4899, 0x831843), // pink
    metric(0xCFFAFE, 0x67E8F9, 0x06B6D4, 0x164E63), // cyan
    metric(0xFFEDD5, 0xFDBA74, 0xF97316, 0x7C2D12), // orange
    metric(0xE0E7FF, 0xA5B4FC, 0x6366F1, 0x312E81), // indigo
];

/// Colours for features not linked to any metric.
pub const UNLINKED: MetricColors = metric(0xF1F5F9, 0xCBD5E1, 0x94A3B8, 0x334155);

/// Palette entry for the metric at `index` in the roadmap's metric list.
pub fn metric_colors(index: Option<usize>) -> MetricColors {
    index
        .map(|i| METRIC_PALETTE[i % METRIC_PALETTE.len()])
        .unwrap_or(UNLINKED)
}

// ── OKR status ───────────────────────────────────────────────────────────────

pub fn okr_status_color(status: OkrStatus) -> Color32 {
    match status {
        OkrStatus::Green => Color32::from_rgb(16, 185, 129),
        OkrStatus::Amber => Color32::from_rgb(245, 158, 11),
        OkrStatus::Red => Color32::from_rgb(239, 68, 68),
    }
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;

    let rounding = Rounding::same(4.0);
    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = rounding;

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 44, 56);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = rounding;

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 54, 68);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = rounding;

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 62, 76);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = rounding;

    visuals.widgets.open.bg_fill = Color32::from_rgb(50, 52, 66);
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.open.rounding = rounding;

    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;
    visuals.faint_bg_color = BG_PANEL;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
