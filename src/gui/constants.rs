//! GUI-specific constants for layout, colors and timing

/// Demo window dimensions
pub const WINDOW_WIDTH: f32 = 960.0;
pub const WINDOW_HEIGHT: f32 = 720.0;
pub const WINDOW_MIN_WIDTH: f32 = 640.0;
pub const WINDOW_MIN_HEIGHT: f32 = 480.0;

/// Editor side panel width
pub const SIDE_PANEL_WIDTH: f32 = 380.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const FIELD_WIDTH: f32 = 220.0;
pub const JSON_EDITOR_ROWS: usize = 10;

/// Slider ranges for the quick params panel (typed values may exceed them)
pub const SCALE_SLIDER_RANGE: std::ops::RangeInclusive<f64> = 0.1..=1.0;
pub const OFFSET_SLIDER_RANGE: std::ops::RangeInclusive<f64> = -0.5..=0.5;
pub const ROTATE_SLIDER_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Placeholder tile drawn for the built-in "No Image" avatar
pub const PLACEHOLDER_FILL: egui::Color32 = egui::Color32::from_rgb(0xdd, 0xdd, 0xdd);
pub const PLACEHOLDER_TEXT: egui::Color32 = egui::Color32::from_rgb(0x99, 0x99, 0x99);

/// Toast colors per severity
pub const TOAST_INFO: egui::Color32 = egui::Color32::from_rgb(60, 110, 200);
pub const TOAST_SUCCESS: egui::Color32 = egui::Color32::from_rgb(0, 150, 70);
pub const TOAST_WARNING: egui::Color32 = egui::Color32::from_rgb(200, 150, 0);
pub const TOAST_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);
pub const TOAST_WIDTH: f32 = 320.0;

/// GIF frames shorter than this play at the fallback delay
pub const GIF_MIN_FRAME_DELAY_MS: u32 = 20;
pub const GIF_FALLBACK_FRAME_DELAY_MS: u64 = 100;
