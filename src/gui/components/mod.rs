pub mod avatar_view;
pub mod debug_panel;
pub mod preset_selector;
pub mod quick_params;
