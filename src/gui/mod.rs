//! Desktop demo built on eframe/egui

mod app;
mod components;
pub mod constants;
mod textures;
mod toasts;

pub use app::run_gui;
