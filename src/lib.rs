//! Avatar with an animated decorative frame, plus the editor state that keeps
//! a border config in sync across structured fields, JSON text and presets

#![forbid(unsafe_code)]

pub mod avatar;
pub mod constants;
pub mod data_url;
pub mod debounce;
pub mod editor;
pub mod geometry;
pub mod i18n;
pub mod notify;
pub mod settings;
pub mod types;
pub mod upload;
