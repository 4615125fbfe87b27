use std::path::PathBuf;

use eframe::egui;

use border_avatar::editor::form::DebugFields;
use border_avatar::i18n::{Label, Language};
use border_avatar::upload::UploadTarget;

use crate::gui::constants::*;

/// What the user asked for in the debug panel this frame
#[derive(Debug, PartialEq)]
pub enum DebugAction {
    Edited(DebugFields),
    ChooseFile(UploadTarget, PathBuf),
    Import,
    Copy,
    Download,
}

/// Local file paths typed next to the URL fields
#[derive(Default)]
pub struct DebugPanelState {
    border_path: String,
    avatar_path: String,
}

impl DebugPanelState {
    pub fn ui(&mut self, ui: &mut egui::Ui, current: &DebugFields, lang: Language) -> Vec<DebugAction> {
        let mut actions = Vec::new();
        let mut fields = current.clone();
        let mut changed = false;

        egui::CollapsingHeader::new(Label::DebugPanel.text(lang))
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("debug_fields_grid")
                    .num_columns(2)
                    .spacing([ITEM_SPACING, ITEM_SPACING])
                    .show(ui, |ui| {
                        changed |= text_row(ui, Label::AvatarUrl.text(lang), &mut fields.avatar_url);
                        changed |= text_row(ui, Label::BorderGifUrl.text(lang), &mut fields.border_gif_url);
                        changed |= text_row(ui, Label::AvatarSize.text(lang), &mut fields.avatar_size);
                    });

                ui.add_space(ITEM_SPACING);
                if let Some(action) = file_row(ui, &mut self.avatar_path, UploadTarget::Avatar, Label::AvatarUrl.text(lang), lang) {
                    actions.push(action);
                }
                if let Some(action) = file_row(ui, &mut self.border_path, UploadTarget::Border, Label::BorderGifUrl.text(lang), lang) {
                    actions.push(action);
                }

                ui.add_space(ITEM_SPACING);
                ui.label(egui::RichText::new(Label::ConfigJson.text(lang)).strong());
                let editor = egui::TextEdit::multiline(&mut fields.config_json)
                    .code_editor()
                    .desired_rows(JSON_EDITOR_ROWS)
                    .desired_width(f32::INFINITY);
                if ui.add(editor).changed() {
                    changed = true;
                }

                ui.horizontal(|ui| {
                    if ui.button(format!("\u{2B07} {}", Label::Import.text(lang))).clicked() {
                        actions.push(DebugAction::Import);
                    }
                    if ui.button(format!("\u{1F4CB} {}", Label::Copy.text(lang))).clicked() {
                        actions.push(DebugAction::Copy);
                    }
                    if ui.button(format!("\u{1F4BE} {}", Label::Download.text(lang))).clicked() {
                        actions.push(DebugAction::Download);
                    }
                });
            });

        // Field edits must reach the editor before any button acts on them
        if changed {
            actions.insert(0, DebugAction::Edited(fields));
        }
        actions
    }
}

fn text_row(ui: &mut egui::Ui, label: &str, text: &mut String) -> bool {
    ui.label(label);
    let changed = ui
        .add(egui::TextEdit::singleline(text).desired_width(FIELD_WIDTH))
        .changed();
    ui.end_row();
    changed
}

fn file_row(
    ui: &mut egui::Ui,
    path: &mut String,
    target: UploadTarget,
    label: &str,
    lang: Language,
) -> Option<DebugAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.label(label);
        let response = ui.add(
            egui::TextEdit::singleline(path)
                .hint_text("/path/to/image.gif")
                .desired_width(FIELD_WIDTH * 0.75),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if (ui.button(Label::ChooseFile.text(lang)).clicked() || submitted) && !path.trim().is_empty() {
            action = Some(DebugAction::ChooseFile(target, PathBuf::from(path.trim())));
        }
    });
    action
}
