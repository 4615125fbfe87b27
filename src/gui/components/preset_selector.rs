use eframe::egui;

use border_avatar::editor::presets::PresetEntry;
use border_avatar::i18n::{Label, Language, preset_name};

use crate::gui::constants::*;

/// Preset dropdown. Returns the key the user picked this frame.
pub fn ui(ui: &mut egui::Ui, presets: &[PresetEntry], selected: &str, lang: Language) -> Option<String> {
    let mut picked = None;

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(Label::Presets.text(lang)).strong());

            let selected_text = presets
                .iter()
                .find(|p| p.key == selected)
                .map(|p| preset_name(lang, &p.display_name_key))
                .unwrap_or_default();

            egui::ComboBox::from_id_salt("preset_selector")
                .selected_text(selected_text)
                .width(FIELD_WIDTH)
                .show_ui(ui, |ui| {
                    for preset in presets {
                        let is_selected = preset.key == selected;
                        let label = preset_name(lang, &preset.display_name_key);
                        if ui.selectable_label(is_selected, label).clicked() && !is_selected {
                            picked = Some(preset.key.clone());
                        }
                    }
                });
        });
    });

    picked
}
