use eframe::egui;

use border_avatar::editor::form::{QuickParams, format_number, parse_number};
use border_avatar::i18n::{Label, Language};

use crate::gui::constants::*;

/// Quick parameter fields. Edits a copy and returns it when anything changed.
pub fn ui(ui: &mut egui::Ui, current: &QuickParams, lang: Language) -> Option<QuickParams> {
    let mut params = current.clone();
    let mut changed = false;

    ui.group(|ui| {
        ui.label(egui::RichText::new(Label::QuickParams.text(lang)).strong());
        ui.add_space(ITEM_SPACING);

        egui::Grid::new("quick_params_grid")
            .num_columns(3)
            .spacing([ITEM_SPACING, ITEM_SPACING])
            .show(ui, |ui| {
                changed |= numeric_row(ui, Label::AvatarScale.text(lang), &mut params.avatar_scale, SCALE_SLIDER_RANGE, 0.01);
                changed |= numeric_row(ui, Label::TopOffset.text(lang), &mut params.top_offset_ratio, OFFSET_SLIDER_RANGE, 0.01);
                changed |= numeric_row(ui, Label::LeftOffset.text(lang), &mut params.left_offset_ratio, OFFSET_SLIDER_RANGE, 0.01);
                changed |= numeric_row(ui, Label::Rotate.text(lang), &mut params.rotate, ROTATE_SLIDER_RANGE, 1.0);

                ui.label(Label::BorderRadius.text(lang));
                let edit = egui::TextEdit::singleline(&mut params.border_radius).desired_width(FIELD_WIDTH / 2.0);
                if ui.add(edit).changed() {
                    changed = true;
                }
                ui.end_row();
            });

        if params.outside_recommended() {
            ui.colored_label(TOAST_WARNING, Label::OutsideRecommended.text(lang));
        }
    });

    changed.then_some(params)
}

/// Text field plus slider bound to the same value.
/// The text stays authoritative so unparseable input survives until fixed.
fn numeric_row(
    ui: &mut egui::Ui,
    label: &str,
    text: &mut String,
    range: std::ops::RangeInclusive<f64>,
    step: f64,
) -> bool {
    let mut changed = false;

    ui.label(label);
    if ui
        .add(egui::TextEdit::singleline(text).desired_width(FIELD_WIDTH / 2.0))
        .changed()
    {
        changed = true;
    }

    let mut value = parse_number(text).unwrap_or(0.0);
    let slider = egui::Slider::new(&mut value, range).step_by(step).show_value(false);
    if ui.add(slider).changed() {
        *text = format_number(round_to_step(value, step));
        changed = true;
    }
    ui.end_row();

    changed
}

/// Drop float noise from slider values (0.35000000000000003 -> 0.35)
fn round_to_step(value: f64, step: f64) -> f64 {
    let decimals = (-step.log10()).ceil().max(0.0) as i32;
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_step() {
        assert_eq!(round_to_step(0.35000000000000003, 0.01), 0.35);
        assert_eq!(round_to_step(-0.2049, 0.01), -0.2);
        assert_eq!(round_to_step(44.6, 1.0), 45.0);
    }
}
