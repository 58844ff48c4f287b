//! Form, error and result panels.

use shared::domain::{display_number, FeatureKey, FeatureSet, FEATURE_COUNT};

use crate::controller::view::{range_hint, PredictButton, ResultView};
use crate::ui::theme::{diagnosis_palette, ERROR_FILL, ERROR_STROKE, HINT_TEXT};
use crate::ui::widgets::{feature_input, feature_label, probability_bar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Predict,
    Reset,
}

#[derive(Debug, Default)]
pub struct FormOutput {
    pub edited: Vec<FeatureKey>,
    pub blurred: Vec<FeatureKey>,
    pub action: Option<FormAction>,
}

pub fn show_feature_form(
    ui: &mut egui::Ui,
    features: &FeatureSet,
    drafts: &mut [String; FEATURE_COUNT],
    predict: &PredictButton,
) -> FormOutput {
    let mut output = FormOutput::default();

    ui.heading("Enter Tumor Features");
    ui.add_space(8.0);

    egui::Grid::new("feature_grid")
        .num_columns(3)
        .spacing([16.0, 8.0])
        .striped(true)
        .show(ui, |ui| {
            for key in FeatureKey::ALL {
                let descriptor = key.descriptor();
                feature_label(ui, descriptor);
                let response = feature_input(ui, descriptor, &mut drafts[key as usize]);
                if response.changed() {
                    output.edited.push(key);
                }
                if response.lost_focus() {
                    output.blurred.push(key);
                }
                match range_hint(descriptor, features.get(key)) {
                    Some(hint) => {
                        ui.label(egui::RichText::new(hint).small().color(HINT_TEXT));
                    }
                    None => {
                        ui.label("");
                    }
                }
                ui.end_row();
            }
        });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let predict_response = ui.add_enabled(
            predict.enabled,
            egui::Button::new(egui::RichText::new(predict.label).strong()),
        );
        if predict_response.clicked() {
            output.action = Some(FormAction::Predict);
        }
        if !predict.enabled {
            ui.spinner();
        }
        if ui.button("Reset").clicked() {
            output.action = Some(FormAction::Reset);
        }
    });

    output
}

pub fn show_error_panel(ui: &mut egui::Ui, message: &str) {
    egui::Frame::NONE
        .fill(ERROR_FILL)
        .stroke(egui::Stroke::new(1.0, ERROR_STROKE))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new("Error")
                    .heading()
                    .color(egui::Color32::WHITE),
            );
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
}

pub fn show_result_panel(ui: &mut egui::Ui, view: &ResultView) {
    let palette = diagnosis_palette(view.diagnosis);
    egui::Frame::NONE
        .fill(palette.panel_fill)
        .stroke(egui::Stroke::new(2.0, palette.panel_stroke))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new("Prediction Result")
                    .heading()
                    .color(egui::Color32::BLACK),
            );
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Diagnosis:").color(egui::Color32::BLACK));
                ui.label(
                    egui::RichText::new(&view.label)
                        .size(22.0)
                        .strong()
                        .color(palette.accent),
                );
            });
            ui.label(
                egui::RichText::new(format!("Confidence: {}", view.confidence_text))
                    .color(egui::Color32::BLACK),
            );
            ui.add_space(6.0);
            for bar in &view.bars {
                probability_bar(ui, bar);
            }
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(view.disclaimer)
                    .small()
                    .italics()
                    .color(egui::Color32::DARK_GRAY),
            );
        });
}

/// Text the input shows once editing ends: the stored value, not the draft.
pub fn committed_text(features: &FeatureSet, key: FeatureKey) -> String {
    display_number(features.get(key))
}
