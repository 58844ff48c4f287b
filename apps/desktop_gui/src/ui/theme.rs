//! Colors for the form and the diagnosis-keyed result styling.

use shared::domain::Diagnosis;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosisPalette {
    pub accent: egui::Color32,
    pub panel_fill: egui::Color32,
    pub panel_stroke: egui::Color32,
}

pub fn diagnosis_palette(diagnosis: Diagnosis) -> DiagnosisPalette {
    let accent = match diagnosis {
        Diagnosis::Malignant => egui::Color32::from_rgb(220, 53, 69),
        Diagnosis::Benign => egui::Color32::from_rgb(40, 167, 69),
        Diagnosis::Unknown => egui::Color32::from_rgb(108, 117, 125),
    };
    DiagnosisPalette {
        accent,
        panel_fill: lighten_color(accent, 0.88),
        panel_stroke: lighten_color(accent, 0.35),
    }
}

pub const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
pub const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);
pub const HINT_TEXT: egui::Color32 = egui::Color32::from_rgb(204, 140, 40);
pub const HEADER_FILL: egui::Color32 = egui::Color32::from_rgb(40, 44, 52);

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}
