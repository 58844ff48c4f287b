//! Small reusable widgets: feature inputs and probability bars.

use shared::domain::{display_number, FieldDescriptor};

use crate::controller::view::ProbabilityBar;
use crate::ui::theme::diagnosis_palette;

pub fn feature_label(ui: &mut egui::Ui, descriptor: &FieldDescriptor) -> egui::Response {
    ui.label(egui::RichText::new(format!("{} ⓘ", descriptor.label)).strong())
        .on_hover_text(descriptor.description)
}

/// Single-line numeric entry. The draft holds raw text while the user types.
pub fn feature_input(
    ui: &mut egui::Ui,
    descriptor: &FieldDescriptor,
    draft: &mut String,
) -> egui::Response {
    let edit = egui::TextEdit::singleline(draft)
        .id_salt(descriptor.key.as_str())
        .desired_width(120.0)
        .hint_text(display_number(descriptor.min));
    ui.add(edit).on_hover_text(format!(
        "{}\nTypical range {} to {} (step {})",
        descriptor.description,
        display_number(descriptor.min),
        display_number(descriptor.max),
        display_number(descriptor.step)
    ))
}

pub fn probability_bar(ui: &mut egui::Ui, bar: &ProbabilityBar) {
    let color = diagnosis_palette(bar.class).accent;
    ui.label(&bar.caption);
    ui.add(
        egui::ProgressBar::new(bar.fill)
            .fill(color)
            .desired_height(12.0)
            .desired_width(ui.available_width().min(420.0)),
    );
}
