//! What the form renders for a given controller state, independent of egui.

use shared::{
    domain::{display_number, Diagnosis, FieldDescriptor, DISCLAIMER},
    protocol::PredictionResult,
};

use crate::controller::reducer::UiState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictButton {
    pub enabled: bool,
    pub label: &'static str,
}

pub fn predict_button(state: &UiState) -> PredictButton {
    match state {
        UiState::Loading { .. } => PredictButton {
            enabled: false,
            label: "Analyzing...",
        },
        _ => PredictButton {
            enabled: true,
            label: "Predict",
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityBar {
    pub class: Diagnosis,
    pub caption: String,
    pub percent_text: String,
    /// Drawing width in `[0, 1]`; the caption keeps the reported value.
    pub fill: f32,
}

impl ProbabilityBar {
    fn new(class: Diagnosis, name: &str, percent: f64) -> Self {
        let percent_text = format!("{}%", display_number(percent));
        Self {
            class,
            caption: format!("{name}: {percent_text}"),
            percent_text,
            fill: (percent / 100.0).clamp(0.0, 1.0) as f32,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub diagnosis: Diagnosis,
    pub label: String,
    pub confidence_text: String,
    pub bars: [ProbabilityBar; 2],
    pub disclaimer: &'static str,
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        Self {
            diagnosis: result.diagnosis(),
            label: result.prediction.clone(),
            confidence_text: format!("{}%", display_number(result.confidence)),
            bars: [
                ProbabilityBar::new(
                    Diagnosis::Malignant,
                    "Malignant",
                    result.probability.malignant,
                ),
                ProbabilityBar::new(Diagnosis::Benign, "Benign", result.probability.benign),
            ],
            disclaimer: DISCLAIMER,
        }
    }
}

/// Conditional panels below the form. At most one is ever present.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panels {
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

pub fn panels(state: &UiState) -> Panels {
    match state {
        UiState::Success(result) => Panels {
            error: None,
            result: Some(ResultView::from_result(result)),
        },
        UiState::Error(message) => Panels {
            error: Some(message.clone()),
            result: None,
        },
        UiState::Idle | UiState::Loading { .. } => Panels::default(),
    }
}

pub fn range_hint(descriptor: &FieldDescriptor, value: f64) -> Option<String> {
    if descriptor.in_range(value) {
        return None;
    }
    Some(format!(
        "outside typical range {} to {}",
        display_number(descriptor.min),
        display_number(descriptor.max)
    ))
}
