use client_core::FALLBACK_ERROR_MESSAGE;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{FeatureKey, FEATURE_COUNT},
    protocol::ServiceHealth,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::FormController;
use crate::controller::view::{panels, predict_button};
use crate::ui::panels::{
    committed_text, show_error_panel, show_feature_form, show_result_panel, FormAction,
};
use crate::ui::theme::{ERROR_FILL, ERROR_STROKE, HEADER_FILL};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    message: String,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    api_base_url: String,
    controller: FormController,
    drafts: [String; FEATURE_COUNT],

    status: String,
    status_banner: Option<StatusBanner>,
    service_health: Option<ServiceHealth>,
}

impl DesktopGuiApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_base_url: startup.api_base_url,
            controller: FormController::new(),
            drafts: Default::default(),
            status: "Starting".to_string(),
            status_banner: None,
            service_health: None,
        };
        app.sync_drafts();
        dispatch_backend_command(&app.cmd_tx, BackendCommand::CheckHealth, &mut app.status);
        app
    }

    fn sync_drafts(&mut self) {
        for key in FeatureKey::ALL {
            self.drafts[key as usize] = committed_text(self.controller.features(), key);
        }
    }

    fn submit_prediction(&mut self) {
        let Some(pending) = self.controller.submit_prediction() else {
            return;
        };
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Predict {
                request_id: pending.request_id,
                features: pending.features,
            },
            &mut self.status,
        );
        if !queued {
            // The queue diagnostic stays in the status bar.
            self.controller.apply_outcome(
                pending.request_id,
                Err(FALLBACK_ERROR_MESSAGE.to_string()),
            );
        }
    }

    fn reset_form(&mut self) {
        self.controller.reset_form();
        self.sync_drafts();
        self.status = "Form reset to defaults".to_string();
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::PredictionCompleted {
                    request_id,
                    outcome,
                } => {
                    let status = match &outcome {
                        Ok(result) => format!(
                            "Prediction: {} ({}% confidence)",
                            result.prediction, result.confidence
                        ),
                        Err(err) => format!("{} error: {}", err_label(err.category()), err.message()),
                    };
                    let outcome = outcome.map_err(|err| err.message().to_string());
                    if self.controller.apply_outcome(request_id, outcome) {
                        self.status = status;
                    }
                }
                UiEvent::ServiceHealthChecked(health) => {
                    self.status = if health.is_ready() {
                        format!("Prediction service ready at {}", self.api_base_url)
                    } else {
                        format!(
                            "Prediction service at {} reports '{}' (model loaded: {}, scaler loaded: {})",
                            self.api_base_url,
                            health.status,
                            health.model_loaded,
                            health.scaler_loaded
                        )
                    };
                    self.service_health = Some(health);
                }
                UiEvent::Error(err) => {
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                    match err.context() {
                        UiErrorContext::BackendStartup => {
                            self.status_banner = Some(StatusBanner {
                                message: self.status.clone(),
                            });
                        }
                        UiErrorContext::HealthCheck => {
                            self.service_health = None;
                            self.status = format!(
                                "Prediction service at {} is not reachable yet; predictions may fail",
                                self.api_base_url
                            );
                        }
                        UiErrorContext::Prediction => {}
                    }
                }
            }
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            egui::Frame::NONE
                .fill(ERROR_FILL)
                .stroke(egui::Stroke::new(1.0, ERROR_STROKE))
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::NONE
                    .fill(HEADER_FILL)
                    .inner_margin(egui::Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("🩺 Breast Cancer Detection")
                        .size(24.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new("Machine Learning-based Breast Cancer Diagnosis Tool")
                        .color(egui::Color32::LIGHT_GRAY),
                );
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (dot, color) = match &self.service_health {
                    Some(health) if health.is_ready() => ("●", egui::Color32::from_rgb(40, 167, 69)),
                    Some(_) => ("●", egui::Color32::from_rgb(204, 140, 40)),
                    None => ("○", egui::Color32::GRAY),
                };
                ui.label(egui::RichText::new(dot).color(color));
                ui.label(&self.status);
            });
        });
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_status_banner(ui);

                let predict = predict_button(self.controller.state());
                let output = show_feature_form(
                    ui,
                    self.controller.features(),
                    &mut self.drafts,
                    &predict,
                );
                for key in output.edited {
                    let raw = self.drafts[key as usize].clone();
                    self.controller.update_field(key, &raw);
                }
                for key in output.blurred {
                    self.drafts[key as usize] = committed_text(self.controller.features(), key);
                }
                match output.action {
                    Some(FormAction::Predict) => self.submit_prediction(),
                    Some(FormAction::Reset) => self.reset_form(),
                    None => {}
                }

                let panels = panels(self.controller.state());
                if let Some(message) = &panels.error {
                    ui.add_space(16.0);
                    show_error_panel(ui, message);
                }
                if let Some(view) = &panels.result {
                    ui.add_space(16.0);
                    show_result_panel(ui, view);
                }
            });
        });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_main(ctx);

        if self.controller.is_loading() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::UiError;
    use crate::controller::reducer::UiState;
    use crossbeam_channel::bounded;
    use shared::{domain::FeatureSet, protocol::{ClassProbabilities, PredictionResult}};

    fn app_with_channels() -> (DesktopGuiApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = DesktopGuiApp::bootstrap(
            cmd_tx,
            ui_rx,
            StartupConfig {
                api_base_url: "http://localhost:5000".to_string(),
            },
        );
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn bootstrap_requests_health_and_shows_defaults() {
        let (app, cmd_rx, _ui_tx) = app_with_channels();
        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::CheckHealth)));
        assert_eq!(app.drafts[FeatureKey::MeanRadius as usize], "14");
        assert_eq!(app.drafts[FeatureKey::MeanFractalDimension as usize], "0.06");
    }

    #[test]
    fn predict_round_trip_through_channels() {
        let (mut app, cmd_rx, ui_tx) = app_with_channels();
        let _ = cmd_rx.try_recv();

        app.submit_prediction();
        app.submit_prediction();
        let request_id = match cmd_rx.try_recv() {
            Ok(BackendCommand::Predict {
                request_id,
                features,
            }) => {
                assert_eq!(features, FeatureSet::default());
                request_id
            }
            _ => panic!("expected predict command"),
        };
        assert!(cmd_rx.try_recv().is_err(), "second submit must be a no-op");

        ui_tx
            .send(UiEvent::PredictionCompleted {
                request_id,
                outcome: Ok(PredictionResult {
                    prediction: "Benign".to_string(),
                    confidence: 97.0,
                    probability: ClassProbabilities {
                        malignant: 3.0,
                        benign: 97.0,
                    },
                    input_features: None,
                }),
            })
            .expect("event");
        app.process_ui_events();

        assert!(matches!(app.controller.state(), UiState::Success(_)));
        assert_eq!(app.status, "Prediction: Benign (97% confidence)");
    }

    #[test]
    fn failed_dispatch_shows_fallback_and_keeps_diagnostic_in_status() {
        let (mut app, cmd_rx, _ui_tx) = app_with_channels();
        drop(cmd_rx);

        app.submit_prediction();

        assert!(!app.controller.is_loading());
        let panels = panels(app.controller.state());
        assert_eq!(panels.error.as_deref(), Some(FALLBACK_ERROR_MESSAGE));
        assert!(panels.result.is_none());
        assert!(app.status.starts_with("Backend command processor disconnected"));
    }

    #[test]
    fn full_command_queue_shows_fallback() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let (_ui_tx, ui_rx) = bounded(8);
        let mut app = DesktopGuiApp::bootstrap(
            cmd_tx,
            ui_rx,
            StartupConfig {
                api_base_url: "http://localhost:5000".to_string(),
            },
        );

        // The startup health check already fills the single slot.
        app.submit_prediction();

        assert_eq!(
            app.controller.state(),
            &UiState::Error(FALLBACK_ERROR_MESSAGE.to_string())
        );
        assert_eq!(app.status, "UI command queue is full; please retry");
    }

    #[test]
    fn reset_restores_drafts() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_channels();
        app.drafts[FeatureKey::MeanArea as usize] = "abc".to_string();
        app.controller.update_field(FeatureKey::MeanArea, "abc");
        assert_eq!(app.controller.features().mean_area, 0.0);

        app.reset_form();
        assert_eq!(app.drafts[FeatureKey::MeanArea as usize], "654");
        assert_eq!(app.controller.features(), &FeatureSet::default());
    }

    #[test]
    fn health_check_failure_is_not_fatal() {
        let (mut app, _cmd_rx, ui_tx) = app_with_channels();
        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::HealthCheck,
                "connection refused",
            )))
            .expect("event");
        app.process_ui_events();

        assert!(app.service_health.is_none());
        assert!(app.status_banner.is_none());
        assert_eq!(app.controller.state(), &UiState::Idle);
    }
}
