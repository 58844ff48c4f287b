use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use client_core::{ClientConfig, PredictionClient, PredictionService};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let config = ClientConfig::from_env().context("failed to resolve prediction service url")?;
    let startup = StartupConfig {
        api_base_url: config.api_base_url().to_string(),
    };
    tracing::info!(api_base_url = %startup.api_base_url, "starting desktop ui");

    let service: Arc<dyn PredictionService> = Arc::new(PredictionClient::new(config));
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(service, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Breast Cancer Detection")
            .with_inner_size([760.0, 860.0])
            .with_min_inner_size([560.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Breast Cancer Detection",
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop ui exited with error: {err}"))
}
