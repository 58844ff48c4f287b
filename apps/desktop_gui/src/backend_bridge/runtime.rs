//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use client_core::PredictionService;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. It exits once every command sender is
/// dropped, aborting whatever requests are still in flight.
pub fn launch(
    service: Arc<dyn PredictionService>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            let mut in_flight: Vec<JoinHandle<()>> = Vec::new();
            while let Ok(cmd) = cmd_rx.recv() {
                in_flight.retain(|task| !task.is_finished());
                match cmd {
                    BackendCommand::Predict {
                        request_id,
                        features,
                    } => {
                        tracing::info!(request_id = request_id.0, "backend: predict");
                        let service = Arc::clone(&service);
                        let ui_tx = ui_tx.clone();
                        in_flight.push(tokio::spawn(async move {
                            let outcome = service.predict(&features).await.map_err(|err| {
                                tracing::error!(
                                    request_id = request_id.0,
                                    "backend: predict failed: {err}"
                                );
                                UiError::from_client_error(UiErrorContext::Prediction, &err)
                            });
                            deliver_completion(
                                &ui_tx,
                                UiEvent::PredictionCompleted {
                                    request_id,
                                    outcome,
                                },
                            )
                            .await;
                        }));
                    }
                    BackendCommand::CheckHealth => {
                        tracing::info!("backend: check_health");
                        let service = Arc::clone(&service);
                        let ui_tx = ui_tx.clone();
                        in_flight.push(tokio::spawn(async move {
                            let event = match service.health().await {
                                Ok(health) => UiEvent::ServiceHealthChecked(health),
                                Err(err) => {
                                    tracing::warn!("backend: check_health failed: {err}");
                                    UiEvent::Error(UiError::from_client_error(
                                        UiErrorContext::HealthCheck,
                                        &err,
                                    ))
                                }
                            };
                            deliver(&ui_tx, event);
                        }));
                    }
                }
            }

            for task in &in_flight {
                task.abort();
            }
            for task in in_flight {
                let _ = task.await;
            }
            tracing::info!("backend worker stopped: ui hung up");
            deliver(&ui_tx, UiEvent::Info(WORKER_STOPPED.to_string()));
        });
    })
}

const WORKER_STOPPED: &str = "Backend worker stopped";
const COMPLETION_RETRY: Duration = Duration::from_millis(10);

/// Completions must reach the UI or the form stays in loading. A full queue
/// is waited out; only a closed one drops the event.
async fn deliver_completion(ui_tx: &Sender<UiEvent>, mut event: UiEvent) {
    let mut warned = false;
    loop {
        match ui_tx.try_send(event) {
            Ok(()) => return,
            Err(TrySendError::Full(returned)) => {
                if !warned {
                    tracing::warn!("ui event queue full; holding prediction outcome");
                    warned = true;
                }
                event = returned;
                tokio::time::sleep(COMPLETION_RETRY).await;
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui gone; dropping prediction outcome");
                return;
            }
        }
    }
}

fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => {
            tracing::error!("ui event queue full; dropping backend event");
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("ui gone; dropping backend event");
        }
    }
}
