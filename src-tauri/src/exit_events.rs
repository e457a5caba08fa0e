use tauri::{AppHandle, ExitRequestApi};

use crate::{with_coordinator, ExitChoice, QuitDecision};

/// Routes every quit attempt (tray Exit, OS quit, last window closed) through the gate.
pub fn handle_exit_requested(app_handle: &AppHandle, api: &ExitRequestApi) {
    let decision =
        with_coordinator(app_handle, |coordinator| coordinator.request_quit())
            .unwrap_or(QuitDecision::Proceed);

    match decision {
        QuitDecision::Proceed => {
            tracing::info!("exit request accepted");
        }
        QuitDecision::AwaitConfirmation | QuitDecision::AlreadyPending | QuitDecision::Cancelled => {
            tracing::info!(?decision, "exit request held");
            api.prevent_exit();
        }
    }
}

pub fn handle_exit_event(app_handle: &AppHandle) {
    let outcome = with_coordinator(app_handle, |coordinator| {
        (coordinator.shutdown(), coordinator.state())
    });
    match outcome {
        Some((true, state)) => tracing::info!(?state, "desktop process exiting"),
        _ => tracing::debug!("exit event after teardown, nothing to do"),
    }
}

/// Starts a user-initiated quit; exits right away unless confirmation is needed.
pub fn request_app_exit(app_handle: &AppHandle) {
    let decision =
        with_coordinator(app_handle, |coordinator| coordinator.request_quit())
            .unwrap_or(QuitDecision::Proceed);
    if decision == QuitDecision::Proceed {
        app_handle.exit(0);
    }
}

pub fn handle_exit_confirmation(app_handle: &AppHandle, choice: ExitChoice) {
    let decision = with_coordinator(app_handle, |coordinator| {
        coordinator.resolve_exit_confirmation(choice)
    });
    if decision == Some(QuitDecision::Proceed) {
        tracing::info!("exit confirmed by user");
        app_handle.exit(0);
    }
}
