use std::time::Instant;

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_updater::UpdaterExt;

use crate::{shell_texts, shell_texts::SHELL_TEXTS, with_coordinator, MAIN_WINDOW_LABEL};

/// Registers the updater plugin. Returns `false` when no update channel is configured,
/// in which case update checks are skipped entirely.
pub fn register_updater(app_handle: &AppHandle) -> bool {
    match app_handle.plugin(tauri_plugin_updater::Builder::new().build()) {
        Ok(()) => true,
        Err(error) => {
            tracing::info!("updater unavailable, skipping update checks: {error}");
            false
        }
    }
}

fn ask_to_install(app_handle: &AppHandle, version: &str) -> bool {
    let mut dialog = app_handle
        .dialog()
        .message(shell_texts::update_ready_message(version))
        .title(SHELL_TEXTS.update_title)
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::OkCancelCustom(
            SHELL_TEXTS.update_install.to_string(),
            SHELL_TEXTS.update_later.to_string(),
        ));
    if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
        dialog = dialog.parent(&window);
    }
    dialog.blocking_show()
}

/// Best-effort background check. Every failure is logged and swallowed.
pub fn spawn_startup_update_check(app_handle: AppHandle) {
    tauri::async_runtime::spawn(async move {
        let current_version = app_handle.package_info().version.to_string();
        let updater = match app_handle.updater() {
            Ok(updater) => updater,
            Err(error) => {
                tracing::debug!("failed to initialize updater: {error}");
                return;
            }
        };

        let check_started = Instant::now();
        let update = match updater.check().await {
            Ok(Some(update)) => update,
            Ok(None) => {
                tracing::info!(
                    %current_version,
                    elapsed_ms = check_started.elapsed().as_millis() as u64,
                    "no desktop update available"
                );
                return;
            }
            Err(error) => {
                tracing::debug!(%current_version, "update check failed (ignored): {error}");
                return;
            }
        };

        let new_version = update.version.to_string();
        tracing::info!(%current_version, %new_version, "desktop update available, downloading");
        let downloaded_bytes = match update.download(|_, _| {}, || {}).await {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!("failed to download desktop update: {error}");
                return;
            }
        };

        let prompt_handle = app_handle.clone();
        let prompt_version = new_version.clone();
        let should_install = tauri::async_runtime::spawn_blocking(move || {
            ask_to_install(&prompt_handle, &prompt_version)
        })
        .await
        .unwrap_or(false);
        if !should_install {
            tracing::info!("user postponed desktop update");
            return;
        }

        if let Err(error) = update.install(&downloaded_bytes) {
            tracing::warn!("failed to install desktop update: {error}");
            return;
        }

        tracing::info!(%new_version, "desktop update installed, restarting");
        let restart_handle = app_handle.clone();
        if let Err(error) = app_handle.run_on_main_thread(move || {
            with_coordinator(&restart_handle, |coordinator| coordinator.force_quit());
            restart_handle.request_restart();
        }) {
            tracing::warn!("failed to schedule restart after update: {error}");
        }
    });
}
