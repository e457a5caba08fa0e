use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use url::Url;

use crate::{
    connectivity, exit_events, external_url, fade_animation, main_window,
    origin_policy::NavigationGuard,
    shell_texts::SHELL_TEXTS,
    tray_setup, window_actions, with_coordinator_on_main, ExitChoice, FadeStep, ShellError,
    ShellHost, ShellResult, MAIN_WINDOW_LABEL, OFFLINE_PAGE,
};

/// `ShellHost` backed by a running Tauri app.
pub(crate) struct TauriHost {
    app_handle: AppHandle,
}

impl TauriHost {
    pub(crate) fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

/// URL under which the embedded frontend assets are served.
pub(crate) fn app_asset_url(path: &str) -> ShellResult<Url> {
    let base = if cfg!(any(target_os = "windows", target_os = "android")) {
        "http://tauri.localhost/"
    } else {
        "tauri://localhost/"
    };
    let base = Url::parse(base).map_err(ShellError::config)?;
    base.join(path).map_err(ShellError::config)
}

impl ShellHost for TauriHost {
    fn create_splash(&mut self) -> ShellResult<()> {
        main_window::build_splash_window(&self.app_handle)?;
        Ok(())
    }

    fn show_splash(&mut self) -> ShellResult<()> {
        main_window::splash_window(&self.app_handle)?.show()?;
        Ok(())
    }

    fn destroy_splash(&mut self) -> ShellResult<()> {
        let splash = main_window::splash_window(&self.app_handle)?;
        if let Err(error) = splash.set_always_on_top(false) {
            tracing::debug!("failed to drop splash always-on-top: {error}");
        }
        splash.destroy()?;
        Ok(())
    }

    fn create_main(&mut self, start_url: &str, navigation: NavigationGuard) -> ShellResult<()> {
        main_window::build_main_window(&self.app_handle, start_url, navigation)?;
        Ok(())
    }

    fn main_exists(&self) -> bool {
        self.app_handle
            .get_webview_window(MAIN_WINDOW_LABEL)
            .is_some()
    }

    fn is_main_visible(&self) -> ShellResult<bool> {
        window_actions::is_main_window_visible(&self.app_handle)
    }

    fn show_main(&mut self) -> ShellResult<()> {
        window_actions::show_main_window(&self.app_handle)
    }

    fn hide_main(&mut self) -> ShellResult<()> {
        window_actions::hide_main_window(&self.app_handle)
    }

    fn minimize_main(&mut self) -> ShellResult<()> {
        window_actions::minimize_main_window(&self.app_handle)
    }

    fn set_main_opacity(&mut self, opacity: f64) -> ShellResult<()> {
        main_window::main_window(&self.app_handle)?
            .eval(&fade_animation::opacity_script(opacity))?;
        Ok(())
    }

    fn main_url(&self) -> Option<String> {
        let window = self.app_handle.get_webview_window(MAIN_WINDOW_LABEL)?;
        match window.url() {
            Ok(url) => Some(url.to_string()),
            Err(error) => {
                tracing::debug!("failed to read main window url: {error}");
                None
            }
        }
    }

    fn load_main_url(&mut self, url: &str) -> ShellResult<()> {
        let url = Url::parse(url).map_err(ShellError::config)?;
        main_window::navigate_main_window(&self.app_handle, &url)
    }

    fn load_offline_page(&mut self) -> ShellResult<()> {
        if self
            .app_handle
            .asset_resolver()
            .get(OFFLINE_PAGE.to_string())
            .is_none()
        {
            return Err(ShellError::MissingResource(OFFLINE_PAGE.to_string()));
        }
        main_window::navigate_main_window(&self.app_handle, &app_asset_url(OFFLINE_PAGE)?)
    }

    fn show_offline_dialog(&mut self) {
        let mut dialog = self
            .app_handle
            .dialog()
            .message(SHELL_TEXTS.offline_message)
            .title(SHELL_TEXTS.offline_title)
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::Ok);
        if let Some(window) = self.app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
            dialog = dialog.parent(&window);
        }
        dialog.show(|_| {});
    }

    fn destroy_main(&mut self) -> ShellResult<()> {
        main_window::main_window(&self.app_handle)?.destroy()?;
        Ok(())
    }

    fn create_tray(&mut self) -> ShellResult<()> {
        tray_setup::setup_tray(&self.app_handle)
    }

    fn destroy_tray(&mut self) {
        tray_setup::remove_tray(&self.app_handle);
    }

    fn open_external(&mut self, url: &str) {
        if let Err(error) = external_url::open_in_browser(&self.app_handle, url) {
            tracing::warn!(url, "{error}");
        }
    }

    fn schedule_fallback_transition(&mut self, delay: Duration) {
        let app_handle = self.app_handle.clone();
        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(delay).await;
            with_coordinator_on_main(&app_handle, |coordinator| {
                coordinator.on_fallback_timer_elapsed()
            });
        });
    }

    fn schedule_reachability_probe(&mut self, url: &str, timeout: Duration) {
        connectivity::spawn_reachability_probe(self.app_handle.clone(), url.to_string(), timeout);
    }

    fn start_fade_timer(&mut self, interval: Duration) {
        let app_handle = self.app_handle.clone();
        let running = Arc::new(AtomicBool::new(true));
        tauri::async_runtime::spawn(async move {
            while running.load(Ordering::Acquire) {
                tokio::time::sleep(interval).await;
                let running = Arc::clone(&running);
                with_coordinator_on_main(&app_handle, move |coordinator| {
                    let step = coordinator.advance_fade();
                    if !matches!(step, FadeStep::Continue(_)) {
                        tracing::debug!(?step, "fade timer stopped");
                        running.store(false, Ordering::Release);
                    }
                });
            }
        });
    }

    fn present_exit_confirmation(&mut self) {
        let app_handle = self.app_handle.clone();
        tauri::async_runtime::spawn_blocking(move || {
            let mut dialog = app_handle
                .dialog()
                .message(SHELL_TEXTS.exit_message)
                .title(SHELL_TEXTS.exit_title)
                .kind(MessageDialogKind::Warning)
                .buttons(MessageDialogButtons::OkCancelCustom(
                    SHELL_TEXTS.exit_confirm.to_string(),
                    SHELL_TEXTS.exit_cancel.to_string(),
                ));
            if let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) {
                dialog = dialog.parent(&window);
            }
            let choice = if dialog.blocking_show() {
                ExitChoice::Exit
            } else {
                ExitChoice::Cancel
            };
            let confirm_handle = app_handle.clone();
            if let Err(error) = app_handle.run_on_main_thread(move || {
                exit_events::handle_exit_confirmation(&confirm_handle, choice)
            }) {
                tracing::warn!("failed to deliver exit confirmation: {error}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::app_asset_url;

    #[test]
    fn app_asset_url_points_at_bundled_page() {
        let url = app_asset_url("offline.html").expect("asset url");
        assert!(url.as_str().ends_with("/offline.html"));
        assert!(crate::origin_policy::is_shell_asset_url(url.as_str()));
    }
}
