use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};

use crate::{
    exit_events, logging, shell_config, update_check, with_coordinator,
    with_coordinator_on_main, CloseDecision, LifecycleCoordinator, LogGuard, ShellState,
    TauriHost, MAIN_WINDOW_LABEL, SPLASH_WINDOW_LABEL,
};

fn on_window_event(window: &tauri::Window, event: &WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    let app_handle = window.app_handle();
    match event {
        WindowEvent::CloseRequested { api, .. } => {
            let decision = with_coordinator(app_handle, |coordinator| {
                coordinator.on_main_close_requested()
            });
            if decision == Some(CloseDecision::HideToTray) {
                api.prevent_close();
            }
        }
        WindowEvent::Focused(false) => {
            if let Ok(true) = window.is_minimized() {
                with_coordinator(app_handle, |coordinator| coordinator.on_main_minimized());
            }
        }
        _ => {}
    }
}

pub(crate) fn run() {
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            tracing::info!("second instance launched, focusing main window");
            with_coordinator_on_main(app, |coordinator| coordinator.show_main());
        }))
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .on_window_event(on_window_event)
        .on_page_load(|webview, payload| {
            let app_handle = webview.app_handle();
            match (webview.label(), payload.event()) {
                (MAIN_WINDOW_LABEL, PageLoadEvent::Started) => {
                    with_coordinator(app_handle, |coordinator| {
                        coordinator.on_main_document_started()
                    });
                }
                (MAIN_WINDOW_LABEL, PageLoadEvent::Finished) => {
                    tracing::debug!(url = %payload.url(), "main page-load finished");
                    with_coordinator(app_handle, |coordinator| {
                        coordinator.on_main_load_finished();
                        coordinator.on_main_document_started();
                    });
                }
                (SPLASH_WINDOW_LABEL, PageLoadEvent::Finished) => {
                    with_coordinator(app_handle, |coordinator| coordinator.on_splash_ready());
                }
                _ => {}
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            let log_dir = app_handle.path().app_log_dir().ok();
            if let Some(dir) = &log_dir {
                if let Err(error) = std::fs::create_dir_all(dir) {
                    eprintln!("failed to create log directory {}: {error}", dir.display());
                }
            }
            if let Some(guard) = logging::init(log_dir.as_deref()) {
                app_handle.manage(LogGuard(guard));
            }
            tracing::info!(version = %app_handle.package_info().version, "desktop process starting");

            let config_dir = app_handle.path().app_config_dir().ok();
            let config = shell_config::load_shell_config(config_dir.as_deref());

            let coordinator = LifecycleCoordinator::new(TauriHost::new(app_handle.clone()), config)?;
            app_handle.manage(ShellState::new(coordinator));
            let state = app_handle.state::<ShellState>();
            if let Err(error) = state.with(|coordinator| coordinator.start()) {
                tracing::error!("failed to create shell windows: {error}");
                return Err(error.into());
            }

            if update_check::register_updater(&app_handle) {
                update_check::spawn_startup_update_check(app_handle.clone());
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| match event {
        RunEvent::ExitRequested { api, .. } => {
            exit_events::handle_exit_requested(app_handle, &api);
        }
        RunEvent::Exit => {
            exit_events::handle_exit_event(app_handle);
        }
        #[cfg(target_os = "macos")]
        RunEvent::Reopen { .. } => {
            with_coordinator(app_handle, |coordinator| coordinator.show_main());
        }
        _ => {}
    });
}
