use tauri::AppHandle;

use crate::{exit_events, tray_actions::TrayMenuAction, with_coordinator};

pub fn handle_tray_menu_event(app_handle: &AppHandle, menu_id: &str) {
    match TrayMenuAction::from_menu_id(menu_id) {
        Some(TrayMenuAction::ToggleWindow) => {
            with_coordinator(app_handle, |coordinator| coordinator.toggle_main());
        }
        Some(TrayMenuAction::ReloadWindow) => {
            with_coordinator(app_handle, |coordinator| {
                coordinator.show_main();
                coordinator.reload_main();
            });
        }
        Some(TrayMenuAction::Quit) => {
            tracing::info!("tray exit requested");
            exit_events::request_app_exit(app_handle);
        }
        None => tracing::debug!(menu_id, "ignoring unknown tray menu id"),
    }
}
