use tauri::{menu::MenuItem, AppHandle, Manager};

use crate::{shell_texts, tray_actions::TrayMenuAction, TrayMenuState, MAIN_WINDOW_LABEL};

fn set_menu_text_safe(item: &MenuItem<tauri::Wry>, text: &str, item_name: &str) {
    if let Err(error) = item.set_text(text) {
        tracing::warn!("failed to update tray menu text for {item_name}: {error}");
    }
}

pub fn update_tray_menu_labels(app_handle: &AppHandle) {
    update_tray_menu_labels_with_visibility(app_handle, None);
}

pub fn update_tray_menu_labels_with_visibility(
    app_handle: &AppHandle,
    visible_override: Option<bool>,
) {
    let Some(tray_state) = app_handle.try_state::<TrayMenuState>() else {
        return;
    };

    let effective_visible = visible_override.unwrap_or_else(|| {
        app_handle
            .get_webview_window(MAIN_WINDOW_LABEL)
            .and_then(|window| window.is_visible().ok())
            .unwrap_or(false)
    });

    set_menu_text_safe(
        &tray_state.toggle_item,
        shell_texts::toggle_label(effective_visible),
        TrayMenuAction::ToggleWindow.menu_id(),
    );
}
