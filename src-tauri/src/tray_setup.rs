use tauri::{
    menu::{Menu, MenuItem, PredefinedMenuItem},
    tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent},
    AppHandle, Manager,
};

use crate::{
    shell_texts::{self, SHELL_TEXTS},
    tray_actions::TrayMenuAction, tray_labels, tray_menu_handler, with_coordinator, ShellError,
    ShellResult, TrayMenuState, MAIN_WINDOW_LABEL, TRAY_ID,
};

fn tray_error(what: &'static str) -> impl FnOnce(tauri::Error) -> ShellError {
    move |error| ShellError::tray(format!("failed to create {what}: {error}"))
}

fn menu_item(
    app_handle: &AppHandle,
    action: TrayMenuAction,
    text: &str,
) -> ShellResult<MenuItem<tauri::Wry>> {
    MenuItem::with_id(app_handle, action.menu_id(), text, true, None::<&str>)
        .map_err(tray_error("tray menu item"))
}

pub fn setup_tray(app_handle: &AppHandle) -> ShellResult<()> {
    let main_window_visible = app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .and_then(|window| window.is_visible().ok())
        .unwrap_or(false);

    let toggle_item = menu_item(
        app_handle,
        TrayMenuAction::ToggleWindow,
        shell_texts::toggle_label(main_window_visible),
    )?;
    let reload_item = menu_item(app_handle, TrayMenuAction::ReloadWindow, SHELL_TEXTS.tray_reload)?;
    let quit_item = menu_item(app_handle, TrayMenuAction::Quit, SHELL_TEXTS.tray_quit)?;
    let separator =
        PredefinedMenuItem::separator(app_handle).map_err(tray_error("tray separator"))?;

    let menu = Menu::with_items(
        app_handle,
        &[&toggle_item, &reload_item, &separator, &quit_item],
    )
    .map_err(tray_error("tray menu"))?;

    if !app_handle.manage(TrayMenuState {
        toggle_item: toggle_item.clone(),
    }) {
        tracing::debug!("tray menu state already exists, skipping manage");
    }

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(SHELL_TEXTS.tray_tooltip)
        .icon(tauri::include_image!("./icons/tray.png"))
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| {
            tray_menu_handler::handle_tray_menu_event(app, event.id().as_ref())
        })
        .on_tray_icon_event(|tray, event| {
            if let TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            } = event
            {
                with_coordinator(tray.app_handle(), |coordinator| coordinator.toggle_main());
            }
        });

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .build(app_handle)
        .map_err(tray_error("tray icon"))?;

    tray_labels::update_tray_menu_labels(app_handle);
    Ok(())
}

pub fn remove_tray(app_handle: &AppHandle) {
    if app_handle.remove_tray_by_id(TRAY_ID).is_none() {
        tracing::debug!("tray icon already removed");
    }
}
