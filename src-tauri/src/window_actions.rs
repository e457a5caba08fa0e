use tauri::AppHandle;

use crate::{main_window, tray_labels, ShellResult};

pub fn show_main_window(app_handle: &AppHandle) -> ShellResult<()> {
    main_window::show_main_window(app_handle)?;
    tray_labels::update_tray_menu_labels_with_visibility(app_handle, Some(true));
    Ok(())
}

pub fn hide_main_window(app_handle: &AppHandle) -> ShellResult<()> {
    main_window::hide_main_window(app_handle)?;
    tray_labels::update_tray_menu_labels_with_visibility(app_handle, Some(false));
    Ok(())
}

pub fn minimize_main_window(app_handle: &AppHandle) -> ShellResult<()> {
    main_window::main_window(app_handle)?.minimize()?;
    Ok(())
}

pub fn is_main_window_visible(app_handle: &AppHandle) -> ShellResult<bool> {
    Ok(main_window::main_window(app_handle)?.is_visible()?)
}
