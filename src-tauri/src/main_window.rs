use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};
use url::Url;

use crate::{
    input_policy, origin_policy, with_coordinator_on_main, ShellError, ShellResult,
    APP_DISPLAY_NAME, MAIN_HEIGHT, MAIN_WIDTH, MAIN_WINDOW_LABEL, SPLASH_HEIGHT, SPLASH_PAGE,
    SPLASH_WIDTH, SPLASH_WINDOW_LABEL,
};

pub fn main_window(app_handle: &AppHandle) -> ShellResult<WebviewWindow> {
    app_handle
        .get_webview_window(MAIN_WINDOW_LABEL)
        .ok_or(ShellError::WindowUnavailable(MAIN_WINDOW_LABEL))
}

pub fn splash_window(app_handle: &AppHandle) -> ShellResult<WebviewWindow> {
    app_handle
        .get_webview_window(SPLASH_WINDOW_LABEL)
        .ok_or(ShellError::WindowUnavailable(SPLASH_WINDOW_LABEL))
}

/// Script injected into every document of the main webview.
pub fn content_init_script() -> String {
    format!(
        "{}\n{}",
        input_policy::input_guard_script(),
        origin_policy::NEW_WINDOW_REDIRECT_SCRIPT
    )
}

pub fn build_splash_window(app_handle: &AppHandle) -> ShellResult<WebviewWindow> {
    let builder = WebviewWindowBuilder::new(
        app_handle,
        SPLASH_WINDOW_LABEL,
        WebviewUrl::App(SPLASH_PAGE.into()),
    )
    .title(APP_DISPLAY_NAME)
    .inner_size(SPLASH_WIDTH, SPLASH_HEIGHT)
    .decorations(false)
    .resizable(false)
    .maximizable(false)
    .minimizable(false)
    .always_on_top(true)
    .skip_taskbar(true)
    .center()
    .visible(false);

    #[cfg(not(target_os = "macos"))]
    let builder = builder.transparent(true);

    Ok(builder.build()?)
}

pub fn build_main_window(
    app_handle: &AppHandle,
    start_url: &str,
    guard: origin_policy::NavigationGuard,
) -> ShellResult<WebviewWindow> {
    let url = Url::parse(start_url)
        .map_err(|error| ShellError::config(format!("invalid start url {start_url}: {error}")))?;

    let navigation_handle = app_handle.clone();
    let window = WebviewWindowBuilder::new(app_handle, MAIN_WINDOW_LABEL, WebviewUrl::External(url))
        .title(APP_DISPLAY_NAME)
        .inner_size(MAIN_WIDTH, MAIN_HEIGHT)
        .center()
        .decorations(true)
        .visible(false)
        .devtools(false)
        .initialization_script(&content_init_script())
        .on_navigation(move |target| {
            let target = target.as_str();
            if origin_policy::is_shell_asset_url(target) {
                return true;
            }
            guard
                .evaluate(target, |external| {
                    let external = external.to_string();
                    with_coordinator_on_main(&navigation_handle, move |coordinator| {
                        coordinator.open_external(&external)
                    });
                })
                .is_allowed()
        })
        .build()?;

    Ok(window)
}

pub fn show_main_window(app_handle: &AppHandle) -> ShellResult<()> {
    let window = main_window(app_handle)?;
    window.show()?;
    if window.is_minimized().unwrap_or(false) {
        window.unminimize()?;
    }
    window.set_focus()?;
    Ok(())
}

pub fn hide_main_window(app_handle: &AppHandle) -> ShellResult<()> {
    main_window(app_handle)?.hide()?;
    Ok(())
}

pub fn navigate_main_window(app_handle: &AppHandle, url: &Url) -> ShellResult<()> {
    main_window(app_handle)?.navigate(url.clone())?;
    Ok(())
}
