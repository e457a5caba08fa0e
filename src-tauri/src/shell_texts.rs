#[derive(Debug, Clone, Copy)]
pub struct ShellTexts {
    pub tray_tooltip: &'static str,
    pub tray_show: &'static str,
    pub tray_hide: &'static str,
    pub tray_reload: &'static str,
    pub tray_quit: &'static str,
    pub exit_title: &'static str,
    pub exit_message: &'static str,
    pub exit_confirm: &'static str,
    pub exit_cancel: &'static str,
    pub offline_title: &'static str,
    pub offline_message: &'static str,
    pub update_title: &'static str,
    pub update_install: &'static str,
    pub update_later: &'static str,
}

pub const SHELL_TEXTS: ShellTexts = ShellTexts {
    tray_tooltip: "TMFT Desktop",
    tray_show: "Open TMFT Desktop",
    tray_hide: "Hide TMFT Desktop",
    tray_reload: "Reload",
    tray_quit: "Exit",
    exit_title: "Exit TMFT Desktop?",
    exit_message: "You appear to be logged in.\n\nExiting will close TMFT Desktop on this device. Do you want to exit now?",
    exit_confirm: "Exit",
    exit_cancel: "Cancel",
    offline_title: "Offline",
    offline_message: "You appear to be offline.\n\nPlease check your internet connection, then reopen the app.",
    update_title: "Update ready",
    update_install: "Restart and Install",
    update_later: "Later",
};

pub fn toggle_label(main_window_visible: bool) -> &'static str {
    if main_window_visible {
        SHELL_TEXTS.tray_hide
    } else {
        SHELL_TEXTS.tray_show
    }
}

pub fn update_ready_message(version: &str) -> String {
    format!("TMFT Desktop {version} is ready.\n\nRestart now to install the update?")
}
