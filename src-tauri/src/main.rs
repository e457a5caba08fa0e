#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod connectivity;
mod error;
mod exit_events;
mod external_url;
mod fade_animation;
mod input_policy;
mod lifecycle;
mod logging;
mod main_window;
mod origin_policy;
mod shell_config;
mod shell_host;
mod shell_texts;
mod tauri_host;
mod tray_actions;
mod tray_labels;
mod tray_menu_handler;
mod tray_setup;
mod update_check;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{
    with_coordinator, with_coordinator_on_main, LogGuard, ShellState, TrayMenuState,
};
pub(crate) use error::{ShellError, ShellResult};
pub(crate) use lifecycle::{
    CloseDecision, ExitChoice, FadeStep, LifecycleCoordinator, QuitDecision,
};
pub(crate) use shell_config::ShellConfig;
pub(crate) use shell_host::ShellHost;
pub(crate) use tauri_host::TauriHost;

fn main() {
    app_runtime::run();
}
