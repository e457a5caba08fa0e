use std::time::Duration;

use crate::{origin_policy::NavigationGuard, ShellResult};

/// What the lifecycle coordinator needs from the GUI runtime.
///
/// Timer and dialog methods only schedule work; their results come back to the
/// coordinator as separate calls (`on_fallback_timer_elapsed`, `advance_fade`,
/// `resolve_exit_confirmation`, `on_main_load_failed`).
pub trait ShellHost {
    fn create_splash(&mut self) -> ShellResult<()>;
    fn show_splash(&mut self) -> ShellResult<()>;
    fn destroy_splash(&mut self) -> ShellResult<()>;

    /// Creates the main surface hidden, loading `start_url`. Every later navigation
    /// of the surface is filtered through `navigation`.
    fn create_main(&mut self, start_url: &str, navigation: NavigationGuard) -> ShellResult<()>;
    fn main_exists(&self) -> bool;
    fn is_main_visible(&self) -> ShellResult<bool>;
    fn show_main(&mut self) -> ShellResult<()>;
    fn hide_main(&mut self) -> ShellResult<()>;
    fn minimize_main(&mut self) -> ShellResult<()>;
    fn set_main_opacity(&mut self, opacity: f64) -> ShellResult<()>;
    fn main_url(&self) -> Option<String>;
    fn load_main_url(&mut self, url: &str) -> ShellResult<()>;
    /// Fails with `ShellError::MissingResource` when the bundled page is absent.
    fn load_offline_page(&mut self) -> ShellResult<()>;
    fn show_offline_dialog(&mut self);
    fn destroy_main(&mut self) -> ShellResult<()>;

    fn create_tray(&mut self) -> ShellResult<()>;
    fn destroy_tray(&mut self);

    fn open_external(&mut self, url: &str);

    fn schedule_fallback_transition(&mut self, delay: Duration);
    /// Checks `url` off the event loop; an unreachable host is reported back as a
    /// main-frame load failure.
    fn schedule_reachability_probe(&mut self, url: &str, timeout: Duration);
    fn start_fade_timer(&mut self, interval: Duration);
    fn present_exit_confirmation(&mut self);
}
