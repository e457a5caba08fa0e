pub const DEFAULT_ALLOW_PREFIX: &str = "https://modernforextrading.com/tmft-community/";
pub const DEFAULT_START_PAGE: &str = "auth-login.php";
pub const DEFAULT_LOGGED_OUT_PATTERNS: &[&str] = &[r"auth-login\.php", "login"];

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const SPLASH_WINDOW_LABEL: &str = "splash";
pub const TRAY_ID: &str = "tmft-tray";
pub const APP_DISPLAY_NAME: &str = "TMFT Desktop";

pub const SPLASH_PAGE: &str = "splash.html";
pub const OFFLINE_PAGE: &str = "offline.html";

pub const SPLASH_WIDTH: f64 = 420.0;
pub const SPLASH_HEIGHT: f64 = 320.0;
pub const MAIN_WIDTH: f64 = 1280.0;
pub const MAIN_HEIGHT: f64 = 800.0;

pub const DEFAULT_FALLBACK_TRANSITION_MS: u64 = 6_000;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 4_000;

pub const SHELL_CONFIG_FILE: &str = "shell.json";
pub const SHELL_CONFIG_ENV: &str = "TMFT_DESKTOP_CONFIG";
pub const ALLOW_PREFIX_ENV: &str = "TMFT_DESKTOP_ALLOW_PREFIX";
pub const START_URL_ENV: &str = "TMFT_DESKTOP_START_URL";
pub const LOG_FILE_PREFIX: &str = "tmft-desktop.log";
