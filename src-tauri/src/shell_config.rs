use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    origin_policy, ShellError, ShellResult, ALLOW_PREFIX_ENV, DEFAULT_ALLOW_PREFIX,
    DEFAULT_FALLBACK_TRANSITION_MS, DEFAULT_LOGGED_OUT_PATTERNS, DEFAULT_PROBE_TIMEOUT_MS,
    DEFAULT_START_PAGE, SHELL_CONFIG_ENV, SHELL_CONFIG_FILE, START_URL_ENV,
};

/// Effective shell settings after defaults, `shell.json` and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub allow_prefix: String,
    pub start_url: String,
    pub logged_out_patterns: Vec<String>,
    pub fallback_transition_ms: u64,
    pub probe_timeout_ms: u64,
}

/// On-disk shape; every field is optional so partial files are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ShellConfigFile {
    allow_prefix: Option<String>,
    start_url: Option<String>,
    logged_out_patterns: Option<Vec<String>>,
    fallback_transition_ms: Option<u64>,
    probe_timeout_ms: Option<u64>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            allow_prefix: DEFAULT_ALLOW_PREFIX.to_string(),
            start_url: format!("{DEFAULT_ALLOW_PREFIX}{DEFAULT_START_PAGE}"),
            logged_out_patterns: DEFAULT_LOGGED_OUT_PATTERNS
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
            fallback_transition_ms: DEFAULT_FALLBACK_TRANSITION_MS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
        }
    }
}

impl ShellConfig {
    pub fn validate(&self) -> ShellResult<()> {
        if self.allow_prefix.trim().is_empty() {
            return Err(ShellError::config("allow_prefix must not be empty"));
        }
        if !self.start_url.starts_with(&self.allow_prefix) {
            return Err(ShellError::config(format!(
                "start_url '{}' is outside allow_prefix '{}'",
                self.start_url, self.allow_prefix
            )));
        }
        if self.fallback_transition_ms == 0 {
            return Err(ShellError::config("fallback_transition_ms must be positive"));
        }
        origin_policy::compile_logged_out_patterns(&self.logged_out_patterns)?;
        Ok(())
    }

    fn merge_file(mut self, file: ShellConfigFile) -> Self {
        if let Some(allow_prefix) = file.allow_prefix {
            self = self.with_allow_prefix(allow_prefix);
        }
        if let Some(start_url) = file.start_url {
            self.start_url = start_url;
        }
        if let Some(patterns) = file.logged_out_patterns {
            self.logged_out_patterns = patterns;
        }
        if let Some(ms) = file.fallback_transition_ms {
            self.fallback_transition_ms = ms;
        }
        if let Some(ms) = file.probe_timeout_ms {
            self.probe_timeout_ms = ms;
        }
        self
    }

    fn with_allow_prefix(mut self, allow_prefix: String) -> Self {
        // Keep the start page relative to the new prefix unless it is set explicitly later.
        self.start_url = format!("{allow_prefix}{DEFAULT_START_PAGE}");
        self.allow_prefix = allow_prefix;
        self
    }

    fn apply_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(allow_prefix) = non_empty(ALLOW_PREFIX_ENV) {
            self = self.with_allow_prefix(allow_prefix);
        }
        if let Some(start_url) = non_empty(START_URL_ENV) {
            self.start_url = start_url;
        }
        self
    }
}

pub fn config_file_path(config_dir: Option<&Path>) -> Option<PathBuf> {
    if let Ok(path) = env::var(SHELL_CONFIG_ENV) {
        let path = PathBuf::from(path.trim());
        if !path.as_os_str().is_empty() {
            return Some(path);
        }
    }

    config_dir.map(|dir| dir.join(SHELL_CONFIG_FILE))
}

fn read_config_file(path: &Path) -> ShellResult<Option<ShellConfigFile>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Builds the effective config. Invalid overrides are logged and the defaults are kept,
/// so a broken `shell.json` never prevents the shell from starting.
pub fn resolve_shell_config<F>(config_path: Option<&Path>, lookup: F) -> ShellConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ShellConfig::default();

    if let Some(path) = config_path {
        match read_config_file(path) {
            Ok(Some(file)) => {
                tracing::info!(path = %path.display(), "loaded shell config");
                config = config.merge_file(file);
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "no shell config file, using defaults");
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), "failed to read shell config: {error}");
            }
        }
    }

    let config = config.apply_env_overrides(lookup);
    match config.validate() {
        Ok(()) => config,
        Err(error) => {
            tracing::warn!("{error}; falling back to built-in shell config");
            ShellConfig::default()
        }
    }
}

pub fn load_shell_config(config_dir: Option<&Path>) -> ShellConfig {
    let path = config_file_path(config_dir);
    resolve_shell_config(path.as_deref(), |key| env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join(SHELL_CONFIG_FILE);
        fs::write(&path, body).expect("write shell config");
        path
    }

    #[test]
    fn default_config_is_valid_and_starts_on_login_page() {
        let config = ShellConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.start_url,
            "https://modernforextrading.com/tmft-community/auth-login.php"
        );
        assert_eq!(config.fallback_transition_ms, 6_000);
    }

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = resolve_shell_config(Some(dir.path().join("absent.json").as_path()), no_env);
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn partial_config_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, r#"{ "fallback_transition_ms": 3000 }"#);

        let config = resolve_shell_config(Some(path.as_path()), no_env);
        assert_eq!(config.fallback_transition_ms, 3_000);
        assert_eq!(config.allow_prefix, DEFAULT_ALLOW_PREFIX);
    }

    #[test]
    fn allow_prefix_override_rebases_start_url() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, r#"{ "allow_prefix": "https://example.com/app/" }"#);

        let config = resolve_shell_config(Some(path.as_path()), no_env);
        assert_eq!(config.start_url, "https://example.com/app/auth-login.php");
    }

    #[test]
    fn start_url_outside_prefix_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, r#"{ "start_url": "https://elsewhere.test/" }"#);

        let config = resolve_shell_config(Some(path.as_path()), no_env);
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn invalid_pattern_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, r#"{ "logged_out_patterns": ["(unclosed"] }"#);

        let config = resolve_shell_config(Some(path.as_path()), no_env);
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn malformed_json_is_ignored() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "{ not json");

        let config = resolve_shell_config(Some(path.as_path()), no_env);
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn env_overrides_win_over_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, r#"{ "allow_prefix": "https://file.test/" }"#);
        let env: HashMap<&str, &str> = HashMap::from([
            (ALLOW_PREFIX_ENV, "https://env.test/portal/"),
            (START_URL_ENV, " https://env.test/portal/home.php "),
        ]);

        let config =
            resolve_shell_config(Some(path.as_path()), |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.allow_prefix, "https://env.test/portal/");
        assert_eq!(config.start_url, "https://env.test/portal/home.php");
    }
}
