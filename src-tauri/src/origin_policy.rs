use regex::{Regex, RegexBuilder};
use url::Url;

use crate::{ShellConfig, ShellResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    OpenExternally,
}

impl NavigationDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Keeps in-app navigation under a single URL prefix. Plain string prefix test;
/// no scheme or host parsing.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    allow_prefix: String,
}

impl NavigationGuard {
    pub fn new(allow_prefix: impl Into<String>) -> Self {
        Self {
            allow_prefix: allow_prefix.into(),
        }
    }

    pub fn is_in_app(&self, url: &str) -> bool {
        url.starts_with(&self.allow_prefix)
    }

    /// Denied URLs are handed to `dispatch` exactly once.
    pub fn evaluate<F>(&self, url: &str, dispatch: F) -> NavigationDecision
    where
        F: FnOnce(&str),
    {
        if self.is_in_app(url) {
            return NavigationDecision::Allow;
        }

        dispatch(url);
        NavigationDecision::OpenExternally
    }
}

/// Rewrites `window.open` and `target=_blank` links into same-window navigations so
/// they pass through the webview's navigation handler like any other link.
pub const NEW_WINDOW_REDIRECT_SCRIPT: &str = r#"(function () {
  if (window.__tmftNewWindowRedirect) return;
  window.__tmftNewWindowRedirect = true;
  window.open = function (url) {
    if (url) window.location.assign(String(url));
    return null;
  };
  document.addEventListener("click", function (event) {
    var target = event.target;
    var anchor = target && target.closest ? target.closest("a[target]") : null;
    if (!anchor || !anchor.href) return;
    var frame = (anchor.getAttribute("target") || "").toLowerCase();
    if (frame === "" || frame === "_self" || frame === "_top" || frame === "_parent") return;
    event.preventDefault();
    window.location.assign(anchor.href);
  }, true);
})();"#;

/// Pages served from the app bundle (splash, offline fallback) and blank documents
/// are shell-internal and never subject to the allow prefix.
pub fn is_shell_asset_url(raw_url: &str) -> bool {
    if raw_url == "about:blank" {
        return true;
    }
    let Ok(url) = Url::parse(raw_url) else {
        return false;
    };
    url.scheme() == "tauri" || url.host_str() == Some("tauri.localhost")
}

pub fn compile_logged_out_patterns(patterns: &[String]) -> ShellResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(Into::into)
        })
        .collect()
}

/// Guesses whether the remote site has a signed-in session from the displayed URL.
///
/// Best-effort only: the site can change its login URL shape at any time, so this
/// decides whether to ask before quitting and must never gate anything sensitive.
#[derive(Debug, Clone)]
pub struct LoginHeuristic {
    allow_prefix: String,
    logged_out: Vec<Regex>,
}

impl LoginHeuristic {
    pub fn new(allow_prefix: impl Into<String>, patterns: &[String]) -> ShellResult<Self> {
        Ok(Self {
            allow_prefix: allow_prefix.into(),
            logged_out: compile_logged_out_patterns(patterns)?,
        })
    }

    pub fn from_config(config: &ShellConfig) -> ShellResult<Self> {
        Self::new(config.allow_prefix.clone(), &config.logged_out_patterns)
    }

    pub fn is_likely_logged_in(&self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() || !url.starts_with(&self.allow_prefix) {
            return false;
        }

        !self.logged_out.iter().any(|pattern| pattern.is_match(url))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::DEFAULT_ALLOW_PREFIX;

    fn heuristic() -> LoginHeuristic {
        LoginHeuristic::from_config(&ShellConfig::default()).expect("default patterns compile")
    }

    #[test]
    fn navigation_inside_prefix_is_allowed_without_dispatch() {
        let guard = NavigationGuard::new(DEFAULT_ALLOW_PREFIX);
        let dispatched = RefCell::new(Vec::new());

        let decision = guard.evaluate(
            "https://modernforextrading.com/tmft-community/dashboard.php",
            |url| dispatched.borrow_mut().push(url.to_string()),
        );

        assert_eq!(decision, NavigationDecision::Allow);
        assert!(dispatched.borrow().is_empty());
    }

    #[test]
    fn navigation_outside_prefix_is_dispatched_exactly_once() {
        let guard = NavigationGuard::new(DEFAULT_ALLOW_PREFIX);
        let targets = [
            "https://www.youtube.com/watch?v=abc",
            "https://modernforextrading.com/",
            "http://modernforextrading.com/tmft-community/dashboard.php",
            "mailto:support@example.com",
            "",
        ];

        for target in targets {
            let mut dispatched = Vec::new();
            let decision = guard.evaluate(target, |url| dispatched.push(url.to_string()));
            assert_eq!(decision, NavigationDecision::OpenExternally, "{target}");
            assert_eq!(dispatched, vec![target.to_string()]);
        }
    }

    #[test]
    fn prefix_match_is_plain_string_comparison() {
        let guard = NavigationGuard::new(DEFAULT_ALLOW_PREFIX);
        assert!(guard.is_in_app(
            "https://modernforextrading.com/tmft-community/../other/page"
        ));
        assert!(!guard.is_in_app("HTTPS://modernforextrading.com/tmft-community/"));
    }

    #[test]
    fn bundled_pages_are_shell_assets() {
        assert!(is_shell_asset_url("tauri://localhost/offline.html"));
        assert!(is_shell_asset_url("http://tauri.localhost/offline.html"));
        assert!(is_shell_asset_url("about:blank"));
        assert!(!is_shell_asset_url("https://tauri.localhost.evil.test/"));
        assert!(!is_shell_asset_url("https://www.youtube.com/"));
        assert!(!is_shell_asset_url("not a url"));
    }

    #[test]
    fn login_page_is_treated_as_logged_out() {
        let url = format!("{DEFAULT_ALLOW_PREFIX}auth-login.php");
        assert!(!heuristic().is_likely_logged_in(&url));
    }

    #[test]
    fn dashboard_is_treated_as_logged_in() {
        let url = format!("{DEFAULT_ALLOW_PREFIX}dashboard.php");
        assert!(heuristic().is_likely_logged_in(&url));
    }

    #[test]
    fn logged_out_patterns_are_case_insensitive() {
        let url = format!("{DEFAULT_ALLOW_PREFIX}Member-LOGIN.php");
        assert!(!heuristic().is_likely_logged_in(&url));
    }

    #[test]
    fn empty_or_foreign_urls_are_not_logged_in() {
        let heuristic = heuristic();
        assert!(!heuristic.is_likely_logged_in(""));
        assert!(!heuristic.is_likely_logged_in("   "));
        assert!(!heuristic.is_likely_logged_in("https://example.com/dashboard.php"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let result = LoginHeuristic::new(DEFAULT_ALLOW_PREFIX, &["[".to_string()]);
        assert!(result.is_err());
    }
}
