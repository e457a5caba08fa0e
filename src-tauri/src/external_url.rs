use tauri::AppHandle;
use tauri_plugin_opener::OpenerExt;
use url::Url;

use crate::{ShellError, ShellResult};

/// Only web pages leave the shell; anything else (file, custom schemes, scripts)
/// is dropped.
pub(crate) fn browser_url(raw_url: &str) -> ShellResult<Url> {
    let candidate = raw_url.trim();
    if candidate.is_empty() {
        return Err(ShellError::external("empty url"));
    }

    let url = Url::parse(candidate)
        .map_err(|error| ShellError::external(format!("{candidate}: {error}")))?;
    if matches!(url.scheme(), "http" | "https") {
        Ok(url)
    } else {
        Err(ShellError::external(format!(
            "{candidate}: scheme '{}' is not opened outside the app",
            url.scheme()
        )))
    }
}

/// Hands `raw_url` to the user's default browser.
pub fn open_in_browser(app_handle: &AppHandle, raw_url: &str) -> ShellResult<()> {
    let url = browser_url(raw_url)?;
    app_handle
        .opener()
        .open_url(url.as_str(), None::<&str>)
        .map_err(ShellError::external)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_urls_are_accepted_and_trimmed() {
        let url = browser_url("  https://www.tradingview.com/chart  ").expect("https url");
        assert_eq!(url.as_str(), "https://www.tradingview.com/chart");
        assert!(browser_url("http://example.com/path").is_ok());
    }

    #[test]
    fn non_web_urls_stay_closed() {
        for raw in ["", "   ", "file:///etc/passwd", "javascript:alert(1)", "mailto:a@b.c"] {
            assert!(browser_url(raw).is_err(), "{raw}");
        }
    }

    #[test]
    fn unparseable_url_names_the_input() {
        let error = browser_url("not a url").expect_err("relative url");
        assert!(error.to_string().contains("not a url"));
    }
}
