use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockedInput {
    Reload,
    Zoom,
    DevTools,
}

/// A key combination the content surface must never receive.
/// `modifier` means Ctrl on Windows/Linux or Cmd on macOS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockedShortcut {
    pub key: &'static str,
    pub modifier: bool,
    pub shift: bool,
    pub kind: BlockedInput,
}

const fn shortcut(
    key: &'static str,
    modifier: bool,
    shift: bool,
    kind: BlockedInput,
) -> BlockedShortcut {
    BlockedShortcut {
        key,
        modifier,
        shift,
        kind,
    }
}

pub const BLOCKED_SHORTCUTS: &[BlockedShortcut] = &[
    shortcut("r", true, false, BlockedInput::Reload),
    shortcut("f5", false, false, BlockedInput::Reload),
    shortcut("+", true, false, BlockedInput::Zoom),
    shortcut("=", true, false, BlockedInput::Zoom),
    shortcut("-", true, false, BlockedInput::Zoom),
    shortcut("0", true, false, BlockedInput::Zoom),
    shortcut("i", true, true, BlockedInput::DevTools),
    shortcut("f12", false, false, BlockedInput::DevTools),
];

/// Init script for the content webview, matching events against `BLOCKED_SHORTCUTS`
/// during capture so page handlers never see them.
pub fn input_guard_script() -> String {
    let rules = serde_json::to_string(BLOCKED_SHORTCUTS).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"(function () {{
  if (window.__tmftInputGuard) return;
  window.__tmftInputGuard = true;
  var rules = {rules};
  function blocked(event) {{
    var key = (event.key || "").toLowerCase();
    var modifier = event.ctrlKey || event.metaKey;
    for (var i = 0; i < rules.length; i++) {{
      var rule = rules[i];
      if (rule.key === key && (!rule.modifier || modifier) && (!rule.shift || event.shiftKey)) {{
        return true;
      }}
    }}
    return false;
  }}
  function suppress(event) {{
    event.preventDefault();
    event.stopImmediatePropagation();
  }}
  window.addEventListener("keydown", function (event) {{
    if (blocked(event)) suppress(event);
  }}, true);
  window.addEventListener("wheel", function (event) {{
    if (event.ctrlKey || event.metaKey) suppress(event);
  }}, {{ capture: true, passive: false }});
  window.addEventListener("gesturestart", suppress, true);
}})();"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct KeyInput {
        key: String,
        control: bool,
        meta: bool,
        shift: bool,
    }

    impl KeyInput {
        fn new(key: impl Into<String>) -> Self {
            Self {
                key: key.into(),
                ..Self::default()
            }
        }

        fn with_control(mut self) -> Self {
            self.control = true;
            self
        }

        fn with_meta(mut self) -> Self {
            self.meta = true;
            self
        }

        fn with_shift(mut self) -> Self {
            self.shift = true;
            self
        }

        fn has_modifier(&self) -> bool {
            self.control || self.meta
        }
    }

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    struct WheelInput {
        control: bool,
        meta: bool,
    }

    impl BlockedShortcut {
        fn matches(&self, input: &KeyInput, key: &str) -> bool {
            self.key == key
                && (!self.modifier || input.has_modifier())
                && (!self.shift || input.shift)
        }
    }

    /// Mirror of the injected matcher, used to pin down the rule table.
    fn classify_key(input: &KeyInput) -> Option<BlockedInput> {
        let key = input.key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return None;
        }

        BLOCKED_SHORTCUTS
            .iter()
            .find(|shortcut| shortcut.matches(input, &key))
            .map(|shortcut| shortcut.kind)
    }

    fn classify_wheel(input: &WheelInput) -> Option<BlockedInput> {
        (input.control || input.meta).then_some(BlockedInput::Zoom)
    }

    #[test]
    fn reload_combinations_are_blocked() {
        assert_eq!(
            classify_key(&KeyInput::new("r").with_control()),
            Some(BlockedInput::Reload)
        );
        assert_eq!(
            classify_key(&KeyInput::new("R").with_meta()),
            Some(BlockedInput::Reload)
        );
        assert_eq!(classify_key(&KeyInput::new("F5")), Some(BlockedInput::Reload));
    }

    #[test]
    fn zoom_combinations_are_blocked() {
        for key in ["+", "=", "-", "0"] {
            assert_eq!(
                classify_key(&KeyInput::new(key).with_control()),
                Some(BlockedInput::Zoom),
                "{key}"
            );
        }
        assert_eq!(
            classify_wheel(&WheelInput {
                control: true,
                meta: false
            }),
            Some(BlockedInput::Zoom)
        );
    }

    #[test]
    fn devtools_combinations_are_blocked() {
        assert_eq!(
            classify_key(&KeyInput::new("I").with_control().with_shift()),
            Some(BlockedInput::DevTools)
        );
        assert_eq!(classify_key(&KeyInput::new("F12")), Some(BlockedInput::DevTools));
    }

    #[test]
    fn unmodified_keys_pass_through() {
        assert_eq!(classify_key(&KeyInput::new("r")), None);
        assert_eq!(classify_key(&KeyInput::new("0")), None);
        assert_eq!(classify_key(&KeyInput::new("i").with_control()), None);
        assert_eq!(classify_key(&KeyInput::new("a").with_control()), None);
        assert_eq!(classify_key(&KeyInput::new("")), None);
        assert_eq!(classify_wheel(&WheelInput::default()), None);
    }

    #[test]
    fn guard_script_matches_modifiers_like_the_rule_table() {
        let script = input_guard_script();
        assert!(script.contains(r#"var key = (event.key || "").toLowerCase();"#));
        assert!(script.contains("var modifier = event.ctrlKey || event.metaKey;"));
        assert!(script.contains(
            "rule.key === key && (!rule.modifier || modifier) && (!rule.shift || event.shiftKey)"
        ));
    }

    #[test]
    fn guard_script_listens_in_capture_phase() {
        let script = input_guard_script();
        assert!(script.contains(
            "window.addEventListener(\"keydown\", function (event) {\n    if (blocked(event)) suppress(event);\n  }, true);"
        ));
        assert!(script.contains(
            "if (event.ctrlKey || event.metaKey) suppress(event);\n  }, { capture: true, passive: false });"
        ));
        assert!(script.contains("event.stopImmediatePropagation();"));
        assert!(script.contains("window.addEventListener(\"gesturestart\", suppress, true);"));
    }

    #[test]
    fn guard_script_embeds_every_rule() {
        let script = input_guard_script();
        for shortcut in BLOCKED_SHORTCUTS {
            assert!(script.contains(&format!("\"key\":\"{}\"", shortcut.key)));
        }
        assert!(script.contains("\"kind\":\"dev_tools\""));
    }
}
