#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayMenuAction {
    ToggleWindow,
    ReloadWindow,
    Quit,
}

impl TrayMenuAction {
    pub const ALL: [Self; 3] = [Self::ToggleWindow, Self::ReloadWindow, Self::Quit];

    pub fn menu_id(self) -> &'static str {
        match self {
            Self::ToggleWindow => "tray_toggle_window",
            Self::ReloadWindow => "tray_reload_window",
            Self::Quit => "tray_quit",
        }
    }

    pub fn from_menu_id(menu_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.menu_id() == menu_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_is_found_by_its_own_menu_id() {
        for action in TrayMenuAction::ALL {
            assert_eq!(TrayMenuAction::from_menu_id(action.menu_id()), Some(action));
        }
    }

    #[test]
    fn menu_ids_are_distinct() {
        let ids: Vec<&str> = TrayMenuAction::ALL.iter().map(|a| a.menu_id()).collect();
        for (index, id) in ids.iter().enumerate() {
            assert!(!ids[index + 1..].contains(id), "{id} is duplicated");
        }
    }

    #[test]
    fn unknown_menu_id_is_ignored() {
        assert_eq!(TrayMenuAction::from_menu_id("tray_restart_backend"), None);
        assert_eq!(TrayMenuAction::from_menu_id(""), None);
    }
}
