//! Screen navigation state.
//!
//! The current screen is a plain value owned by the session; any screen can
//! be reached from any other.

use log::debug;
use serde::{Deserialize, Serialize};

/// Top-level screens of the contact book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    ContactsList,
    Favorites,
    Trash,
    SaveContact,
}

impl Screen {
    /// Screens reachable from the bottom navigation bar.
    pub const BOTTOM_NAVIGATION: [Screen; 3] =
        [Screen::Favorites, Screen::ContactsList, Screen::Trash];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ContactsList => "contacts_list",
            Self::Favorites => "favorites",
            Self::Trash => "trash",
            Self::SaveContact => "save_contact",
        }
    }
}

/// Holds the current screen and applies navigation intents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Router {
    current: Screen,
}

impl Router {
    /// Creates a router positioned on the contacts list.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn navigate_to(&mut self, screen: Screen) {
        debug!(
            "event=navigate module=routing status=ok from={} to={}",
            self.current.as_str(),
            screen.as_str()
        );
        self.current = screen;
    }

    /// Back action: leaves the editor for the contacts list, otherwise stays.
    pub fn back(&mut self) -> Screen {
        if self.current == Screen::SaveContact {
            self.navigate_to(Screen::ContactsList);
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::{Router, Screen};

    #[test]
    fn starts_on_contacts_list() {
        assert_eq!(Router::new().current(), Screen::ContactsList);
    }

    #[test]
    fn any_screen_is_reachable_from_any_other() {
        let screens = [
            Screen::ContactsList,
            Screen::Favorites,
            Screen::Trash,
            Screen::SaveContact,
        ];
        for from in screens {
            for to in screens {
                let mut router = Router::new();
                router.navigate_to(from);
                router.navigate_to(to);
                assert_eq!(router.current(), to);
            }
        }
    }

    #[test]
    fn back_leaves_editor_only() {
        let mut router = Router::new();
        router.navigate_to(Screen::SaveContact);
        assert_eq!(router.back(), Screen::ContactsList);

        router.navigate_to(Screen::Trash);
        assert_eq!(router.back(), Screen::Trash);
    }
}
