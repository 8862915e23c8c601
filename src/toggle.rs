use std::collections::HashMap;

use uuid::Uuid;

use crate::lang::MessageKey;

/// Per-player display switch. Players start with the display off.
#[derive(Debug, Default)]
pub struct DisplayToggles {
    enabled: HashMap<Uuid, bool>,
}

impl DisplayToggles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, player: Uuid) -> bool {
        self.enabled.get(&player).copied().unwrap_or(false)
    }

    /// Flips the player's switch and returns the new state.
    pub fn toggle(&mut self, player: Uuid) -> bool {
        let entry = self.enabled.entry(player).or_insert(false);
        *entry = !*entry;
        *entry
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

/// Who ran `/lightlevel`.
#[derive(Clone, Copy, Debug)]
pub enum Invoker {
    Console,
    Player { id: Uuid, permitted: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleReply {
    NotAPlayer,
    NoPermission,
    Toggled { enabled: bool },
}

impl ToggleReply {
    pub fn message_key(self) -> MessageKey {
        match self {
            Self::NotAPlayer => MessageKey::NotAPlayer,
            Self::NoPermission => MessageKey::NoPermission,
            Self::Toggled { enabled: true } => MessageKey::DisplayEnabled,
            Self::Toggled { enabled: false } => MessageKey::DisplayDisabled,
        }
    }
}

/// Runs the toggle command. Rejected invocations leave the map untouched.
pub fn toggle_display(toggles: &mut DisplayToggles, invoker: Invoker) -> ToggleReply {
    match invoker {
        Invoker::Console => ToggleReply::NotAPlayer,
        Invoker::Player {
            permitted: false, ..
        } => ToggleReply::NoPermission,
        Invoker::Player { id, .. } => {
            let enabled = toggles.toggle(id);
            log::debug!("Light level display for {id} is now {enabled}");
            ToggleReply::Toggled { enabled }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn defaults_to_disabled() {
        let toggles = DisplayToggles::new();
        assert!(!toggles.is_enabled(player(1)));
        assert!(toggles.is_empty());
    }

    #[test]
    fn toggling_twice_restores_state() {
        let mut toggles = DisplayToggles::new();
        let id = player(1);
        assert!(toggles.toggle(id));
        assert!(toggles.is_enabled(id));
        assert!(!toggles.toggle(id));
        assert!(!toggles.is_enabled(id));
        assert!(!toggles.is_empty());
    }

    #[test]
    fn players_are_independent() {
        let mut toggles = DisplayToggles::new();
        toggles.toggle(player(1));
        assert!(toggles.is_enabled(player(1)));
        assert!(!toggles.is_enabled(player(2)));
    }

    #[test]
    fn console_is_rejected_without_state_change() {
        let mut toggles = DisplayToggles::new();
        let reply = toggle_display(&mut toggles, Invoker::Console);
        assert_eq!(reply, ToggleReply::NotAPlayer);
        assert_eq!(reply.message_key(), MessageKey::NotAPlayer);
        assert!(toggles.is_empty());
    }

    #[test]
    fn missing_permission_is_rejected_without_state_change() {
        let mut toggles = DisplayToggles::new();
        let reply = toggle_display(
            &mut toggles,
            Invoker::Player {
                id: player(7),
                permitted: false,
            },
        );
        assert_eq!(reply.message_key(), MessageKey::NoPermission);
        assert!(!toggles.is_enabled(player(7)));
        assert!(toggles.is_empty());
    }

    #[test]
    fn permitted_player_gets_matching_reply() {
        let mut toggles = DisplayToggles::new();
        let invoker = Invoker::Player {
            id: player(3),
            permitted: true,
        };
        assert_eq!(
            toggle_display(&mut toggles, invoker).message_key(),
            MessageKey::DisplayEnabled
        );
        assert_eq!(
            toggle_display(&mut toggles, invoker).message_key(),
            MessageKey::DisplayDisabled
        );
    }
}
