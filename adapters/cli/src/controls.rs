//! Key bindings and the translation of player intents into world commands.

use terraquest_core::{Command, Direction, Event, MoveRejection};
use terraquest_rendering::InputAction;

/// Maps a typed key to the action it is bound to.
pub(crate) fn action_for_key(key: char) -> Option<InputAction> {
    match key.to_ascii_lowercase() {
        'w' | 'k' => Some(InputAction::MoveUp),
        's' | 'j' => Some(InputAction::MoveDown),
        'a' | 'h' => Some(InputAction::MoveLeft),
        'd' | 'l' => Some(InputAction::MoveRight),
        'e' | ' ' => Some(InputAction::Interact),
        'r' => Some(InputAction::Regenerate),
        'q' => Some(InputAction::Quit),
        _ => None,
    }
}

/// World command issued for `action`. Quitting is an adapter concern.
pub(crate) fn command_for(action: InputAction) -> Option<Command> {
    let direction = match action {
        InputAction::MoveUp => Direction::Up,
        InputAction::MoveDown => Direction::Down,
        InputAction::MoveLeft => Direction::Left,
        InputAction::MoveRight => Direction::Right,
        InputAction::Interact => return Some(Command::CheckInteraction),
        InputAction::Regenerate => return Some(Command::Regenerate),
        InputAction::Quit => return None,
    };
    Some(Command::MoveAgent { direction })
}

/// One-line notice for events worth showing next to the map.
pub(crate) fn describe(event: &Event) -> Option<String> {
    let notice = match event {
        Event::WorldGenerated {
            seed,
            width,
            height,
            ..
        } => format!("generated a {width}x{height} world from seed {seed}"),
        Event::GenerationRejected { error } => format!("regeneration rejected: {error}"),
        Event::AgentMoved { .. } => return None,
        Event::MoveRejected { reason, .. } => match reason {
            MoveRejection::OutOfBounds => "the edge of the map blocks the way".to_owned(),
            MoveRejection::Impassable { terrain } => format!("{terrain:?} blocks the way"),
            MoveRejection::LockedDoor { door } => format!("door {} is locked", door.get()),
        },
        Event::QuestAccepted { quest } => format!("quest {} accepted", quest.get()),
        Event::QuestCompleted { quest } => format!("quest {} completed", quest.get()),
        Event::DoorUnlocked { door } => format!("door {} unlocked", door.get()),
    };
    Some(notice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terraquest_core::{DoorId, Position, QuestId, TerrainType};

    #[test]
    fn vi_and_wasd_keys_share_directions() {
        for (keys, action) in [
            (['w', 'k'], InputAction::MoveUp),
            (['s', 'j'], InputAction::MoveDown),
            (['a', 'h'], InputAction::MoveLeft),
            (['d', 'l'], InputAction::MoveRight),
            (['e', ' '], InputAction::Interact),
        ] {
            for key in keys {
                assert_eq!(action_for_key(key), Some(action), "key {key:?}");
            }
        }
        assert_eq!(action_for_key('R'), Some(InputAction::Regenerate));
        assert_eq!(action_for_key('q'), Some(InputAction::Quit));
        assert_eq!(action_for_key('x'), None);
    }

    #[test]
    fn actions_translate_to_world_commands() {
        assert_eq!(
            command_for(InputAction::MoveLeft),
            Some(Command::MoveAgent {
                direction: Direction::Left
            })
        );
        assert_eq!(
            command_for(InputAction::Interact),
            Some(Command::CheckInteraction)
        );
        assert_eq!(
            command_for(InputAction::Regenerate),
            Some(Command::Regenerate)
        );
        assert_eq!(command_for(InputAction::Quit), None);
    }

    #[test]
    fn notices_skip_plain_moves() {
        let moved = Event::AgentMoved {
            from: Position::new(0, 0),
            to: Position::new(0, 1),
        };
        assert_eq!(describe(&moved), None);

        let blocked = Event::MoveRejected {
            direction: Direction::Up,
            reason: MoveRejection::Impassable {
                terrain: TerrainType::Mountain,
            },
        };
        assert_eq!(describe(&blocked).as_deref(), Some("Mountain blocks the way"));
        assert_eq!(
            describe(&Event::DoorUnlocked {
                door: DoorId::new(2)
            })
            .as_deref(),
            Some("door 2 unlocked")
        );
        assert_eq!(
            describe(&Event::QuestAccepted {
                quest: QuestId::new(1)
            })
            .as_deref(),
            Some("quest 1 accepted")
        );
    }
}
