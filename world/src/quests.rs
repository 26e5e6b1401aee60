//! Authoritative quest and door state.

use std::collections::BTreeMap;

use terraquest_core::{DoorId, DoorSnapshot, Position, QuestId, QuestKind, QuestSnapshot};
use terraquest_system_content::{PlacedDoor, PlacedQuest};

/// Live state of a quest stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct QuestState {
    pub(crate) id: QuestId,
    pub(crate) kind: QuestKind,
    pub(crate) start: Position,
    pub(crate) goal: Position,
    pub(crate) accepted: bool,
    pub(crate) completed: bool,
}

impl QuestState {
    fn from_placed(placed: PlacedQuest) -> Self {
        Self {
            id: placed.id,
            kind: placed.kind,
            start: placed.start,
            goal: placed.goal,
            accepted: placed.kind.starts_accepted(),
            completed: false,
        }
    }

    /// Marks the quest accepted. Returns `true` when the state changed.
    pub(crate) fn accept(&mut self) -> bool {
        if self.accepted || self.completed {
            return false;
        }
        self.accepted = true;
        true
    }

    pub(crate) fn snapshot(&self) -> QuestSnapshot {
        QuestSnapshot {
            id: self.id,
            kind: self.kind,
            start: self.start,
            goal: self.goal,
            accepted: self.accepted,
            completed: self.completed,
        }
    }
}

/// Ordered collection of active quests.
#[derive(Debug, Default)]
pub(crate) struct QuestRegistry {
    entries: Vec<QuestState>,
}

impl QuestRegistry {
    pub(crate) fn from_placed(placed: &[PlacedQuest]) -> Self {
        Self {
            entries: placed.iter().copied().map(QuestState::from_placed).collect(),
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &QuestState> {
        self.entries.iter()
    }

    /// Position of the first active quest with identifier `id`.
    pub(crate) fn index_of(&self, id: QuestId) -> Option<usize> {
        self.entries.iter().position(|quest| quest.id == id)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut QuestState> {
        self.entries.get_mut(index)
    }

    /// Removes the quest at `index` permanently.
    pub(crate) fn remove(&mut self, index: usize) -> Option<QuestState> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }
}

/// Live state of a door stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct DoorState {
    pub(crate) id: DoorId,
    pub(crate) position: Position,
    pub(crate) locked: bool,
    pub(crate) quest: QuestId,
}

impl DoorState {
    pub(crate) fn snapshot(&self) -> DoorSnapshot {
        DoorSnapshot {
            id: self.id,
            position: self.position,
            locked: self.locked,
            quest: self.quest,
        }
    }
}

/// Registry of every door, independent of whether its quest is still active.
#[derive(Debug, Default)]
pub(crate) struct DoorRegistry {
    entries: BTreeMap<DoorId, DoorState>,
}

impl DoorRegistry {
    pub(crate) fn from_placed(placed: &[PlacedDoor]) -> Self {
        let entries = placed
            .iter()
            .map(|door| {
                (
                    door.id,
                    DoorState {
                        id: door.id,
                        position: door.position,
                        locked: true,
                        quest: door.quest,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &DoorState> {
        self.entries.values()
    }

    /// First locked door standing on `position`, if any.
    pub(crate) fn locked_at(&self, position: Position) -> Option<DoorId> {
        self.entries
            .values()
            .find(|door| door.position == position && door.locked)
            .map(|door| door.id)
    }

    /// Unlocks `door`. Returns `true` when the door was locked before.
    pub(crate) fn unlock(&mut self, door: DoorId) -> bool {
        match self.entries.get_mut(&door) {
            Some(state) if state.locked => {
                state.locked = false;
                true
            }
            _ => false,
        }
    }
}
