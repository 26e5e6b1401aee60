//! Agent position and movement legality.

use terraquest_core::{Direction, MoveRejection, Position, TerrainGrid};

use crate::quests::DoorRegistry;

/// The single agent walking the grid.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Agent {
    position: Position,
}

impl Agent {
    pub(crate) const fn spawn(position: Position) -> Self {
        Self { position }
    }

    pub(crate) const fn position(&self) -> Position {
        self.position
    }

    /// Attempts a one-cell step. The agent stays in place when the step is rejected.
    pub(crate) fn step(
        &mut self,
        direction: Direction,
        terrain: &TerrainGrid,
        doors: &DoorRegistry,
    ) -> Result<Position, MoveRejection> {
        let target = resolve_step(self.position, direction, terrain, doors)?;
        self.position = target;
        Ok(target)
    }
}

/// Validates a step from `from` toward `direction`.
///
/// Only doors block movement; quest markers never do.
pub(crate) fn resolve_step(
    from: Position,
    direction: Direction,
    terrain: &TerrainGrid,
    doors: &DoorRegistry,
) -> Result<Position, MoveRejection> {
    let target = from
        .step(direction, terrain.width(), terrain.height())
        .ok_or(MoveRejection::OutOfBounds)?;

    let kind = terrain.get(target).ok_or(MoveRejection::OutOfBounds)?;
    if !kind.is_passable() {
        return Err(MoveRejection::Impassable { terrain: kind });
    }

    if let Some(door) = doors.locked_at(target) {
        return Err(MoveRejection::LockedDoor { door });
    }

    Ok(target)
}
