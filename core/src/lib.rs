#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Terraquest engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! changed. Generation systems consume a [`WorldConfig`] and produce a
//! [`TerrainGrid`] plus placed content; nothing downstream mutates the grid
//! until the world is regenerated.

mod config;
mod errors;

pub use config::{WorldConfig, MAX_QUEST_COUNT, MAX_TERRAIN_PERCENT};
pub use errors::{
    ConfigurationError, GenerationError, MoveRejection, PlacementError, PlacementTarget,
};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Terraquest.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the stored generation parameters and regenerates the world.
    Configure {
        /// Parameters used for this and every later regeneration.
        config: WorldConfig,
    },
    /// Rebuilds terrain and content from the stored generation parameters.
    Regenerate,
    /// Requests that the agent advance a single cell in the specified direction.
    MoveAgent {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Runs the quest and door interaction rules against the agent's cell.
    CheckInteraction,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that terrain and content were rebuilt.
    WorldGenerated {
        /// Seed string the terrain was derived from.
        seed: String,
        /// Number of columns in the new grid.
        width: u32,
        /// Number of rows in the new grid.
        height: u32,
        /// Cell the agent was placed on.
        spawn: Position,
    },
    /// Reports that a generation attempt failed and the previous world was kept.
    GenerationRejected {
        /// Specific reason the attempt failed.
        error: GenerationError,
    },
    /// Confirms that the agent moved between two adjacent cells.
    AgentMoved {
        /// Cell the agent occupied before moving.
        from: Position,
        /// Cell the agent occupies after completing the move.
        to: Position,
    },
    /// Reports that a move request was blocked and the agent stayed in place.
    MoveRejected {
        /// Direction of the rejected step.
        direction: Direction,
        /// Specific reason the move failed.
        reason: MoveRejection,
    },
    /// Announces that a quest moved from unaccepted to accepted.
    QuestAccepted {
        /// Identifier of the accepted quest.
        quest: QuestId,
    },
    /// Announces that a quest was completed and removed from the active set.
    QuestCompleted {
        /// Identifier of the completed quest.
        quest: QuestId,
    },
    /// Announces that a door was unlocked by a completed quest.
    DoorUnlocked {
        /// Identifier of the unlocked door.
        door: DoorId,
    },
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing `y`.
    Up,
    /// Movement toward decreasing `y`.
    Down,
    /// Movement toward decreasing `x`.
    Left,
    /// Movement toward increasing `x`.
    Right,
}

/// Location of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u32,
    y: u32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Returns the adjacent position in `direction`, or `None` when the step
    /// would leave a `width` by `height` grid.
    #[must_use]
    pub fn step(self, direction: Direction, width: u32, height: u32) -> Option<Position> {
        let next = match direction {
            Direction::Up => Position::new(self.x, self.y.checked_add(1)?),
            Direction::Down => Position::new(self.x, self.y.checked_sub(1)?),
            Direction::Left => Position::new(self.x.checked_sub(1)?, self.y),
            Direction::Right => Position::new(self.x.checked_add(1)?, self.y),
        };
        (next.x < width && next.y < height).then_some(next)
    }
}

/// Terrain class assigned to every grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainType {
    /// Open water.
    Water,
    /// Coastline surrounding water.
    Sand,
    /// Open land; the only class the agent may spawn on.
    Grass,
    /// Impassable high ground.
    Mountain,
}

impl TerrainType {
    /// Reports whether the agent may stand on this terrain.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Self::Mountain)
    }
}

/// Dense width by height terrain layout.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    cells: Vec<TerrainType>,
}

impl TerrainGrid {
    /// Creates a grid with every cell set to `terrain`.
    ///
    /// Dimensions without a [`cell_count`](Self::cell_count) produce a grid
    /// with no cells; [`WorldConfig::validate_terrain`] rejects them first.
    #[must_use]
    pub fn filled(width: u32, height: u32, terrain: TerrainType) -> Self {
        Self {
            width,
            height,
            cells: vec![terrain; Self::cell_count(width, height).unwrap_or(0)],
        }
    }

    /// Number of cells in a `width` by `height` grid, or `None` when a single
    /// allocation cannot hold that many.
    #[must_use]
    pub fn cell_count(width: u32, height: u32) -> Option<usize> {
        let cells = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
        (cells <= isize::MAX as usize).then_some(cells)
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether `position` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() < self.width && position.y() < self.height
    }

    /// Returns the terrain at `position`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<TerrainType> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites the terrain at `position`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, position: Position, terrain: TerrainType) {
        if let Some(index) = self.index(position) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = terrain;
            }
        }
    }

    /// Counts the cells of class `terrain` among the up to eight neighbours of
    /// `position`. The cell itself is never counted.
    #[must_use]
    pub fn count_neighbors(&self, position: Position, terrain: TerrainType) -> u8 {
        let mut count = 0;
        for dx in -1_i64..=1 {
            for dy in -1_i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let x = i64::from(position.x()) + dx;
                let y = i64::from(position.y()) + dy;
                let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
                    continue;
                };
                if self.get(Position::new(x, y)) == Some(terrain) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of cells holding `terrain`.
    #[must_use]
    pub fn count(&self, terrain: TerrainType) -> usize {
        self.cells.iter().filter(|cell| **cell == terrain).count()
    }

    /// Iterates all cells in column-major order (`x` outer, `y` inner).
    pub fn iter(&self) -> impl Iterator<Item = (Position, TerrainType)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).filter_map(move |y| {
                let position = Position::new(x, y);
                self.get(position).map(|terrain| (position, terrain))
            })
        })
    }

    /// Reports whether `position` lies on the outermost ring of cells.
    #[must_use]
    pub const fn is_border(&self, position: Position) -> bool {
        position.x() == 0
            || position.y() == 0
            || position.x() + 1 == self.width
            || position.y() + 1 == self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        if self.contains(position) {
            let row = usize::try_from(position.y()).ok()?;
            let column = usize::try_from(position.x()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Flavour of quest, which decides whether a door is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestKind {
    /// Quest paired with a locked door at its start cell.
    Lock,
    /// Quest without a door.
    Kill,
}

impl QuestKind {
    /// Reports whether quests of this kind begin in the accepted state.
    ///
    /// A lock quest's start cell is covered by its own locked door, so it can
    /// never be accepted by standing on it and is accepted on creation.
    #[must_use]
    pub const fn starts_accepted(self) -> bool {
        matches!(self, Self::Lock)
    }

    /// Reports whether quests of this kind own a door.
    #[must_use]
    pub const fn has_door(self) -> bool {
        matches!(self, Self::Lock)
    }
}

/// Unique identifier assigned to a quest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestId(u32);

impl QuestId {
    /// Creates a new quest identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorId(u32);

impl DoorId {
    /// Creates a new door identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Content recorded against a single cell of the occupancy map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// A quest start or goal marker.
    Quest(QuestId),
    /// A door.
    Door(DoorId),
}

/// Dense per-cell record of which quest or door, if any, occupies a cell.
///
/// Each cell holds at most one occupant; a later write replaces an earlier one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyMap {
    width: u32,
    height: u32,
    cells: Vec<Option<Occupant>>,
}

impl OccupancyMap {
    /// Creates an empty occupancy map for a `width` by `height` grid.
    ///
    /// Sized like [`TerrainGrid::filled`], including its empty fallback.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; TerrainGrid::cell_count(width, height).unwrap_or(0)],
        }
    }

    /// Returns the occupant recorded at `position`, if any.
    #[must_use]
    pub fn occupant(&self, position: Position) -> Option<Occupant> {
        self.index(position)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }

    /// Records `occupant` at `position`, replacing any previous occupant.
    pub fn occupy(&mut self, position: Position, occupant: Occupant) {
        if let Some(index) = self.index(position) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = Some(occupant);
            }
        }
    }

    /// Clears the occupant recorded at `position`.
    pub fn vacate(&mut self, position: Position) {
        if let Some(index) = self.index(position) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = None;
            }
        }
    }

    /// Returns an iterator over every occupied cell.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Occupant)> + '_ {
        let width = self.width.max(1);
        self.cells.iter().enumerate().filter_map(move |(index, cell)| {
            let occupant = (*cell)?;
            let index = u32::try_from(index).ok()?;
            Some((Position::new(index % width, index / width), occupant))
        })
    }

    fn index(&self, position: Position) -> Option<usize> {
        if position.x() < self.width && position.y() < self.height {
            let row = usize::try_from(position.y()).ok()?;
            let column = usize::try_from(position.x()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Immutable representation of a single quest's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuestSnapshot {
    /// Unique identifier assigned to the quest.
    pub id: QuestId,
    /// Flavour of the quest.
    pub kind: QuestKind,
    /// Cell where the quest is accepted.
    pub start: Position,
    /// Cell where the quest is completed.
    pub goal: Position,
    /// Whether the quest has been accepted.
    pub accepted: bool,
    /// Whether the quest has been completed.
    pub completed: bool,
}

/// Immutable representation of a single door's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoorSnapshot {
    /// Unique identifier assigned to the door.
    pub id: DoorId,
    /// Cell the door stands on.
    pub position: Position,
    /// Whether the door currently blocks movement.
    pub locked: bool,
    /// Quest that created the door.
    pub quest: QuestId,
}
