//! Error taxonomy reported by generation and the outcome of rejected moves.

use thiserror::Error;

use crate::{DoorId, TerrainType};

/// Generation parameters that fall outside the accepted ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The grid must have at least one column.
    #[error("width must be positive")]
    ZeroWidth,
    /// The grid must have at least one row.
    #[error("height must be positive")]
    ZeroHeight,
    /// The water percentage exceeded the accepted maximum.
    #[error("water percent must be within 0..=40 (received {0})")]
    WaterPercentOutOfRange(u8),
    /// The mountain percentage exceeded the accepted maximum.
    #[error("mountain percent must be within 0..=40 (received {0})")]
    MountainPercentOutOfRange(u8),
    /// The grid holds more cells than can be addressed on this target.
    #[error("a {width}x{height} grid has too many cells")]
    GridTooLarge {
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// The quest count exceeded the accepted maximum.
    #[error("quest count must be within 0..=3 (received {0})")]
    QuestCountOutOfRange(u32),
}

/// Cell being searched for when rejection sampling gave up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementTarget {
    /// Grass cell for the agent spawn.
    AgentSpawn,
    /// Non-mountain cell for a quest start.
    QuestStart,
    /// Non-mountain cell for a quest goal.
    QuestGoal,
}

impl PlacementTarget {
    /// Human readable description of the terrain being searched for.
    #[must_use]
    pub const fn eligible_terrain(self) -> &'static str {
        match self {
            Self::AgentSpawn => "grass",
            Self::QuestStart | Self::QuestGoal => "non-mountain",
        }
    }
}

/// Content placement failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Rejection sampling exceeded its retry budget.
    #[error("no eligible {} cell found after {attempts} attempts", .target.eligible_terrain())]
    Exhausted {
        /// Cell that could not be placed.
        target: PlacementTarget,
        /// Number of draws made before giving up.
        attempts: u32,
    },
}

/// Any failure that aborts a generation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The generation parameters were rejected before any work began.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// Content could not be placed on the generated terrain.
    #[error("placement failed: {0}")]
    Placement(#[from] PlacementError),
}

/// Reasons a move request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The target cell lies outside the grid.
    OutOfBounds,
    /// The target cell's terrain cannot be entered.
    Impassable {
        /// Terrain found at the target cell.
        terrain: TerrainType,
    },
    /// A locked door stands on the target cell.
    LockedDoor {
        /// Door that blocked the move.
        door: DoorId,
    },
}
