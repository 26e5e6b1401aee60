//! Generation parameters and the validation policy applied before any work begins.

use serde::{Deserialize, Serialize};

use crate::{ConfigurationError, TerrainGrid};

/// Largest water or mountain percentage accepted by [`WorldConfig::validate`].
pub const MAX_TERRAIN_PERCENT: u8 = 40;

/// Largest quest count accepted by [`WorldConfig::validate`].
pub const MAX_QUEST_COUNT: u32 = 3;

/// Parameters describing how a world is generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of grid columns.
    pub width: u32,
    /// Number of grid rows.
    pub height: u32,
    /// Seed string used when `use_random_seed` is false.
    pub seed: String,
    /// Derives a fresh seed from the clock on every generation.
    pub use_random_seed: bool,
    /// Chance out of 80 that an interior cell starts as water.
    pub water_percent: u8,
    /// Chance out of 80 that a non-water interior cell starts as mountain.
    pub mountain_percent: u8,
    /// Number of quests to place.
    pub quest_count: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            seed: String::from("terraquest"),
            use_random_seed: false,
            water_percent: 25,
            mountain_percent: 15,
            quest_count: MAX_QUEST_COUNT,
        }
    }
}

impl WorldConfig {
    /// Checks every field against the accepted ranges.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.validate_terrain()?;
        if self.quest_count > MAX_QUEST_COUNT {
            return Err(ConfigurationError::QuestCountOutOfRange(self.quest_count));
        }
        Ok(())
    }

    /// Checks the fields consumed by terrain generation, ignoring quest policy.
    pub fn validate_terrain(&self) -> Result<(), ConfigurationError> {
        if self.width == 0 {
            return Err(ConfigurationError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigurationError::ZeroHeight);
        }
        if TerrainGrid::cell_count(self.width, self.height).is_none() {
            return Err(ConfigurationError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.water_percent > MAX_TERRAIN_PERCENT {
            return Err(ConfigurationError::WaterPercentOutOfRange(
                self.water_percent,
            ));
        }
        if self.mountain_percent > MAX_TERRAIN_PERCENT {
            return Err(ConfigurationError::MountainPercentOutOfRange(
                self.mountain_percent,
            ));
        }
        Ok(())
    }
}
