#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded cellular-automaton terrain generation.
//!
//! A grid is filled with random water, mountain and grass, then smoothed in
//! place. Smoothing deliberately mutates the grid while it is being scanned so
//! that cells visited later in a pass observe the updates made earlier in the
//! same pass; the output for a given seed depends on that order.

mod rng;

pub use rng::SeededRng;

use terraquest_core::{ConfigurationError, Position, TerrainGrid, TerrainType, WorldConfig};
use tracing::{debug, info};

/// Exclusive upper bound of the per-cell fill draws.
pub const FILL_RANGE: u32 = 80;

/// Number of composite smoothing passes applied after the fill.
pub const SMOOTHING_PASSES: usize = 5;

/// Number of sand spreading sweeps run at the end of every smoothing pass.
pub const SAND_PASSES: usize = 3;

/// Terrain produced by [`generate`] together with the seed it was derived from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTerrain {
    /// Seed string actually used, clock-derived when a random seed was requested.
    pub seed: String,
    /// Smoothed terrain grid.
    pub grid: TerrainGrid,
}

/// Generates a smoothed terrain grid from the terrain fields of `config`.
///
/// The quest count is ignored here; it is a placement concern.
pub fn generate(config: &WorldConfig) -> Result<GeneratedTerrain, ConfigurationError> {
    config.validate_terrain()?;

    let mut rng = SeededRng::resolve(&config.seed, config.use_random_seed);
    if config.use_random_seed {
        info!(seed = rng.seed(), "map_seed_resolved");
    }
    debug!(
        seed = rng.seed(),
        width = config.width,
        height = config.height,
        water_percent = config.water_percent,
        mountain_percent = config.mountain_percent,
        "terrain_generation_started"
    );

    let mut grid = TerrainGrid::filled(config.width, config.height, TerrainType::Grass);
    random_fill(
        &mut grid,
        &mut rng,
        u32::from(config.water_percent),
        u32::from(config.mountain_percent),
    );
    for _ in 0..SMOOTHING_PASSES {
        smooth_pass(&mut grid);
    }
    enforce_grass_border(&mut grid);

    Ok(GeneratedTerrain {
        seed: rng.seed().to_owned(),
        grid,
    })
}

/// Assigns every cell its initial terrain.
///
/// Border cells are grass. Every interior cell draws two values in
/// `0..FILL_RANGE`: the first picks water, the second picks mountain, and
/// anything else is grass. Sand is never produced here.
pub fn random_fill(grid: &mut TerrainGrid, rng: &mut SeededRng, water: u32, mountain: u32) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let position = Position::new(x, y);
            if grid.is_border(position) {
                grid.set(position, TerrainType::Grass);
                continue;
            }

            let water_roll = rng.below(FILL_RANGE);
            let mountain_roll = rng.below(FILL_RANGE);
            let terrain = if water_roll < water {
                TerrainType::Water
            } else if mountain_roll < mountain {
                TerrainType::Mountain
            } else {
                TerrainType::Grass
            };
            grid.set(position, terrain);
        }
    }
}

/// Runs one composite smoothing pass in place, followed by the sand sweeps.
pub fn smooth_pass(grid: &mut TerrainGrid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            smooth_cell(grid, Position::new(x, y));
        }
    }

    for _ in 0..SAND_PASSES {
        spread_sand(grid);
    }
}

fn smooth_cell(grid: &mut TerrainGrid, position: Position) {
    let water = grid.count_neighbors(position, TerrainType::Water);
    let grass = grid.count_neighbors(position, TerrainType::Grass);
    let mountain = grid.count_neighbors(position, TerrainType::Mountain);

    if water > 3 {
        grid.set(position, TerrainType::Water);
    } else if mountain > 3 {
        grid.set(position, TerrainType::Mountain);
    } else if grass > 4 {
        grid.set(position, TerrainType::Grass);
    }

    let Some(mut terrain) = grid.get(position) else {
        return;
    };

    // Isolated mountains and ponds erode.
    if terrain == TerrainType::Mountain && mountain < 2 {
        terrain = TerrainType::Grass;
    }
    if terrain == TerrainType::Water && water < 2 {
        terrain = TerrainType::Grass;
    }

    if matches!(terrain, TerrainType::Grass | TerrainType::Mountain) && water > 1 {
        terrain = TerrainType::Sand;
    }
    grid.set(position, terrain);
}

/// Turns grass and mountain cells with more than four sand neighbours into sand.
pub fn spread_sand(grid: &mut TerrainGrid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let position = Position::new(x, y);
            let sand = grid.count_neighbors(position, TerrainType::Sand);
            let convertible = matches!(
                grid.get(position),
                Some(TerrainType::Grass | TerrainType::Mountain)
            );
            if convertible && sand > 4 {
                grid.set(position, TerrainType::Sand);
            }
        }
    }
}

fn enforce_grass_border(grid: &mut TerrainGrid) {
    for x in 0..grid.width() {
        for y in 0..grid.height() {
            let position = Position::new(x, y);
            if grid.is_border(position) {
                grid.set(position, TerrainType::Grass);
            }
        }
    }
}
