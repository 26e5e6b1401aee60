use terraquest_core::{
    Occupant, PlacementError, PlacementTarget, QuestKind, TerrainGrid, TerrainType, WorldConfig,
};
use terraquest_system_content::{ContentPlacer, Placement, CONTENT_STREAM};
use terraquest_system_terrain::{generate, SeededRng};

fn generated(seed: &str, water: u8, mountain: u8) -> TerrainGrid {
    let config = WorldConfig {
        width: 32,
        height: 24,
        seed: seed.to_owned(),
        use_random_seed: false,
        water_percent: water,
        mountain_percent: mountain,
        quest_count: 3,
    };
    generate(&config).expect("valid config").grid
}

fn place(grid: &TerrainGrid, seed: &str, quests: u32) -> Placement {
    let mut rng = SeededRng::labeled(seed, CONTENT_STREAM);
    ContentPlacer::new(grid)
        .place(quests, &mut rng)
        .expect("placement succeeds")
}

#[test]
fn all_grass_grid_places_on_the_first_draw() {
    let grid = TerrainGrid::filled(5, 5, TerrainType::Grass);
    let mut rng = SeededRng::from_seed_str("abc");
    let placement = ContentPlacer::new(&grid)
        .with_max_attempts(1)
        .place(3, &mut rng)
        .expect("every cell is eligible");

    assert_eq!(grid.get(placement.agent_spawn), Some(TerrainType::Grass));
    assert_eq!(placement.quests.len(), 3);
}

#[test]
fn agent_spawns_on_grass() {
    for seed in ["a", "b", "c", "d"] {
        let grid = generated(seed, 30, 30);
        let placement = place(&grid, seed, 3);
        assert_eq!(grid.get(placement.agent_spawn), Some(TerrainType::Grass));
    }
}

#[test]
fn quest_cells_are_never_mountains() {
    for seed in ["north", "south", "east", "west", "peak"] {
        let grid = generated(seed, 20, 40);
        let placement = place(&grid, seed, 3);
        for quest in &placement.quests {
            assert_ne!(grid.get(quest.start), Some(TerrainType::Mountain));
            assert_ne!(grid.get(quest.goal), Some(TerrainType::Mountain));
        }
    }
}

#[test]
fn lock_quests_get_exactly_one_door_at_their_start() {
    let grid = TerrainGrid::filled(16, 16, TerrainType::Grass);
    let mut rng = SeededRng::from_seed_str("doors");
    let mut placement = ContentPlacer::new(&grid)
        .place(0, &mut rng)
        .expect("grass everywhere");
    let placer = ContentPlacer::new(&grid);
    let lock = placer
        .create_quest(&mut placement, QuestKind::Lock, &mut rng)
        .expect("grass everywhere");
    let kill = placer
        .create_quest(&mut placement, QuestKind::Kill, &mut rng)
        .expect("grass everywhere");

    let lock_quest = placement.quests[0];
    assert_eq!(lock_quest.id, lock);
    let doors: Vec<_> = placement
        .doors
        .iter()
        .filter(|door| door.quest == lock)
        .collect();
    assert_eq!(doors.len(), 1);
    assert_eq!(doors[0].position, lock_quest.start);
    assert!(placement.doors.iter().all(|door| door.quest != kill));
}

#[test]
fn door_replaces_quest_marker_on_start_cell() {
    let grid = TerrainGrid::filled(64, 64, TerrainType::Grass);
    let mut rng = SeededRng::from_seed_str("marker");
    let mut placement = Placement::new(grid_center(&grid), 64, 64);
    let placer = ContentPlacer::new(&grid);
    let quest = placer
        .create_quest(&mut placement, QuestKind::Lock, &mut rng)
        .expect("grass everywhere");

    let placed = placement.quests[0];
    let door = placement.doors[0];
    assert_eq!(
        placement.occupancy.occupant(placed.start),
        Some(Occupant::Door(door.id))
    );
    if placed.goal != placed.start {
        assert_eq!(
            placement.occupancy.occupant(placed.goal),
            Some(Occupant::Quest(quest))
        );
    }
}

#[test]
fn same_seed_reproduces_placement() {
    let grid = generated("replay", 25, 15);
    assert_eq!(place(&grid, "replay", 3), place(&grid, "replay", 3));
}

#[test]
fn zero_quests_still_spawns_the_agent() {
    let grid = generated("empty", 25, 15);
    let placement = place(&grid, "empty", 0);
    assert!(placement.quests.is_empty());
    assert!(placement.doors.is_empty());
    assert_eq!(placement.occupancy.iter().count(), 0);
}

#[test]
fn missing_grass_exhausts_the_spawn_search() {
    let grid = TerrainGrid::filled(8, 8, TerrainType::Sand);
    let mut rng = SeededRng::from_seed_str("beach");
    let error = ContentPlacer::new(&grid)
        .with_max_attempts(50)
        .place(2, &mut rng)
        .expect_err("sand is not a spawn cell");

    assert_eq!(
        error,
        PlacementError::Exhausted {
            target: PlacementTarget::AgentSpawn,
            attempts: 50,
        }
    );
}

fn grid_center(grid: &TerrainGrid) -> terraquest_core::Position {
    terraquest_core::Position::new(grid.width() / 2, grid.height() / 2)
}
