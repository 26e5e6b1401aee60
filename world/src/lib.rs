#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Terraquest.
//!
//! The world owns the generated terrain, the agent, the quest and door
//! registries and the occupancy map. Every mutation flows through [`apply`],
//! which executes one [`Command`] to completion and reports what happened as
//! [`Event`] values. Callers must serialise all commands from a single control
//! path; the world performs no internal synchronisation.

mod agent;
mod quests;

use terraquest_core::{
    Command, Direction, Event, GenerationError, Occupant, OccupancyMap, Position, TerrainGrid,
    WorldConfig, WELCOME_BANNER,
};
use terraquest_system_content::{ContentPlacer, Placement, CONTENT_STREAM};
use terraquest_system_terrain::{generate, SeededRng};
use tracing::{debug, info, warn};

use agent::Agent;
use quests::{DoorRegistry, QuestRegistry};

/// Represents the authoritative Terraquest world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    seed: String,
    terrain: TerrainGrid,
    agent: Agent,
    quests: QuestRegistry,
    doors: DoorRegistry,
    occupancy: OccupancyMap,
}

/// Fully built terrain and content, not yet installed into a world.
struct Generated {
    seed: String,
    terrain: TerrainGrid,
    placement: Placement,
}

impl World {
    /// Generates a new world from `config`.
    pub fn new(config: WorldConfig) -> Result<Self, GenerationError> {
        let Generated {
            seed,
            terrain,
            placement,
        } = build(&config)?;
        Ok(Self::with_layout(config, seed, terrain, placement))
    }

    /// Assembles a world from terrain and content produced elsewhere.
    ///
    /// `config` is kept for later regenerations; `seed` is reported as the
    /// seed of the supplied terrain.
    #[must_use]
    pub fn with_layout(
        config: WorldConfig,
        seed: impl Into<String>,
        terrain: TerrainGrid,
        placement: Placement,
    ) -> Self {
        let world = Self {
            banner: WELCOME_BANNER,
            config,
            seed: seed.into(),
            terrain,
            agent: Agent::spawn(placement.agent_spawn),
            quests: QuestRegistry::from_placed(&placement.quests),
            doors: DoorRegistry::from_placed(&placement.doors),
            occupancy: placement.occupancy,
        };
        info!(
            seed = %world.seed,
            width = world.terrain.width(),
            height = world.terrain.height(),
            quests = world.quests.iter().count(),
            "world_generated"
        );
        world
    }

    fn install(&mut self, generated: Generated, out_events: &mut Vec<Event>) {
        let Generated {
            seed,
            terrain,
            placement,
        } = generated;
        let spawn = placement.agent_spawn;

        self.agent = Agent::spawn(spawn);
        self.quests = QuestRegistry::from_placed(&placement.quests);
        self.doors = DoorRegistry::from_placed(&placement.doors);
        self.occupancy = placement.occupancy;
        self.terrain = terrain;
        self.seed = seed;

        info!(
            seed = %self.seed,
            width = self.terrain.width(),
            height = self.terrain.height(),
            "world_generated"
        );
        out_events.push(Event::WorldGenerated {
            seed: self.seed.clone(),
            width: self.terrain.width(),
            height: self.terrain.height(),
            spawn,
        });
    }

    fn regenerate(&mut self, config: WorldConfig, out_events: &mut Vec<Event>) {
        match build(&config) {
            Ok(generated) => {
                self.config = config;
                self.install(generated, out_events);
            }
            Err(error) => {
                warn!(%error, "generation_rejected");
                out_events.push(Event::GenerationRejected { error });
            }
        }
    }

    fn move_agent(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.agent.position();
        match self.agent.step(direction, &self.terrain, &self.doors) {
            Ok(to) => {
                debug!(?direction, x = to.x(), y = to.y(), "agent_moved");
                out_events.push(Event::AgentMoved { from, to });
            }
            Err(reason) => {
                debug!(?direction, ?reason, "move_rejected");
                out_events.push(Event::MoveRejected { direction, reason });
            }
        }
    }

    /// Runs the quest state machine against the agent's current cell.
    fn check_interaction(&mut self, out_events: &mut Vec<Event>) {
        let position = self.agent.position();
        let Some(Occupant::Quest(quest_id)) = self.occupancy.occupant(position) else {
            return;
        };
        let Some(index) = self.quests.index_of(quest_id) else {
            return;
        };
        let Some(quest) = self.quests.get_mut(index) else {
            return;
        };

        if position == quest.start {
            if quest.accept() {
                info!(quest = quest_id.get(), "quest_accepted");
                out_events.push(Event::QuestAccepted { quest: quest_id });
            }
            return;
        }

        if position != quest.goal || !quest.accepted {
            return;
        }

        quest.completed = true;
        let (start, goal) = (quest.start, quest.goal);

        if let Some(Occupant::Door(door)) = self.occupancy.occupant(start) {
            if self.doors.unlock(door) {
                info!(door = door.get(), quest = quest_id.get(), "door_unlocked");
                out_events.push(Event::DoorUnlocked { door });
            }
        }
        clear_marker(&mut self.occupancy, start);
        clear_marker(&mut self.occupancy, goal);
        let _ = self.quests.remove(index);

        info!(quest = quest_id.get(), "quest_completed");
        out_events.push(Event::QuestCompleted { quest: quest_id });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Configure { config } => world.regenerate(config, out_events),
        Command::Regenerate => {
            let config = world.config.clone();
            world.regenerate(config, out_events);
        }
        Command::MoveAgent { direction } => world.move_agent(direction, out_events),
        Command::CheckInteraction => world.check_interaction(out_events),
    }
}

/// Builds terrain and content without touching any existing world state.
fn build(config: &WorldConfig) -> Result<Generated, GenerationError> {
    config.validate()?;
    let terrain = generate(config)?;
    let mut rng = SeededRng::labeled(&terrain.seed, CONTENT_STREAM);
    let placement = ContentPlacer::new(&terrain.grid).place(config.quest_count, &mut rng)?;
    Ok(Generated {
        seed: terrain.seed,
        terrain: terrain.grid,
        placement,
    })
}

/// Removes quest markers from `position`. Doors outlive their quests and stay.
fn clear_marker(occupancy: &mut OccupancyMap, position: Position) {
    if !matches!(occupancy.occupant(position), Some(Occupant::Door(_))) {
        occupancy.vacate(position);
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use terraquest_core::{
        DoorSnapshot, Occupant, OccupancyMap, Position, QuestSnapshot, TerrainGrid, WorldConfig,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Generation parameters used for the current and the next regeneration.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Seed string the current terrain was derived from.
    #[must_use]
    pub fn seed(world: &World) -> &str {
        &world.seed
    }

    /// Provides read-only access to the generated terrain.
    #[must_use]
    pub fn terrain(world: &World) -> &TerrainGrid {
        &world.terrain
    }

    /// Cell currently occupied by the agent.
    #[must_use]
    pub fn agent_position(world: &World) -> Position {
        world.agent.position()
    }

    /// Snapshots of every active quest in registry order.
    #[must_use]
    pub fn quests(world: &World) -> Vec<QuestSnapshot> {
        world.quests.iter().map(|quest| quest.snapshot()).collect()
    }

    /// Snapshots of every door ordered by identifier.
    #[must_use]
    pub fn doors(world: &World) -> Vec<DoorSnapshot> {
        world.doors.iter().map(|door| door.snapshot()).collect()
    }

    /// Provides read-only access to the occupancy map.
    #[must_use]
    pub fn occupancy(world: &World) -> &OccupancyMap {
        &world.occupancy
    }

    /// Returns the occupant recorded at `position`, if any.
    #[must_use]
    pub fn occupant(world: &World, position: Position) -> Option<Occupant> {
        world.occupancy.occupant(position)
    }
}
