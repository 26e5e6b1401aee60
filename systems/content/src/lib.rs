#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Places the agent spawn, quests and lock doors onto generated terrain.

use terraquest_core::{
    DoorId, Occupant, OccupancyMap, PlacementError, PlacementTarget, Position, QuestId, QuestKind,
    TerrainGrid, TerrainType,
};
use terraquest_system_terrain::SeededRng;
use tracing::{debug, warn};

/// Label separating the content stream from the terrain stream of a seed.
pub const CONTENT_STREAM: &str = "content";

const ATTEMPTS_PER_CELL: u32 = 16;
const MIN_ATTEMPTS: u32 = 256;

/// Quest created by the placer, before any interaction has happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedQuest {
    /// Identifier allocated to the quest.
    pub id: QuestId,
    /// Flavour of the quest.
    pub kind: QuestKind,
    /// Cell where the quest is accepted.
    pub start: Position,
    /// Cell where the quest is completed.
    pub goal: Position,
}

/// Door created for a lock quest. Doors are placed locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedDoor {
    /// Identifier allocated to the door.
    pub id: DoorId,
    /// Cell the door stands on, equal to its quest's start.
    pub position: Position,
    /// Quest that created the door.
    pub quest: QuestId,
}

/// Complete content layout for one generated world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Grass cell the agent starts on.
    pub agent_spawn: Position,
    /// Quests in creation order.
    pub quests: Vec<PlacedQuest>,
    /// Doors in creation order.
    pub doors: Vec<PlacedDoor>,
    /// Cell occupants after every quest and door was written.
    pub occupancy: OccupancyMap,
}

impl Placement {
    /// Creates an empty layout for a `width` by `height` grid.
    #[must_use]
    pub fn new(agent_spawn: Position, width: u32, height: u32) -> Self {
        Self {
            agent_spawn,
            quests: Vec::new(),
            doors: Vec::new(),
            occupancy: OccupancyMap::new(width, height),
        }
    }

    /// Records a quest on `start` and `goal`, adding a door on `start` for
    /// lock quests.
    ///
    /// Start and goal may coincide and may overwrite occupants written by
    /// earlier quests. A door replaces its quest as the occupant of the start
    /// cell.
    pub fn add_quest(&mut self, kind: QuestKind, start: Position, goal: Position) -> QuestId {
        let id = self.next_quest_id();
        self.occupancy.occupy(start, Occupant::Quest(id));
        self.occupancy.occupy(goal, Occupant::Quest(id));

        if kind.has_door() {
            let door = self.next_door_id();
            self.occupancy.occupy(start, Occupant::Door(door));
            self.doors.push(PlacedDoor {
                id: door,
                position: start,
                quest: id,
            });
        }

        self.quests.push(PlacedQuest {
            id,
            kind,
            start,
            goal,
        });
        id
    }

    fn next_quest_id(&self) -> QuestId {
        QuestId::new(u32::try_from(self.quests.len()).unwrap_or(u32::MAX))
    }

    fn next_door_id(&self) -> DoorId {
        DoorId::new(u32::try_from(self.doors.len()).unwrap_or(u32::MAX))
    }
}

/// Rejection-sampling content placer bound to a terrain grid.
#[derive(Clone, Copy, Debug)]
pub struct ContentPlacer<'grid> {
    grid: &'grid TerrainGrid,
    max_attempts: u32,
}

impl<'grid> ContentPlacer<'grid> {
    /// Creates a placer whose retry budget scales with the grid area.
    #[must_use]
    pub fn new(grid: &'grid TerrainGrid) -> Self {
        let area = u64::from(grid.width()) * u64::from(grid.height());
        let scaled = area.saturating_mul(u64::from(ATTEMPTS_PER_CELL));
        let max_attempts = u32::try_from(scaled)
            .unwrap_or(u32::MAX)
            .max(MIN_ATTEMPTS);
        Self { grid, max_attempts }
    }

    /// Overrides the number of draws allowed per sampled cell. Zero is raised to one.
    #[must_use]
    pub fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..self
        }
    }

    /// Number of draws allowed per sampled cell.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Spawns the agent and creates `quest_count` quests of random kind.
    ///
    /// Nothing is returned unless every cell could be placed.
    pub fn place(
        &self,
        quest_count: u32,
        rng: &mut SeededRng,
    ) -> Result<Placement, PlacementError> {
        let spawn = self.spawn_agent(rng)?;
        let mut placement = Placement::new(spawn, self.grid.width(), self.grid.height());

        for _ in 0..quest_count {
            let kind = if rng.coin_flip() {
                QuestKind::Lock
            } else {
                QuestKind::Kill
            };
            let _ = self.create_quest(&mut placement, kind, rng)?;
        }

        Ok(placement)
    }

    /// Samples a grass cell for the agent.
    pub fn spawn_agent(&self, rng: &mut SeededRng) -> Result<Position, PlacementError> {
        self.sample(rng, PlacementTarget::AgentSpawn, |terrain| {
            terrain == TerrainType::Grass
        })
    }

    /// Creates a quest of `kind` on two independently sampled non-mountain
    /// cells. The cells are not checked against each other or against earlier
    /// quests.
    pub fn create_quest(
        &self,
        placement: &mut Placement,
        kind: QuestKind,
        rng: &mut SeededRng,
    ) -> Result<QuestId, PlacementError> {
        let start = self.sample(rng, PlacementTarget::QuestStart, TerrainType::is_passable)?;
        let goal = self.sample(rng, PlacementTarget::QuestGoal, TerrainType::is_passable)?;

        let id = placement.add_quest(kind, start, goal);
        debug!(
            quest = id.get(),
            ?kind,
            start_x = start.x(),
            start_y = start.y(),
            goal_x = goal.x(),
            goal_y = goal.y(),
            "quest_created"
        );
        Ok(id)
    }

    fn sample<F>(
        &self,
        rng: &mut SeededRng,
        target: PlacementTarget,
        eligible: F,
    ) -> Result<Position, PlacementError>
    where
        F: Fn(TerrainType) -> bool,
    {
        for _ in 0..self.max_attempts {
            let x = rng.below(self.grid.width());
            let y = rng.below(self.grid.height());
            let position = Position::new(x, y);
            if self.grid.get(position).is_some_and(&eligible) {
                return Ok(position);
            }
        }

        warn!(
            ?target,
            attempts = self.max_attempts,
            "placement_exhausted"
        );
        Err(PlacementError::Exhausted {
            target,
            attempts: self.max_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_budget_scales_with_area() {
        let small = TerrainGrid::filled(2, 2, TerrainType::Grass);
        assert_eq!(ContentPlacer::new(&small).max_attempts(), MIN_ATTEMPTS);

        let large = TerrainGrid::filled(100, 50, TerrainType::Grass);
        assert_eq!(
            ContentPlacer::new(&large).max_attempts(),
            100 * 50 * ATTEMPTS_PER_CELL
        );
        assert_eq!(
            ContentPlacer::new(&large).with_max_attempts(0).max_attempts(),
            1
        );
    }

    #[test]
    fn overlapping_quests_overwrite_earlier_occupants() {
        let grid = TerrainGrid::filled(1, 1, TerrainType::Grass);
        let placer = ContentPlacer::new(&grid);
        let mut rng = SeededRng::from_seed_str("overlap");
        let cell = Position::new(0, 0);
        let mut placement = Placement::new(cell, 1, 1);

        let kill = placer
            .create_quest(&mut placement, QuestKind::Kill, &mut rng)
            .expect("single grass cell is eligible");
        assert_eq!(placement.occupancy.occupant(cell), Some(Occupant::Quest(kill)));

        let lock = placer
            .create_quest(&mut placement, QuestKind::Lock, &mut rng)
            .expect("single grass cell is eligible");
        assert_ne!(kill, lock);
        assert_eq!(
            placement.occupancy.occupant(cell),
            Some(Occupant::Door(DoorId::new(0)))
        );
        assert_eq!(placement.quests.len(), 2);
        assert_eq!(placement.quests[0].start, placement.quests[0].goal);
    }

    #[test]
    fn quest_cells_reject_mountains() {
        let grid = TerrainGrid::filled(4, 4, TerrainType::Mountain);
        let placer = ContentPlacer::new(&grid).with_max_attempts(32);
        let mut rng = SeededRng::from_seed_str("peaks");
        let mut placement = Placement::new(Position::new(0, 0), 4, 4);

        let error = placer
            .create_quest(&mut placement, QuestKind::Kill, &mut rng)
            .expect_err("no eligible cell exists");
        assert_eq!(
            error,
            PlacementError::Exhausted {
                target: PlacementTarget::QuestStart,
                attempts: 32,
            }
        );
        assert!(placement.quests.is_empty());
        assert_eq!(placement.occupancy.iter().count(), 0);
    }
}
