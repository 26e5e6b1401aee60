#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Terraquest adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use terraquest_core::{DoorId, Position, QuestId, QuestKind, TerrainType};
use terraquest_world::{query, World};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(1.0, 0.92, 0.016, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque gray.
    pub const GRAY: Self = Self::new(0.5, 0.5, 0.5, 1.0);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::new(1.0, 0.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Fill color of a terrain class.
#[must_use]
pub const fn terrain_color(terrain: TerrainType) -> Color {
    match terrain {
        TerrainType::Water => Color::BLUE,
        TerrainType::Sand => Color::YELLOW,
        TerrainType::Grass => Color::GREEN,
        TerrainType::Mountain => Color::GRAY,
    }
}

/// Marker color of an accepted quest's goal.
#[must_use]
pub const fn goal_color(kind: QuestKind) -> Color {
    match kind {
        QuestKind::Lock => Color::MAGENTA,
        QuestKind::Kill => Color::RED,
    }
}

/// Marker color of every quest start.
pub const QUEST_START_COLOR: Color = Color::WHITE;

/// Marker color of the agent.
pub const AGENT_COLOR: Color = Color::BLACK;

/// Fill color of a locked door; unlocked doors are drawn lightened.
pub const DOOR_COLOR: Color = Color::from_rgb_u8(120, 72, 32);

/// Discrete player intents recognised by adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Step one cell towards +y.
    MoveUp,
    /// Step one cell towards -y.
    MoveDown,
    /// Step one cell towards -x.
    MoveLeft,
    /// Step one cell towards +x.
    MoveRight,
    /// Attempt a quest interaction on the current cell.
    Interact,
    /// Rebuild the world from its configuration.
    Regenerate,
    /// Stop presenting frames.
    Quit,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Action captured for this frame, if any.
    pub action: Option<InputAction>,
}

impl FrameInput {
    /// Creates an input snapshot carrying a single action.
    #[must_use]
    pub const fn with_action(action: InputAction) -> Self {
        Self {
            action: Some(action),
        }
    }
}

/// Describes the cell grid that can be rendered by adapters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
}

impl TileGridPresentation {
    /// Creates a new grid descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// World-space centre of the cell at `position`, in cell units.
    ///
    /// The grid is centred on the origin using integer halves of its extents,
    /// so odd-sized grids lean half a cell towards positive coordinates.
    #[must_use]
    pub fn cell_center(&self, position: Position) -> Vec2 {
        let half_columns = (self.columns / 2) as f32;
        let half_rows = (self.rows / 2) as f32;
        Vec2::new(
            position.x() as f32 - half_columns + 0.5,
            position.y() as f32 - half_rows + 0.5,
        )
    }

    /// Determines whether `position` lies on the grid.
    #[must_use]
    pub const fn contains(&self, position: Position) -> bool {
        position.x() < self.columns && position.y() < self.rows
    }
}

/// Terrain fill of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    /// Cell coordinates.
    pub position: Position,
    /// Terrain class of the cell.
    pub terrain: TerrainType,
    /// Fill color derived from the terrain.
    pub color: Color,
}

/// Markers drawn for a single active quest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuestPresentation {
    /// Identifier of the quest.
    pub quest: QuestId,
    /// Flavour of the quest.
    pub kind: QuestKind,
    /// Start marker cell.
    pub start: Position,
    /// Goal marker cell, present only once the quest has been accepted.
    pub goal: Option<Position>,
    /// Color of the start marker.
    pub start_color: Color,
    /// Color of the goal marker.
    pub goal_color: Color,
}

/// Door drawn on top of the terrain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorPresentation {
    /// Identifier of the door.
    pub door: DoorId,
    /// Cell the door stands on.
    pub position: Position,
    /// Whether the door still blocks movement.
    pub locked: bool,
    /// Fill color of the door.
    pub color: Color,
}

/// Agent marker drawn above every other layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentPresentation {
    /// Cell the agent stands on.
    pub position: Position,
    /// Marker color.
    pub color: Color,
}

/// Scene description combining the grid, terrain, content and agent layers.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Terrain fill for every cell, columns outermost.
    pub cells: Vec<CellPresentation>,
    /// Active quests in registry order.
    pub quests: Vec<QuestPresentation>,
    /// Doors ordered by identifier.
    pub doors: Vec<DoorPresentation>,
    /// Agent marker.
    pub agent: AgentPresentation,
    /// Seed string the terrain was generated from.
    pub seed: String,
    /// Short messages adapters may show next to the frame.
    pub notices: Vec<String>,
}

impl Scene {
    /// Builds a scene mirroring the current world state.
    #[must_use]
    pub fn from_world(world: &World) -> Self {
        let terrain = query::terrain(world);
        let tile_grid = TileGridPresentation::new(terrain.width(), terrain.height());

        let cells = terrain
            .iter()
            .map(|(position, terrain)| CellPresentation {
                position,
                terrain,
                color: terrain_color(terrain),
            })
            .collect();

        let quests = query::quests(world)
            .into_iter()
            .map(|quest| QuestPresentation {
                quest: quest.id,
                kind: quest.kind,
                start: quest.start,
                goal: quest.accepted.then_some(quest.goal),
                start_color: QUEST_START_COLOR,
                goal_color: goal_color(quest.kind),
            })
            .collect();

        let doors = query::doors(world)
            .into_iter()
            .map(|door| DoorPresentation {
                door: door.id,
                position: door.position,
                locked: door.locked,
                color: if door.locked {
                    DOOR_COLOR
                } else {
                    DOOR_COLOR.lighten(0.6)
                },
            })
            .collect();

        Self {
            tile_grid,
            cells,
            quests,
            doors,
            agent: AgentPresentation {
                position: query::agent_position(world),
                color: AGENT_COLOR,
            },
            seed: query::seed(world).to_owned(),
            notices: Vec::new(),
        }
    }

    /// Terrain class at `position`, if the cell is part of the scene.
    #[must_use]
    pub fn terrain_at(&self, position: Position) -> Option<TerrainType> {
        self.cells
            .iter()
            .find(|cell| cell.position == position)
            .map(|cell| cell.terrain)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Terraquest scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until input ends or [`InputAction::Quit`] is received.
    ///
    /// The provided `update_scene` closure receives the input captured for a
    /// frame and may replace the scene before it is presented. Quit requests
    /// are handled by the backend and never forwarded.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene);
}

#[cfg(test)]
mod tests {
    use super::*;
    use terraquest_core::{TerrainGrid, WorldConfig};
    use terraquest_system_content::Placement;

    fn layout() -> World {
        let mut terrain = TerrainGrid::filled(5, 4, TerrainType::Grass);
        terrain.set(Position::new(1, 1), TerrainType::Water);
        terrain.set(Position::new(3, 2), TerrainType::Mountain);
        let mut placement = Placement::new(Position::new(2, 2), 5, 4);
        let _ = placement.add_quest(QuestKind::Kill, Position::new(0, 0), Position::new(4, 3));
        let _ = placement.add_quest(QuestKind::Lock, Position::new(1, 2), Position::new(0, 3));
        World::with_layout(WorldConfig::default(), "scene", terrain, placement)
    }

    #[test]
    fn cell_centers_are_offset_by_integer_half_extents() {
        let grid = TileGridPresentation::new(5, 4);

        assert_eq!(grid.cell_center(Position::new(0, 0)), Vec2::new(-1.5, -1.5));
        assert_eq!(grid.cell_center(Position::new(4, 3)), Vec2::new(2.5, 1.5));
    }

    #[test]
    fn terrain_palette_matches_classes() {
        assert_eq!(terrain_color(TerrainType::Water), Color::BLUE);
        assert_eq!(terrain_color(TerrainType::Sand), Color::YELLOW);
        assert_eq!(terrain_color(TerrainType::Grass), Color::GREEN);
        assert_eq!(terrain_color(TerrainType::Mountain), Color::GRAY);
    }

    #[test]
    fn scene_mirrors_world_layers() {
        let world = layout();
        let scene = Scene::from_world(&world);

        assert_eq!(scene.cells.len(), 20);
        assert_eq!(scene.terrain_at(Position::new(1, 1)), Some(TerrainType::Water));
        assert_eq!(
            scene.terrain_at(Position::new(3, 2)),
            Some(TerrainType::Mountain)
        );
        assert_eq!(scene.terrain_at(Position::new(5, 0)), None);
        assert_eq!(scene.agent.position, Position::new(2, 2));
        assert_eq!(scene.agent.color, AGENT_COLOR);
        assert_eq!(scene.seed, "scene");

        assert_eq!(scene.doors.len(), 1);
        assert!(scene.doors[0].locked);
        assert_eq!(scene.doors[0].color, DOOR_COLOR);
    }

    #[test]
    fn scene_terrain_lookup_agrees_with_the_grid() {
        let world = layout();
        let scene = Scene::from_world(&world);

        for (position, terrain) in query::terrain(&world).iter() {
            assert_eq!(scene.terrain_at(position), Some(terrain), "{position:?}");
        }
    }

    #[test]
    fn goal_markers_appear_only_for_accepted_quests() {
        let scene = Scene::from_world(&layout());

        let kill = scene.quests[0];
        assert_eq!(kill.kind, QuestKind::Kill);
        assert_eq!(kill.goal, None);
        assert_eq!(kill.start_color, QUEST_START_COLOR);
        assert_eq!(kill.goal_color, Color::RED);

        let lock = scene.quests[1];
        assert_eq!(lock.goal, Some(Position::new(0, 3)));
        assert_eq!(lock.goal_color, Color::MAGENTA);
    }

    #[test]
    fn lighten_moves_channels_towards_white() {
        let lightened = Color::new(0.0, 0.5, 1.0, 0.25).lighten(0.5);

        assert_eq!(lightened, Color::new(0.5, 0.75, 1.0, 0.25));
    }
}
