//! Plain-text rendering backend driven by line-oriented key input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use terraquest_core::{Position, TerrainType};
use terraquest_rendering::{FrameInput, InputAction, Presentation, RenderingBackend, Scene};
use tracing::debug;

use crate::controls::action_for_key;

const AGENT_GLYPH: char = '@';
const LOCKED_DOOR_GLYPH: char = '+';
const UNLOCKED_DOOR_GLYPH: char = '/';
const QUEST_START_GLYPH: char = '!';
const QUEST_GOAL_GLYPH: char = '?';

/// Renders scenes as text and reads one batch of keys per input line.
///
/// Each key on a line is handled as its own frame; the map is drawn once the
/// whole line has been processed.
#[derive(Debug)]
pub(crate) struct TerminalBackend<R, W> {
    input: R,
    output: W,
}

impl<R, W> TerminalBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn present(&mut self, scene: &mut Scene) -> Result<()> {
        self.output
            .write_all(render_frame(scene).as_bytes())
            .context("failed to write frame")?;
        for notice in scene.notices.drain(..) {
            writeln!(self.output, "> {notice}").context("failed to write notice")?;
        }
        self.output.flush().context("failed to flush frame")
    }
}

impl<R, W> RenderingBackend for TerminalBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene),
    {
        let Presentation {
            window_title,
            mut scene,
        } = presentation;
        writeln!(self.output, "{window_title}").context("failed to write title")?;
        self.present(&mut scene)?;

        let mut line = String::new();
        loop {
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read input")?;
            if read == 0 {
                return Ok(());
            }

            for key in line.trim_end_matches(['\r', '\n']).chars() {
                match action_for_key(key) {
                    Some(InputAction::Quit) => return self.present(&mut scene),
                    Some(action) => update_scene(FrameInput::with_action(action), &mut scene),
                    None => debug!(?key, "unmapped_key"),
                }
            }
            self.present(&mut scene)?;
        }
    }
}

/// Draws the scene with `+y` at the top, followed by the seed line.
pub(crate) fn render_frame(scene: &Scene) -> String {
    let grid = &scene.tile_grid;
    let columns = grid.columns as usize;
    let mut glyphs = vec![' '; columns * grid.rows as usize];
    let mut paint = |position: Position, glyph: char| {
        if grid.contains(position) {
            let row = (grid.rows - 1 - position.y()) as usize;
            glyphs[row * columns + position.x() as usize] = glyph;
        }
    };

    for cell in &scene.cells {
        paint(cell.position, terrain_glyph(cell.terrain));
    }
    for quest in &scene.quests {
        if let Some(goal) = quest.goal {
            paint(goal, QUEST_GOAL_GLYPH);
        }
    }
    for quest in &scene.quests {
        paint(quest.start, QUEST_START_GLYPH);
    }
    for door in &scene.doors {
        let glyph = if door.locked {
            LOCKED_DOOR_GLYPH
        } else {
            UNLOCKED_DOOR_GLYPH
        };
        paint(door.position, glyph);
    }
    paint(scene.agent.position, AGENT_GLYPH);

    let mut frame = String::with_capacity(glyphs.len() + grid.rows as usize + 32);
    for row in glyphs.chunks(columns.max(1)) {
        frame.extend(row);
        frame.push('\n');
    }
    frame.push_str(&format!("seed: {}\n", scene.seed));
    frame
}

const fn terrain_glyph(terrain: TerrainType) -> char {
    match terrain {
        TerrainType::Water => '~',
        TerrainType::Sand => '.',
        TerrainType::Grass => ',',
        TerrainType::Mountain => '^',
    }
}
