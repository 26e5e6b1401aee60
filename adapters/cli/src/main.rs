#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Terraquest experience.

mod controls;
mod terminal;

use std::{
    fs,
    io::{self, Cursor},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use terraquest_core::WorldConfig;
use terraquest_rendering::{FrameInput, Presentation, RenderingBackend, Scene};
use terraquest_world::{self as world, query, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use terminal::TerminalBackend;

/// Command-line arguments accepted by the Terraquest binary.
#[derive(Debug, Parser)]
#[command(name = "terraquest", about = "Explore a generated island and complete its quests")]
struct Args {
    /// TOML file providing world configuration; flags override its values.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of grid columns.
    #[arg(long)]
    width: Option<u32>,
    /// Number of grid rows.
    #[arg(long)]
    height: Option<u32>,
    /// Seed string the map is derived from.
    #[arg(long)]
    seed: Option<String>,
    /// Derive the seed from the system clock instead.
    #[arg(long)]
    random_seed: bool,
    /// Percentage of interior cells initially filled with water (0-40).
    #[arg(long)]
    water: Option<u8>,
    /// Percentage of interior cells initially filled with mountain (0-40).
    #[arg(long)]
    mountain: Option<u8>,
    /// Number of quests placed on the map (0-3).
    #[arg(long)]
    quests: Option<u32>,
    /// Keys to play non-interactively instead of reading standard input.
    #[arg(long, value_name = "KEYS")]
    script: Option<String>,
}

impl Args {
    /// Layers flag overrides on top of the config file, or the defaults without one.
    fn world_config(&self) -> Result<WorldConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                parse_config(&text)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => WorldConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = &self.seed {
            config.seed = seed.clone();
        }
        if self.random_seed {
            config.use_random_seed = true;
        }
        if let Some(water) = self.water {
            config.water_percent = water;
        }
        if let Some(mountain) = self.mountain {
            config.mountain_percent = mountain;
        }
        if let Some(quests) = self.quests {
            config.quest_count = quests;
        }
        Ok(config)
    }
}

fn parse_config(text: &str) -> Result<WorldConfig> {
    Ok(toml::from_str(text)?)
}

/// Entry point for the Terraquest command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = args.world_config()?;

    let mut world = World::new(config).context("failed to generate the initial world")?;
    info!(seed = query::seed(&world), "=== Terraquest Startup ===");

    let presentation = Presentation::new(query::welcome_banner(&world), Scene::from_world(&world));
    let update_scene = |input: FrameInput, scene: &mut Scene| {
        let Some(command) = input.action.and_then(controls::command_for) else {
            return;
        };
        let mut events = Vec::new();
        world::apply(&mut world, command, &mut events);

        let mut notices = std::mem::take(&mut scene.notices);
        notices.extend(events.iter().filter_map(controls::describe));
        *scene = Scene::from_world(&world);
        scene.notices = notices;
    };

    match args.script {
        Some(script) => TerminalBackend::new(Cursor::new(script), io::stdout().lock())
            .run(presentation, update_scene),
        None => TerminalBackend::new(io::stdin().lock(), io::stdout().lock())
            .run(presentation, update_scene),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "terraquest",
            "--width",
            "12",
            "--seed",
            "abc",
            "--random-seed",
            "--quests",
            "1",
        ])
        .expect("valid flags");
        let config = args.world_config().expect("no config file involved");

        assert_eq!(
            config,
            WorldConfig {
                width: 12,
                seed: "abc".to_owned(),
                use_random_seed: true,
                quest_count: 1,
                ..WorldConfig::default()
            }
        );
        assert!(args.script.is_none());
    }

    #[test]
    fn config_file_fills_unset_fields() {
        let config = parse_config("height = 20\nwater_percent = 10\n").expect("valid toml");

        assert_eq!(config.height, 20);
        assert_eq!(config.water_percent, 10);
        assert_eq!(config.width, WorldConfig::default().width);
    }

    #[test]
    fn malformed_config_is_reported() {
        assert!(parse_config("width = \"wide\"").is_err());
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let args = Args::try_parse_from(["terraquest", "--config", "/nonexistent/terraquest.toml"])
            .expect("valid flags");
        let error = args.world_config().expect_err("file does not exist");

        assert!(error.to_string().contains("/nonexistent/terraquest.toml"));
    }
}
