//! Run settings
//!
//! Stored as JSON next to the binary. Missing fields fall back to defaults so
//! old settings files keep working.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Scene and persistence settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for spawn and heading rolls
    pub seed: u64,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Spawning ===
    /// Size of the per-frame spawn roll: 0 spawns red, 1 spawns blue
    pub spawn_odds: u32,
    /// Distance per frame for new effects
    pub effect_speed: f32,

    // === Snapshots ===
    /// Where save/load read and write
    pub snapshot_path: PathBuf,
    /// Copy the previous snapshot to `<snapshot_path>.bak` before replacing it
    pub keep_backup: bool,

    // === Headless driver ===
    /// Frames to simulate before exiting
    pub frames: u64,
    /// Frame on which to save (none if unset)
    pub save_frame: Option<u64>,
    /// Frame on which to load (none if unset)
    pub load_frame: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 12345,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            spawn_odds: SPAWN_ODDS,
            effect_speed: EFFECT_SPEED,

            snapshot_path: PathBuf::from("save1.dat"),
            keep_backup: false,

            frames: 600,
            save_frame: Some(200),
            load_frame: Some(400),
        }
    }
}

impl Settings {
    /// Centre of the arena, where effects spawn
    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height) / 2.0
    }

    /// Spawn roll size, never zero
    pub fn effective_spawn_odds(&self) -> u32 {
        self.spawn_odds.max(1)
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring {}: {}", path.display(), err);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}
