//! One frame of the scene loop
//!
//! Spawn roll, update with removal, draw, then any requested snapshot
//! action. Everything random comes from the scene's seeded RNG.

use std::path::PathBuf;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::{EffectBlue, EffectRed};
use super::object::{ObjectTypeId, Storable};
use super::registry::TypeRegistry;
use super::store::ObjectStore;
use crate::error::Error;
use crate::persistence;
use crate::random_heading;
use crate::renderer::Canvas;
use crate::settings::Settings;

/// Requests for a single frame (save on Shift+1, load on 1)
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub save: bool,
    pub load: bool,
}

/// Result of a snapshot request made this frame
#[derive(Debug)]
pub enum SnapshotOutcome {
    Saved { bytes: u64 },
    Loaded { count: usize },
    Failed(Error),
}

/// What happened during one frame
#[derive(Debug)]
pub struct FrameReport {
    pub frame: u64,
    /// Type spawned this frame, if any
    pub spawned: Option<ObjectTypeId>,
    /// Objects removed by the update pass
    pub expired: usize,
    /// Objects alive after the frame
    pub alive: usize,
    pub snapshot: Option<SnapshotOutcome>,
}

/// Live objects plus the state the loop needs around them
#[derive(Debug)]
pub struct Scene {
    pub store: ObjectStore,
    rng: Pcg32,
    frame: u64,
    origin: Vec2,
    spawn_odds: u32,
    speed: f32,
    snapshot_path: PathBuf,
    keep_backup: bool,
}

impl Scene {
    pub fn new(settings: &Settings) -> Self {
        Self {
            store: ObjectStore::new(),
            rng: Pcg32::seed_from_u64(settings.seed),
            frame: 0,
            origin: settings.arena_center(),
            spawn_odds: settings.effective_spawn_odds(),
            speed: settings.effect_speed,
            snapshot_path: settings.snapshot_path.clone(),
            keep_backup: settings.keep_backup,
        }
    }

    /// Frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Spawn `T` at the arena centre with a random heading
    pub fn spawn<T: Storable>(&mut self, registry: &TypeRegistry) -> ObjectTypeId {
        let velocity = random_heading(&mut self.rng) * self.speed;
        self.store
            .spawn::<T>(registry)
            .launch(self.origin, velocity);
        T::TYPE_ID
    }

    fn roll_spawn(&mut self, registry: &TypeRegistry) -> Option<ObjectTypeId> {
        match self.rng.random_range(0..self.spawn_odds) {
            0 => Some(self.spawn::<EffectRed>(registry)),
            1 => Some(self.spawn::<EffectBlue>(registry)),
            _ => None,
        }
    }

    fn handle_snapshot(
        &mut self,
        registry: &TypeRegistry,
        input: FrameInput,
    ) -> Option<SnapshotOutcome> {
        let outcome = if input.save {
            persistence::save_to_file(&self.store, &self.snapshot_path, self.keep_backup)
                .map(|bytes| SnapshotOutcome::Saved { bytes })
        } else if input.load {
            persistence::load_from_file(&mut self.store, &self.snapshot_path, registry)
                .map(|count| SnapshotOutcome::Loaded { count })
        } else {
            return None;
        };
        Some(outcome.unwrap_or_else(SnapshotOutcome::Failed))
    }
}

/// Advance the scene by one frame
pub fn tick(
    scene: &mut Scene,
    registry: &TypeRegistry,
    input: FrameInput,
    canvas: &mut dyn Canvas,
) -> FrameReport {
    scene.frame += 1;

    let spawned = scene.roll_spawn(registry);
    let expired = scene.store.update_all();
    scene.store.draw_all(canvas);
    let snapshot = scene.handle_snapshot(registry, input);

    FrameReport {
        frame: scene.frame,
        spawned,
        expired,
        alive: scene.store.len(),
        snapshot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EFFECT_LIFE;
    use crate::renderer::DrawList;
    use crate::sim::effects::motion_of;
    use tempfile::TempDir;

    fn registry() -> TypeRegistry {
        TypeRegistry::new()
            .with::<EffectRed>()
            .and_then(|r| r.with::<EffectBlue>())
            .unwrap()
    }

    fn settings(dir: &TempDir) -> Settings {
        Settings {
            snapshot_path: dir.path().join("save1.dat"),
            ..Default::default()
        }
    }

    fn run(scene: &mut Scene, registry: &TypeRegistry, frames: u64) {
        let mut canvas = DrawList::default();
        for _ in 0..frames {
            tick(scene, registry, FrameInput::default(), &mut canvas);
        }
    }

    #[test]
    fn test_tick_spawns_updates_and_draws() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut scene = Scene::new(&settings(&dir));

        let mut spawned = 0;
        for _ in 0..100 {
            let mut canvas = DrawList::default();
            let report = tick(&mut scene, &registry, FrameInput::default(), &mut canvas);
            spawned += usize::from(report.spawned.is_some());
            assert_eq!(canvas.len(), report.alive);
            assert_eq!(report.expired, 0);
            assert!(report.snapshot.is_none());
        }
        assert_eq!(scene.frame(), 100);
        assert_eq!(scene.store.len(), spawned);
        assert!(spawned > 0);
    }

    #[test]
    fn test_effects_expire_after_lifetime() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut scene = Scene::new(&Settings {
            spawn_odds: 1_000_000,
            ..settings(&dir)
        });
        scene.spawn::<EffectRed>(&registry);
        let first = |scene: &Scene| scene.store.get(0).and_then(motion_of).map(|m| m.life);

        let mut canvas = DrawList::default();
        let mut same_age = 0;
        for frame in 1..EFFECT_LIFE {
            let report = tick(&mut scene, &registry, FrameInput::default(), &mut canvas);
            if frame == 1 {
                same_age = usize::from(report.spawned.is_some());
            }
            assert_eq!(report.expired, 0, "nothing may expire on frame {}", frame);
            assert_eq!(first(&scene), Some(EFFECT_LIFE - frame));
        }

        // A roll on frame 1 is updated as often as the hand-spawned effect
        let report = tick(&mut scene, &registry, FrameInput::default(), &mut canvas);
        assert_eq!(report.frame, EFFECT_LIFE as u64);
        assert_eq!(report.expired, 1 + same_age);
        assert_eq!(report.alive, scene.store.len());
    }

    #[test]
    fn test_same_seed_same_scene() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut a = Scene::new(&settings(&dir));
        let mut b = Scene::new(&settings(&dir));
        run(&mut a, &registry, 250);
        run(&mut b, &registry, 250);

        assert_eq!(a.store.type_ids(), b.store.type_ids());
        assert_eq!(
            persistence::to_bytes(&a.store).unwrap(),
            persistence::to_bytes(&b.store).unwrap()
        );
    }

    #[test]
    fn test_save_then_load_restores_scene() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut scene = Scene::new(&settings(&dir));
        run(&mut scene, &registry, 120);

        let mut canvas = DrawList::default();
        let save = FrameInput {
            save: true,
            ..Default::default()
        };
        let report = tick(&mut scene, &registry, save, &mut canvas);
        assert!(matches!(report.snapshot, Some(SnapshotOutcome::Saved { .. })));
        let saved = persistence::to_bytes(&scene.store).unwrap();

        run(&mut scene, &registry, 50);
        scene.store.clear();

        // Load runs after this frame's update, so the store matches the save exactly
        let load = FrameInput {
            load: true,
            ..Default::default()
        };
        let report = tick(&mut scene, &registry, load, &mut canvas);
        match report.snapshot {
            Some(SnapshotOutcome::Loaded { count }) => assert_eq!(count, report.alive),
            other => panic!("expected load, got {:?}", other),
        }
        assert_eq!(persistence::to_bytes(&scene.store).unwrap(), saved);
    }

    #[test]
    fn test_failed_load_is_reported_and_clears() {
        let dir = TempDir::new().unwrap();
        let registry = registry();
        let mut scene = Scene::new(&settings(&dir));
        run(&mut scene, &registry, 60);

        let mut canvas = DrawList::default();
        let load = FrameInput {
            load: true,
            ..Default::default()
        };
        let report = tick(&mut scene, &registry, load, &mut canvas);
        assert!(matches!(
            report.snapshot,
            Some(SnapshotOutcome::Failed(Error::Io(_)))
        ));
        assert_eq!(report.alive, 0);
        assert!(scene.store.is_empty());
    }
}
