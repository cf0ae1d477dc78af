//! polystore entry point
//!
//! Runs the effect scene headless for a configured number of frames, saving
//! and loading a snapshot on the configured frames.

use polystore::Settings;
use polystore::consts::FRAMES_PER_SECOND;
use polystore::renderer::{Color, DrawList};
use polystore::sim::{self, FrameInput, Scene, SnapshotOutcome};

const DEFAULT_SETTINGS_PATH: &str = "polystore.json";

fn main() -> Result<(), polystore::Error> {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let settings = Settings::load(&settings_path);

    // A duplicate registration aborts start-up here
    let registry = sim::default_registry()?;
    log::info!("Registered object types: {:?}", registry);

    let mut scene = Scene::new(&settings);
    let mut canvas = DrawList::default();
    log::info!(
        "Running {} frames (seed {}, snapshot {})",
        settings.frames,
        settings.seed,
        settings.snapshot_path.display()
    );

    for frame in 1..=settings.frames {
        let input = FrameInput {
            save: settings.save_frame == Some(frame),
            load: settings.load_frame == Some(frame),
        };

        canvas.clear();
        let report = sim::tick(&mut scene, &registry, input, &mut canvas);

        match &report.snapshot {
            Some(SnapshotOutcome::Saved { bytes }) => {
                log::info!("Frame {}: saved {} objects ({} bytes)", frame, report.alive, bytes)
            }
            Some(SnapshotOutcome::Loaded { count }) => {
                log::info!("Frame {}: loaded {} objects", frame, count)
            }
            Some(SnapshotOutcome::Failed(err)) => log::error!("Frame {}: {}", frame, err),
            None => {}
        }

        if frame % FRAMES_PER_SECOND == 0 {
            log::info!(
                "Frame {}: {} alive ({} red, {} blue)",
                frame,
                report.alive,
                canvas.count_color(Color::RED),
                canvas.count_color(Color::BLUE)
            );
        }
    }

    log::info!("Done after {} frames, {} objects alive", scene.frame(), scene.store.len());
    Ok(())
}
