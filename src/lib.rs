//! polystore - save and restore a heterogeneous collection of game objects
//!
//! Core modules:
//! - `sim`: Object contract, type registry, object store, effects, frame tick
//! - `persistence`: Binary snapshot codec (save/load against the registry)
//! - `renderer`: Draw surface boundary and a headless draw list
//! - `settings`: JSON-backed run configuration

pub mod error;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Scene configuration constants
pub mod consts {
    /// Default arena dimensions (effects spawn at the centre)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Frames an effect stays alive after spawning
    pub const EFFECT_LIFE: i32 = 300;
    /// Distance travelled per frame by a freshly launched effect
    pub const EFFECT_SPEED: f32 = 1.0;
    /// Drawn circle radius
    pub const EFFECT_RADIUS: f32 = 16.0;

    /// One-in-N chance per frame for each effect kind to spawn
    pub const SPAWN_ODDS: u32 = 7;

    /// Frames per simulated second (used for periodic logging only)
    pub const FRAMES_PER_SECOND: u64 = 60;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Unit vector for a uniformly distributed angle in [0, 2π)
pub fn random_heading<R: rand::Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let theta = rng.random::<f32>() * std::f32::consts::TAU;
    polar_to_cartesian(1.0, theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_heading_is_unit_length() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..100 {
            let heading = random_heading(&mut rng);
            assert!((heading.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_polar_to_cartesian_axes() {
        let right = polar_to_cartesian(2.0, 0.0);
        assert!((right - Vec2::new(2.0, 0.0)).length() < 1e-6);

        let up = polar_to_cartesian(1.0, std::f32::consts::FRAC_PI_2);
        assert!((up - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }
}
