//! Hoppy Bunny - a tap-to-hop side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hero, scrolling, obstacles, contacts)
//! - `scene`: Scene construction, collaborator wiring and restart
//! - `layout`: Injected scene layout and obstacle templates
//! - `persistence`: Key-value store for the high score
//! - `feedback`: Fire-and-forget sound, haptics and shake effects
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod feedback;
pub mod highscores;
pub mod layout;
pub mod persistence;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{SceneError, StoreError};
pub use highscores::HighScore;
pub use scene::Scene;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Viewport dimensions (scene space, origin bottom-left)
    pub const VIEWPORT_WIDTH: f32 = 320.0;
    pub const VIEWPORT_HEIGHT: f32 = 568.0;

    /// World scroll speed (pixels/s)
    pub const SCROLL_SPEED: f32 = 160.0;

    /// Seconds between obstacle spawns
    pub const SPAWN_INTERVAL: f32 = 1.5;
    /// Spawn x, just past the right edge
    pub const SPAWN_X: f32 = 352.0;
    /// Spawn y range (inclusive)
    pub const SPAWN_Y_MIN: f32 = 234.0;
    pub const SPAWN_Y_MAX: f32 = 382.0;

    /// Hero flap
    pub const FLAP_IMPULSE: f32 = 300.0;
    pub const FLAP_ANGULAR_IMPULSE: f32 = 1.0;

    /// Fall rotation torque kicks in after this much idle time (seconds)
    pub const IDLE_TORQUE_THRESHOLD: f32 = 0.1;
    /// Angular impulse per second of idle
    pub const IDLE_TORQUE_RATE: f32 = 2000.0;

    /// Hero bounds
    pub const MAX_VERTICAL_VELOCITY: f32 = 400.0;
    pub const MAX_ANGULAR_VELOCITY: f32 = 2.0;
    pub const MIN_ROTATION_DEG: f32 = -20.0;
    pub const MAX_ROTATION_DEG: f32 = 30.0;
    /// Face down in the dirt
    pub const DEATH_ROTATION_DEG: f32 = -90.0;

    /// Gravity (pixels/s²)
    pub const GRAVITY: f32 = -600.0;
    pub const HERO_MASS: f32 = 1.0;
    pub const HERO_INERTIA: f32 = 1.0;

    /// Persisted high score key
    pub const HIGH_SCORE_KEY: &str = "highScore";
}

/// Clamp a value to `[lo, hi]`.
///
/// Works for any partially ordered type. If `value` is unordered against the
/// bounds (NaN), it is returned unchanged.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, lo: T, hi: T) -> T {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inside_and_outside() {
        assert_eq!(clamp(5, 0, 10), 5);
        assert_eq!(clamp(-3, 0, 10), 0);
        assert_eq!(clamp(42, 0, 10), 10);
        assert_eq!(clamp(1.5_f32, -2.0, 2.0), 1.5);
        assert_eq!(clamp(-7.0_f32, -2.0, 2.0), -2.0);
    }

    #[test]
    fn test_clamp_degenerate_range() {
        assert_eq!(clamp(3.0_f32, 1.0, 1.0), 1.0);
    }
}
