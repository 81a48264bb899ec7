//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without a rebuild. Missing fields fall back to [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::deg_to_rad;
use crate::error::SceneError;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed tick length (seconds)
    pub fixed_dt: f32,
    /// Ground and obstacle scroll speed (pixels/s)
    pub scroll_speed: f32,
    /// Cloud parallax speed (pixels/s)
    pub cloud_scroll_speed: f32,

    /// Seconds between obstacle spawns
    pub spawn_interval: f32,
    pub spawn_x: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,

    pub flap_impulse: f32,
    pub flap_angular_impulse: f32,
    pub idle_torque_threshold: f32,
    pub idle_torque_rate: f32,

    pub max_vertical_velocity: f32,
    pub max_angular_velocity: f32,
    pub min_rotation_deg: f32,
    pub max_rotation_deg: f32,
    pub death_rotation_deg: f32,

    pub gravity: f32,
    pub hero_mass: f32,
    pub hero_inertia: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_dt: SIM_DT,
            scroll_speed: SCROLL_SPEED,
            cloud_scroll_speed: SCROLL_SPEED,

            spawn_interval: SPAWN_INTERVAL,
            spawn_x: SPAWN_X,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,

            flap_impulse: FLAP_IMPULSE,
            flap_angular_impulse: FLAP_ANGULAR_IMPULSE,
            idle_torque_threshold: IDLE_TORQUE_THRESHOLD,
            idle_torque_rate: IDLE_TORQUE_RATE,

            max_vertical_velocity: MAX_VERTICAL_VELOCITY,
            max_angular_velocity: MAX_ANGULAR_VELOCITY,
            min_rotation_deg: MIN_ROTATION_DEG,
            max_rotation_deg: MAX_ROTATION_DEG,
            death_rotation_deg: DEATH_ROTATION_DEG,

            gravity: GRAVITY,
            hero_mass: HERO_MASS,
            hero_inertia: HERO_INERTIA,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| SceneError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SceneError> {
        if !(self.fixed_dt > 0.0) {
            return Err(SceneError::InvalidTuning("fixed_dt"));
        }
        if !(self.spawn_interval > 0.0) {
            return Err(SceneError::InvalidTuning("spawn_interval"));
        }
        if self.spawn_y_min > self.spawn_y_max {
            return Err(SceneError::InvalidTuning("spawn_y_min"));
        }
        if self.min_rotation_deg > self.max_rotation_deg {
            return Err(SceneError::InvalidTuning("min_rotation_deg"));
        }
        if !(self.max_angular_velocity >= 0.0) {
            return Err(SceneError::InvalidTuning("max_angular_velocity"));
        }
        if !(self.hero_mass > 0.0) {
            return Err(SceneError::InvalidTuning("hero_mass"));
        }
        if !(self.hero_inertia > 0.0) {
            return Err(SceneError::InvalidTuning("hero_inertia"));
        }
        if self.scroll_speed < 0.0 || self.cloud_scroll_speed < 0.0 {
            log::warn!("Negative scroll speed: the world will scroll backwards");
        }
        Ok(())
    }

    /// Spawn interval in whole ticks (1.5s at 60 Hz = 90 ticks)
    pub fn spawn_interval_ticks(&self) -> u32 {
        ((self.spawn_interval / self.fixed_dt).round() as u32).max(1)
    }

    /// Rotation bounds in radians
    pub fn rotation_bounds(&self) -> (f32, f32) {
        (
            deg_to_rad(self.min_rotation_deg),
            deg_to_rad(self.max_rotation_deg),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spawn_interval_is_90_ticks() {
        assert_eq!(Tuning::default().spawn_interval_ticks(), 90);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 200.0 }"#).unwrap();
        assert_eq!(tuning.scroll_speed, 200.0);
        assert_eq!(tuning.spawn_y_min, SPAWN_Y_MIN);
        assert_eq!(tuning.cloud_scroll_speed, SCROLL_SPEED);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let err = Tuning::from_json(r#"{ "spawn_y_min": 500.0, "spawn_y_max": 100.0 }"#)
            .unwrap_err();
        assert_eq!(err, SceneError::InvalidTuning("spawn_y_min"));

        let err = Tuning::from_json(r#"{ "fixed_dt": 0.0 }"#).unwrap_err();
        assert_eq!(err, SceneError::InvalidTuning("fixed_dt"));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(SceneError::Parse(_))
        ));
    }
}
