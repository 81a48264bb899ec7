//! Hero controller
//!
//! Shapes the physics engine's motion: flap impulses, velocity and rotation
//! bounds, and a nose-dive torque once the player stops tapping. Both entry
//! points do nothing unless the run is active.

use glam::Vec2;

use super::state::{GamePhase, GameState};
use crate::clamp;
use crate::feedback::{Effect, SoundEffect};

/// Touch began: cancel the fall and hop
pub fn on_input(state: &mut GameState) {
    if state.phase != GamePhase::Active {
        return;
    }
    let tuning = &state.tuning;

    if let Some(body) = state.hero.body.as_mut() {
        // Reset velocity so accumulated fall speed doesn't eat the flap
        body.velocity = Vec2::ZERO;
        body.apply_impulse(Vec2::new(0.0, tuning.flap_impulse));
        body.apply_angular_impulse(tuning.flap_angular_impulse);
    } else {
        log::warn!("Hero has no physics body, flap ignored");
    }

    state.hero.since_touch = 0.0;
    state.outbox.push(Effect::Sound(SoundEffect::Flap));
}

/// Per-tick bound enforcement. Clamps run after the idle torque so no tick
/// leaves the hero out of bounds.
pub fn on_tick(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Active {
        return;
    }
    let tuning = &state.tuning;
    let hero = &mut state.hero;

    if let Some(body) = hero.body.as_mut() {
        // Ceiling only; falling speed is left to gravity
        if body.velocity.y > tuning.max_vertical_velocity {
            body.velocity.y = tuning.max_vertical_velocity;
        }

        if hero.since_touch > tuning.idle_torque_threshold {
            body.apply_angular_impulse(-tuning.idle_torque_rate * dt);
        }

        let limit = tuning.max_angular_velocity;
        body.angular_velocity = clamp(body.angular_velocity, -limit, limit);
    }

    let (min_rot, max_rot) = tuning.rotation_bounds();
    hero.rotation = clamp(hero.rotation, min_rot, max_rot);

    hero.since_touch += dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    #[test]
    fn test_flap_resets_velocity() {
        let mut state = GameState::new(1);
        state.hero.body.as_mut().unwrap().velocity = Vec2::new(12.0, -350.0);
        state.hero.since_touch = 2.0;

        on_input(&mut state);

        let body = state.hero.body.unwrap();
        assert_eq!(body.velocity, Vec2::new(0.0, 300.0));
        assert_eq!(body.angular_velocity, 1.0);
        assert_eq!(state.hero.since_touch, 0.0);
        assert_eq!(state.outbox, vec![Effect::Sound(SoundEffect::Flap)]);
    }

    #[test]
    fn test_input_ignored_after_game_over() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        state.hero.body.as_mut().unwrap().velocity = Vec2::new(0.0, -100.0);

        on_input(&mut state);

        assert_eq!(state.hero.vertical_velocity(), -100.0);
        assert!(state.outbox.is_empty());
    }

    #[test]
    fn test_vertical_velocity_capped() {
        let mut state = GameState::new(1);
        state.hero.body.as_mut().unwrap().velocity.y = 900.0;
        on_tick(&mut state, SIM_DT);
        assert_eq!(state.hero.vertical_velocity(), 400.0);
    }

    #[test]
    fn test_fall_speed_not_clamped() {
        let mut state = GameState::new(1);
        state.hero.body.as_mut().unwrap().velocity.y = -5000.0;
        on_tick(&mut state, SIM_DT);
        assert_eq!(state.hero.vertical_velocity(), -5000.0);
    }

    #[test]
    fn test_no_idle_torque_right_after_flap() {
        let mut state = GameState::new(1);
        on_input(&mut state);
        on_tick(&mut state, SIM_DT);
        // Flap spin survives, only clamped
        assert_eq!(state.hero.angular_velocity(), 1.0);
    }

    #[test]
    fn test_idle_torque_drives_nose_dive() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            on_tick(&mut state, SIM_DT);
        }
        assert_eq!(state.hero.angular_velocity(), -2.0);
        assert!(state.hero.since_touch > 0.1);
    }

    #[test]
    fn test_rotation_clamped() {
        let mut state = GameState::new(1);
        state.hero.rotation = 2.0;
        on_tick(&mut state, SIM_DT);
        assert!((state.hero.rotation - 30f32.to_radians()).abs() < 1e-6);

        state.hero.rotation = -2.0;
        on_tick(&mut state, SIM_DT);
        assert!((state.hero.rotation + 20f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_missing_body_keeps_tick_alive() {
        let mut state = GameState::new(1);
        state.hero.body = None;
        state.hero.rotation = 1.5;
        on_input(&mut state);
        on_tick(&mut state, SIM_DT);
        assert_eq!(state.hero.vertical_velocity(), 0.0);
        assert!((state.hero.rotation - 30f32.to_radians()).abs() < 1e-6);
        assert!((state.hero.since_touch - SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn test_tick_ignored_after_game_over() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        state.hero.body.as_mut().unwrap().velocity.y = 900.0;
        on_tick(&mut state, SIM_DT);
        assert_eq!(state.hero.vertical_velocity(), 900.0);
        assert_eq!(state.hero.since_touch, 0.0);
    }

    proptest! {
        #[test]
        fn prop_bounds_hold_after_every_tick(
            steps in prop::collection::vec(
                (any::<bool>(), -2000.0f32..2000.0, -50.0f32..50.0, -4.0f32..4.0),
                1..120,
            )
        ) {
            let mut state = GameState::new(7);
            let (min_rot, max_rot) = state.tuning.rotation_bounds();
            for (tap, kick_y, spin, rot) in steps {
                if tap {
                    on_input(&mut state);
                }
                // Arbitrary outside disturbance between ticks
                let body = state.hero.body.as_mut().unwrap();
                body.apply_impulse(Vec2::new(0.0, kick_y));
                body.apply_angular_impulse(spin);
                state.hero.rotation += rot;

                on_tick(&mut state, SIM_DT);

                prop_assert!(state.hero.vertical_velocity() <= 400.0);
                let w = state.hero.angular_velocity();
                prop_assert!((-2.0..=2.0).contains(&w));
                prop_assert!(state.hero.rotation >= min_rot && state.hero.rotation <= max_rot);
            }
        }
    }
}
