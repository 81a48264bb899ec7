//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run deterministically. Contacts queued
//! since the previous tick are resolved first, so a game over raised between
//! ticks gates this tick's update.

use super::contact::drain_contacts;
use super::state::{GamePhase, GameState};
use super::{hero, obstacles, scroll};
use crate::persistence::KeyValueStore;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Touch began since the last tick
    pub touch: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, store: &mut dyn KeyValueStore, dt: f32) {
    drain_contacts(state, store);

    if input.touch {
        hero::on_input(state);
    }

    // Skip any updates once the run is over
    if state.phase != GamePhase::Active {
        return;
    }

    state.time_ticks += 1;

    // Hero bounds (a missing body reads as zero velocity)
    log::trace!("tick {} vy={:.1}", state.time_ticks, state.hero.vertical_velocity());
    hero::on_tick(state, dt);

    // Scroll world
    let half_width = state.viewport.x * 0.5;
    scroll::scroll(&mut state.ground, state.tuning.scroll_speed * dt, half_width);
    scroll::scroll(
        &mut state.clouds,
        state.tuning.cloud_scroll_speed * dt,
        half_width,
    );

    // Obstacles ride the same scroll, then the spawn timer advances
    obstacles::advance(&mut state.obstacle_layer, state.tuning.scroll_speed * dt);

    let GameState {
        obstacle_layer,
        spawn_ticks,
        obstacle_template,
        tuning,
        rng,
        ..
    } = state;
    *spawn_ticks += 1;
    obstacles::spawn_if_due(obstacle_layer, spawn_ticks, obstacle_template, tuning, rng);
}
