//! Obstacle spawner and recycler
//!
//! Obstacles ride the obstacle layer, which scrolls with the world. A unit
//! is destroyed once its scene-space x reaches 0. A new unit appears beyond
//! the right edge every spawn interval, at a random height.

use glam::Vec2;
use rand::Rng;

use super::state::{Obstacle, ObstacleLayer};
use crate::layout::ObstacleTemplate;
use crate::tuning::Tuning;

/// Scroll the layer left by `dx` and destroy obstacles that left the scene.
/// Returns how many were destroyed.
pub fn advance(layer: &mut ObstacleLayer, dx: f32) -> usize {
    layer.origin.x -= dx;

    let origin = layer.origin;
    let before = layer.obstacles.len();
    layer
        .obstacles
        .retain(|obstacle| (origin + obstacle.position).x > 0.0);
    let removed = before - layer.obstacles.len();
    if removed > 0 {
        log::debug!("Removed {removed} obstacle(s)");
    }
    removed
}

/// Place a new obstacle at the spawn column with a random height
pub fn spawn<R: Rng + ?Sized>(
    layer: &mut ObstacleLayer,
    template: &ObstacleTemplate,
    tuning: &Tuning,
    rng: &mut R,
) -> u32 {
    let y = rng.random_range(tuning.spawn_y_min..=tuning.spawn_y_max);
    let scene = Vec2::new(tuning.spawn_x, y);
    let id = layer.next_obstacle_id();
    let position = layer.to_local(scene);
    layer.obstacles.push(Obstacle {
        id,
        position,
        parts: template.parts.clone(),
    });
    log::debug!("Spawned obstacle {id} at y={y:.1}");
    id
}

/// Spawn once the timer reaches the interval, then reset it.
/// Returns the new obstacle's ID if one was spawned.
pub fn spawn_if_due<R: Rng + ?Sized>(
    layer: &mut ObstacleLayer,
    spawn_ticks: &mut u32,
    template: &ObstacleTemplate,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<u32> {
    if *spawn_ticks < tuning.spawn_interval_ticks() {
        return None;
    }
    let id = spawn(layer, template, tuning, rng);
    *spawn_ticks = 0;
    Some(id)
}
