//! Idle/demo mode - the game plays itself
//!
//! Aims for the middle of the next goal and flaps whenever the hero sinks
//! below it. Not perfect, which keeps demo runs from lasting forever.

use super::state::{BodyTag, GameState};
use super::tick::TickInput;

/// How far below the target the hero may sink before flapping
const SINK_MARGIN: f32 = 12.0;

/// Height of the next goal the hero has not passed yet
pub fn next_goal_height(state: &GameState) -> Option<f32> {
    let hero_left = state.hero.position.x - state.hero.size.x * 0.5;
    let layer = &state.obstacle_layer;

    layer
        .obstacles
        .iter()
        .flat_map(|o| o.parts.iter().map(move |p| (o, p)))
        .filter(|(_, p)| p.tag == BodyTag::Goal)
        .map(|(o, p)| (layer.to_scene(o.position + p.offset), p.size))
        .filter(|(center, size)| center.x + size.x * 0.5 >= hero_left)
        .min_by(|(a, _), (b, _)| a.x.total_cmp(&b.x))
        .map(|(center, _)| center.y)
}

/// Input for this tick
pub fn decide(state: &GameState) -> TickInput {
    let target = next_goal_height(state).unwrap_or(state.viewport.y * 0.5);
    let falling = state.hero.vertical_velocity() <= 0.0;
    TickInput {
        touch: falling && state.hero.position.y < target - SINK_MARGIN,
    }
}
