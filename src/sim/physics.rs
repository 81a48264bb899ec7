//! Minimal physics engine stand-in
//!
//! Enough of an engine to run the game headless: gravity integration for the
//! hero and axis-aligned overlap tests against obstacle parts, the ground
//! and the ceiling. Contacts are reported once when an overlap begins and
//! queued on the state for the next tick.

use glam::Vec2;

use super::state::{BodyTag, Contact, ContactKey, GameState};

/// Axis-aligned box overlap (centers and full sizes)
#[inline]
pub fn aabb_overlap(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    let d = (a_center - b_center).abs();
    let reach = (a_size + b_size) * 0.5;
    d.x < reach.x && d.y < reach.y
}

/// Integrate the hero body over `dt`
pub fn integrate(state: &mut GameState, dt: f32) {
    let gravity = state.tuning.gravity;
    let hero = &mut state.hero;
    let Some(body) = hero.body.as_mut() else {
        return;
    };

    body.velocity.y += gravity * dt;
    hero.position += body.velocity * dt;
    if body.allows_rotation {
        hero.rotation += body.angular_velocity * dt;
    }
}

/// Find overlaps that began since the last call and queue them as contacts.
/// Returns the number of new contacts.
pub fn detect_contacts(state: &mut GameState) -> usize {
    if !state.hero.collisions_enabled() {
        state.touching.clear();
        return 0;
    }

    let hero_pos = state.hero.position;
    let hero_size = state.hero.size;
    let half_h = hero_size.y * 0.5;

    let mut current: Vec<(ContactKey, BodyTag)> = Vec::new();

    if hero_pos.y - half_h <= state.ground_y {
        current.push((ContactKey::Ground, BodyTag::Ground));
    }
    if hero_pos.y + half_h >= state.ceiling_y {
        current.push((ContactKey::Ceiling, BodyTag::Ceiling));
    }

    let layer = &state.obstacle_layer;
    for obstacle in &layer.obstacles {
        for (index, part) in obstacle.parts.iter().enumerate() {
            let center = layer.to_scene(obstacle.position + part.offset);
            if aabb_overlap(hero_pos, hero_size, center, part.size) {
                current.push((
                    ContactKey::Part {
                        obstacle: obstacle.id,
                        part: index,
                    },
                    part.tag,
                ));
            }
        }
    }

    let mut began = 0;
    for (key, tag) in &current {
        if !state.touching.contains(key) {
            state
                .pending_contacts
                .push_back(Contact::new(BodyTag::Hero, *tag));
            began += 1;
        }
    }
    state.touching = current.into_iter().map(|(key, _)| key).collect();
    began
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Obstacle, ObstaclePart};

    fn place_goal(state: &mut GameState, at: Vec2) {
        let id = state.obstacle_layer.next_obstacle_id();
        state.obstacle_layer.obstacles.push(Obstacle {
            id,
            position: at,
            parts: vec![ObstaclePart {
                tag: BodyTag::Goal,
                offset: Vec2::ZERO,
                size: Vec2::new(12.0, 130.0),
            }],
        });
    }

    #[test]
    fn test_aabb_overlap() {
        let size = Vec2::splat(10.0);
        assert!(aabb_overlap(Vec2::ZERO, size, Vec2::new(9.0, 0.0), size));
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size));
        assert!(!aabb_overlap(Vec2::ZERO, size, Vec2::new(0.0, 11.0), size));
    }

    #[test]
    fn test_gravity_pulls_hero_down() {
        let mut state = GameState::new(1);
        let y0 = state.hero.position.y;
        integrate(&mut state, SIM_DT);
        assert!(state.hero.vertical_velocity() < 0.0);
        assert!(state.hero.position.y < y0);
    }

    #[test]
    fn test_locked_rotation_does_not_integrate() {
        let mut state = GameState::new(1);
        let body = state.hero.body.as_mut().unwrap();
        body.angular_velocity = 2.0;
        body.allows_rotation = false;
        integrate(&mut state, SIM_DT);
        assert_eq!(state.hero.rotation, 0.0);
    }

    #[test]
    fn test_missing_body_skips_integration() {
        let mut state = GameState::new(1);
        state.hero.body = None;
        let y0 = state.hero.position.y;
        integrate(&mut state, SIM_DT);
        assert_eq!(state.hero.position.y, y0);
    }

    #[test]
    fn test_contact_reported_once_per_overlap() {
        let mut state = GameState::new(1);
        let hero = state.hero.position;
        place_goal(&mut state, hero);

        assert_eq!(detect_contacts(&mut state), 1);
        assert_eq!(detect_contacts(&mut state), 0);
        assert_eq!(
            state.pending_contacts.front(),
            Some(&Contact::new(BodyTag::Hero, BodyTag::Goal))
        );

        // Leave and re-enter
        state.obstacle_layer.origin.x = 500.0;
        assert_eq!(detect_contacts(&mut state), 0);
        state.obstacle_layer.origin.x = 0.0;
        assert_eq!(detect_contacts(&mut state), 1);
    }

    #[test]
    fn test_ground_contact() {
        let mut state = GameState::new(1);
        state.hero.position.y = state.ground_y + 5.0;
        assert_eq!(detect_contacts(&mut state), 1);
        assert_eq!(
            state.pending_contacts.pop_front(),
            Some(Contact::new(BodyTag::Hero, BodyTag::Ground))
        );
    }

    #[test]
    fn test_ceiling_contact() {
        let mut state = GameState::new(1);
        state.hero.position.y = state.ceiling_y;
        assert_eq!(detect_contacts(&mut state), 1);
        assert_eq!(
            state.pending_contacts.pop_front(),
            Some(Contact::new(BodyTag::Hero, BodyTag::Ceiling))
        );
    }

    #[test]
    fn test_disabled_collisions_report_nothing() {
        let mut state = GameState::new(1);
        state.hero.body.as_mut().unwrap().collisions_enabled = false;
        state.hero.position.y = 0.0;
        assert_eq!(detect_contacts(&mut state), 0);
        assert!(state.pending_contacts.is_empty());
    }
}
