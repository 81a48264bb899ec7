//! Contact-driven scoring and game over
//!
//! Every contact-begin event lands here. A goal contact scores and the run
//! goes on; anything else ends the run. Once the run has ended every event
//! is ignored, so effects and persistence happen exactly once.

use super::state::{BodyTag, Contact, GamePhase, GameState, HeroAnimation};
use crate::deg_to_rad;
use crate::feedback::{ButtonState, Effect, SceneNode};
use crate::persistence::KeyValueStore;

/// What a contact did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Run already over; event dropped
    Ignored,
    /// Passed through a goal
    Scored { points: u32 },
    /// Run ended on this contact
    GameOver { points: u32, new_high_score: bool },
}

/// Apply one contact-begin event
pub fn handle_contact(
    state: &mut GameState,
    contact: Contact,
    store: &mut dyn KeyValueStore,
) -> ContactOutcome {
    if state.phase != GamePhase::Active {
        return ContactOutcome::Ignored;
    }

    if contact.involves(BodyTag::Goal) {
        state.score += 1;
        if state.high_score.observe(state.score) {
            log::debug!("Score {} leads the board", state.score);
        } else {
            log::debug!("Score {}", state.score);
        }
        return ContactOutcome::Scored {
            points: state.score,
        };
    }

    let points = state.score;
    let new_high_score = state.high_score.record_run_end(points, store);

    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over: {:?}/{:?} contact, {} point(s) after {} ticks",
        contact.a,
        contact.b,
        points,
        state.time_ticks
    );

    let death_rotation = deg_to_rad(state.tuning.death_rotation_deg);
    let hero = &mut state.hero;
    if let Some(body) = hero.body.as_mut() {
        body.allows_rotation = false;
        body.angular_velocity = 0.0;
    }
    hero.animation = HeroAnimation::None;

    // Death pose: face down, passive from now on
    hero.rotation = death_rotation;
    if let Some(body) = hero.body.as_mut() {
        body.collisions_enabled = false;
    }

    state
        .outbox
        .extend(SceneNode::TOP_LEVEL.iter().map(|node| Effect::Shake(*node)));
    state.outbox.push(Effect::HapticAlert);

    state.restart_button = ButtonState::Active;
    state.outbox.push(Effect::RestartButton(ButtonState::Active));

    ContactOutcome::GameOver {
        points,
        new_high_score,
    }
}

/// Drain queued contacts in arrival order
pub fn drain_contacts(state: &mut GameState, store: &mut dyn KeyValueStore) {
    while let Some(contact) = state.pending_contacts.pop_front() {
        handle_contact(state, contact, store);
    }
}
