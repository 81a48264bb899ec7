//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Contacts resolved at the start of a tick, in arrival order
//! - No rendering, audio or platform dependencies

pub mod autopilot;
pub mod contact;
pub mod hero;
pub mod obstacles;
pub mod physics;
pub mod scroll;
pub mod state;
pub mod tick;

pub use contact::{ContactOutcome, drain_contacts, handle_contact};
pub use state::{
    BodyTag, Contact, GamePhase, GameState, Hero, HeroAnimation, Obstacle, ObstacleLayer,
    ObstaclePart, RigidBody, ScrollLayer, Tile,
};
pub use tick::{TickInput, tick};
