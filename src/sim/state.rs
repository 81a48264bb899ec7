//! Game state and core simulation types
//!
//! One `GameState` is one run. Restarting builds a fresh one; only the
//! persisted high score outlives it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::feedback::{ButtonState, Effect};
use crate::highscores::HighScore;
use crate::layout::{ObstacleTemplate, SceneLayout};
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Hero is flying; the world scrolls
    Active,
    /// Run ended; only a restart leaves this phase
    GameOver,
}

/// What a physics body represents, for contact decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyTag {
    Hero,
    /// Scoring sensor between the barriers
    Goal,
    Obstacle,
    Ground,
    Ceiling,
}

/// Hero sprite animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroAnimation {
    Flapping,
    None,
}

/// Dynamic body driven by the physics engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub mass: f32,
    pub inertia: f32,
    /// Angular impulses and integration only apply while set
    pub allows_rotation: bool,
    /// Cleared by the death pose; the body stops generating contacts
    pub collisions_enabled: bool,
}

impl RigidBody {
    pub fn new(mass: f32, inertia: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            mass,
            inertia,
            allows_rotation: true,
            collisions_enabled: true,
        }
    }

    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass;
    }

    pub fn apply_angular_impulse(&mut self, impulse: f32) {
        if self.allows_rotation {
            self.angular_velocity += impulse / self.inertia;
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    /// Scene-space center
    pub position: Vec2,
    pub size: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
    /// None if the body failed to attach; reads fall back to zero
    pub body: Option<RigidBody>,
    /// Seconds since the last touch
    pub since_touch: f32,
    pub animation: HeroAnimation,
}

impl Hero {
    pub fn new(position: Vec2, size: Vec2, body: Option<RigidBody>) -> Self {
        Self {
            position,
            size,
            rotation: 0.0,
            body,
            since_touch: 0.0,
            animation: HeroAnimation::Flapping,
        }
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.body.as_ref().map_or(0.0, |b| b.velocity.y)
    }

    pub fn angular_velocity(&self) -> f32 {
        self.body.as_ref().map_or(0.0, |b| b.angular_velocity)
    }

    pub fn collisions_enabled(&self) -> bool {
        self.body.as_ref().is_some_and(|b| b.collisions_enabled)
    }
}

/// A background sprite in a scroll layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Layer-local center
    pub position: Vec2,
    pub size: Vec2,
}

impl Tile {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }
}

/// Horizontally tiling layer sharing one scroll velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollLayer {
    /// Layer anchor in scene space
    pub origin: Vec2,
    pub tiles: Vec<Tile>,
}

impl ScrollLayer {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self {
            origin: Vec2::ZERO,
            tiles,
        }
    }

    /// Layer-local point to scene space
    pub fn to_scene(&self, local: Vec2) -> Vec2 {
        self.origin + local
    }

    /// Scene-space point to layer-local
    pub fn to_local(&self, scene: Vec2) -> Vec2 {
        scene - self.origin
    }
}

/// One collidable piece of an obstacle (obstacle-local center)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePart {
    pub tag: BodyTag,
    pub offset: Vec2,
    pub size: Vec2,
}

/// A spawned obstacle unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Layer-local position
    pub position: Vec2,
    pub parts: Vec<ObstaclePart>,
}

/// Collection owning every live obstacle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleLayer {
    pub origin: Vec2,
    pub obstacles: Vec<Obstacle>,
    next_id: u32,
}

impl ObstacleLayer {
    /// Allocate a new obstacle ID
    pub fn next_obstacle_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn to_scene(&self, local: Vec2) -> Vec2 {
        self.origin + local
    }

    pub fn to_local(&self, scene: Vec2) -> Vec2 {
        scene - self.origin
    }
}

/// Identity of an ongoing overlap, for contact-begin detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKey {
    Part { obstacle: u32, part: usize },
    Ground,
    Ceiling,
}

/// Contact-begin event between two bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyTag,
    pub b: BodyTag,
}

impl Contact {
    pub fn new(a: BodyTag, b: BodyTag) -> Self {
        Self { a, b }
    }

    pub fn involves(&self, tag: BodyTag) -> bool {
        self.a == tag || self.b == tag
    }
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub viewport: Vec2,
    pub ground_y: f32,
    pub ceiling_y: f32,
    pub hero: Hero,
    pub ground: ScrollLayer,
    pub clouds: ScrollLayer,
    pub obstacle_layer: ObstacleLayer,
    /// Resolved at scene construction so spawning cannot fail mid-run
    pub obstacle_template: ObstacleTemplate,
    /// Ticks since the last spawn
    pub spawn_ticks: u32,
    /// Points this run
    pub score: u32,
    pub high_score: HighScore,
    pub restart_button: ButtonState,
    /// Simulation tick counter (Active ticks only)
    pub time_ticks: u64,
    /// Contact events waiting for the next tick
    pub pending_contacts: VecDeque<Contact>,
    /// Overlaps seen last physics step
    pub touching: Vec<ContactKey>,
    /// Effects for the host to play
    pub outbox: Vec<Effect>,
    pub rng: Pcg32,
}

impl GameState {
    /// Stock layout, stock template, default tuning, no stored high score
    pub fn new(seed: u64) -> Self {
        let template = ObstacleTemplate::carrots(130.0);
        Self::from_layout(
            &SceneLayout::default(),
            template,
            Tuning::default(),
            HighScore::default(),
            seed,
        )
    }

    /// Build from an injected layout
    pub fn from_layout(
        layout: &SceneLayout,
        obstacle_template: ObstacleTemplate,
        tuning: Tuning,
        high_score: HighScore,
        seed: u64,
    ) -> Self {
        let body = RigidBody::new(tuning.hero_mass, tuning.hero_inertia);
        Self {
            phase: GamePhase::Active,
            viewport: layout.viewport,
            ground_y: layout.ground_y,
            ceiling_y: layout.ceiling_y,
            hero: Hero::new(layout.hero.position, layout.hero.size, Some(body)),
            ground: ScrollLayer::new(layout.ground_tiles.clone()),
            clouds: ScrollLayer::new(layout.cloud_tiles.clone()),
            obstacle_layer: ObstacleLayer::default(),
            obstacle_template,
            spawn_ticks: 0,
            score: 0,
            high_score,
            restart_button: ButtonState::Hidden,
            time_ticks: 0,
            pending_contacts: VecDeque::new(),
            touching: Vec::new(),
            outbox: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Spawn timer in seconds
    pub fn spawn_timer(&self) -> f32 {
        self.spawn_ticks as f32 * self.tuning.fixed_dt
    }

    /// Queue a contact-begin event for the next tick
    pub fn push_contact(&mut self, contact: Contact) {
        self.pending_contacts.push_back(contact);
    }

    /// Take all queued effects
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.outbox)
    }
}
