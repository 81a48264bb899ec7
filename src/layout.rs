//! Scene layout and obstacle templates
//!
//! The scene graph is handed to the simulation as plain data instead of being
//! looked up by node name at runtime. Both the layout and the template
//! library can be loaded from JSON; the defaults reproduce the stock level.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::error::SceneError;
use crate::sim::state::{BodyTag, ObstaclePart, Tile};

/// Name of the stock obstacle template
pub const DEFAULT_OBSTACLE_TEMPLATE: &str = "Obstacles";

/// Hero placement at scene start
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeroSpawn {
    pub position: Vec2,
    pub size: Vec2,
}

/// Everything needed to build a scene, resolved up front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    /// Viewport size (scene space, origin bottom-left)
    pub viewport: Vec2,
    pub hero: HeroSpawn,
    /// Ground tiles (layer-local positions)
    pub ground_tiles: Vec<Tile>,
    /// Cloud tiles (layer-local positions)
    pub cloud_tiles: Vec<Tile>,
    /// Top of the ground band; touching it ends the run
    pub ground_y: f32,
    /// Ceiling height; touching it ends the run
    pub ceiling_y: f32,
    /// Template instantiated by the obstacle spawner
    pub obstacle_template: String,
}

impl Default for SceneLayout {
    fn default() -> Self {
        let ground = Vec2::new(VIEWPORT_WIDTH, 90.0);
        let cloud = Vec2::new(VIEWPORT_WIDTH, 120.0);
        Self {
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            hero: HeroSpawn {
                position: Vec2::new(90.0, 320.0),
                size: Vec2::new(30.0, 30.0),
            },
            ground_tiles: vec![
                Tile::new(Vec2::new(VIEWPORT_WIDTH * 0.5, 45.0), ground),
                Tile::new(Vec2::new(VIEWPORT_WIDTH * 1.5, 45.0), ground),
            ],
            cloud_tiles: vec![
                Tile::new(Vec2::new(VIEWPORT_WIDTH * 0.5, 470.0), cloud),
                Tile::new(Vec2::new(VIEWPORT_WIDTH * 1.5, 470.0), cloud),
            ],
            ground_y: 90.0,
            ceiling_y: VIEWPORT_HEIGHT,
            obstacle_template: DEFAULT_OBSTACLE_TEMPLATE.to_string(),
        }
    }
}

impl SceneLayout {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let layout: SceneLayout =
            serde_json::from_str(json).map_err(|e| SceneError::Parse(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check the layout is complete enough to build a scene
    pub fn validate(&self) -> Result<(), SceneError> {
        validate_tiles("ground", &self.ground_tiles)?;
        validate_tiles("clouds", &self.cloud_tiles)?;
        Ok(())
    }

    pub fn half_width(&self) -> f32 {
        self.viewport.x * 0.5
    }
}

fn validate_tiles(layer: &'static str, tiles: &[Tile]) -> Result<(), SceneError> {
    if tiles.is_empty() {
        return Err(SceneError::EmptyLayer(layer));
    }
    if let Some(index) = tiles.iter().position(|t| !(t.size.x > 0.0)) {
        return Err(SceneError::InvalidTile { layer, index });
    }
    Ok(())
}

/// Obstacle unit blueprint (obstacle-local part offsets)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    pub name: String,
    pub parts: Vec<ObstaclePart>,
}

impl ObstacleTemplate {
    /// Stock obstacle: two barriers around a goal sensor
    pub fn carrots(gap: f32) -> Self {
        let barrier = Vec2::new(52.0, 400.0);
        let half_gap = gap * 0.5;
        Self {
            name: DEFAULT_OBSTACLE_TEMPLATE.to_string(),
            parts: vec![
                ObstaclePart {
                    tag: BodyTag::Obstacle,
                    offset: Vec2::new(0.0, half_gap + barrier.y * 0.5),
                    size: barrier,
                },
                ObstaclePart {
                    tag: BodyTag::Obstacle,
                    offset: Vec2::new(0.0, -half_gap - barrier.y * 0.5),
                    size: barrier,
                },
                ObstaclePart {
                    tag: BodyTag::Goal,
                    offset: Vec2::ZERO,
                    size: Vec2::new(12.0, gap),
                },
            ],
        }
    }

    /// The goal region, if the template has one
    pub fn goal(&self) -> Option<&ObstaclePart> {
        self.parts.iter().find(|p| p.tag == BodyTag::Goal)
    }
}

/// Named obstacle templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateLibrary {
    templates: HashMap<String, ObstacleTemplate>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        let mut library = Self::empty();
        library.insert(ObstacleTemplate::carrots(130.0));
        library
    }
}

impl TemplateLibrary {
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Parse a JSON array of templates
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let templates: Vec<ObstacleTemplate> =
            serde_json::from_str(json).map_err(|e| SceneError::Parse(e.to_string()))?;
        let mut library = Self::empty();
        for template in templates {
            library.insert(template);
        }
        Ok(library)
    }

    pub fn insert(&mut self, template: ObstacleTemplate) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Resolve a template by name. A missing or goal-less template is a fatal
    /// configuration error.
    pub fn instantiate(&self, name: &str) -> Result<ObstacleTemplate, SceneError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| SceneError::MissingTemplate(name.to_string()))?;
        if template.goal().is_none() {
            return Err(SceneError::TemplateWithoutGoal(name.to_string()));
        }
        Ok(template.clone())
    }
}
