//! Falling entities
//!
//! One [`Entity`] is one thing falling down the play area: either a sprite
//! from the asset catalog or a procedural shape. Entities are owned by the
//! round that spawned them and never outlive it.
//!
//! # Coordinates
//!
//! `(x, y)` is the entity's centre in play-area pixels, with y growing
//! downward. Entities spawn with their bottom edge at y = 0 (fully above the
//! visible area) and only ever move down.
//!
//! # Hit testing
//!
//! - Circles use an exact distance check.
//! - Sprites, squares, triangles and diamonds use their axis-aligned bounding
//!   box. For triangles and diamonds this is deliberately generous: clicks in
//!   the empty corners of the box still count.

use sdl2::pixels::Color;
use sdl2::rect::Rect;
use serde::{Deserialize, Serialize};

/// Unique (per round) identity of an entity.
pub type EntityId = u64;

/// Opaque reference to a loaded sprite image.
///
/// The core never looks inside it; the render sink resolves it to a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub usize);

/// Procedural shape kinds used by the shapes variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Circle,
    Square,
    Triangle,
    Diamond,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
    ];

    /// Canonical (matchable) name of the shape
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Diamond => "diamond",
        }
    }
}

/// How an entity looks on screen
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Sprite {
        handle: SpriteHandle,
        width: u32,
        height: u32,
    },
    Shape {
        kind: ShapeKind,
        color: Color,
    },
}

/// A single falling item.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    /// Centre x
    pub x: f32,
    /// Centre y (grows downward)
    pub y: f32,
    /// Half the bounding width. For circles, the radius.
    pub half_width: f32,
    /// Half the bounding height. For circles, the radius.
    pub half_height: f32,
    pub visual: Visual,
    /// Canonical name from the catalog (lowercase)
    pub name: String,
    /// Single-character matching key, if the active mode assigns one
    pub key: Option<char>,
    /// Text drawn over the entity, if any
    pub label: Option<String>,
    /// Clock time (ms) the entity was spawned at
    pub spawned_at: u64,
}

impl Entity {
    /// Returns true if the pointer at `(px, py)` lands on this entity.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        match self.visual {
            Visual::Shape {
                kind: ShapeKind::Circle,
                ..
            } => {
                let dx = px - self.x;
                let dy = py - self.y;
                dx * dx + dy * dy <= self.half_width * self.half_width
            }
            // Everything else, triangles and diamonds included, uses the box
            _ => {
                px >= self.x - self.half_width
                    && px <= self.x + self.half_width
                    && py >= self.y - self.half_height
                    && py <= self.y + self.half_height
            }
        }
    }

    /// Moves the entity down by `fall_speed`. Negative speeds are ignored.
    pub fn fall(&mut self, fall_speed: f32) {
        self.y += fall_speed.max(0.0);
    }

    /// True once the entity's top edge is at or past the bottom of the play area.
    pub fn is_below(&self, height: f32) -> bool {
        self.y - self.half_height >= height
    }

    /// Milliseconds the entity has been alive at time `now`
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.spawned_at)
    }

    /// True if the entity outlived `lifespan_ms`. No lifespan means it never expires.
    pub fn is_expired(&self, now: u64, lifespan_ms: Option<u64>) -> bool {
        lifespan_ms.is_some_and(|lifespan| self.age(now) > lifespan)
    }

    /// Screen rectangle covering the entity's bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(
            (self.x - self.half_width).round() as i32,
            (self.y - self.half_height).round() as i32,
            (self.half_width * 2.0).round().max(1.0) as u32,
            (self.half_height * 2.0).round().max(1.0) as u32,
        )
    }
}
