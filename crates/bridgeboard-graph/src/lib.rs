use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

pub mod geometry;
pub mod scene;
pub mod store;

pub use geometry::{EDGE_HIT_TOLERANCE, NODE_RADIUS, find_edge_near, find_node_at};
pub use scene::{EdgeEmphasis, EdgeSprite, NodeSprite, PointerPreview, Scene, SceneInput};
pub use store::{Edge, GraphStore, Node};

/// 2D position/offset in canvas coordinates (pixels, y-down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
