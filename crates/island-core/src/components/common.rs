//! Spatial components shared by the player, guards and survivors.

use island_logic::geometry::{Rect, Vec2};
use island_logic::zones::Zone;
use serde::{Deserialize, Serialize};

/// Collision body in screen space
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Body {
    pub rect: Rect,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Displacement applied this tick, in pixels
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Velocity(pub Vec2);

/// Where a character is looking, plus its muzzle flash
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Facing {
    /// Unit vector
    pub look: Vec2,
    /// Seconds left on the muzzle flash
    pub muzzle_timer: f32,
}

impl Default for Facing {
    fn default() -> Self {
        Self {
            look: Vec2::RIGHT,
            muzzle_timer: 0.0,
        }
    }
}

impl Facing {
    pub fn tick(&mut self, dt: f32) {
        self.muzzle_timer = (self.muzzle_timer - dt).max(0.0);
    }
}

/// Zone an NPC currently stands in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Located(pub Zone);
