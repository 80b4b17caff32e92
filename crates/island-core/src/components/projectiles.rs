//! Bullets in flight.

use island_logic::constants::combat;
use island_logic::geometry::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Who fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Guard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit direction of travel
    pub dir: Vec2,
    pub owner: Faction,
    pub radius: f32,
}

impl Bullet {
    /// A zero `direction` fires to the right.
    pub fn new(pos: Vec2, direction: Vec2, owner: Faction) -> Self {
        let radius = match owner {
            Faction::Player => combat::PLAYER_BULLET_RADIUS,
            Faction::Guard => combat::GUARD_BULLET_RADIUS,
        };
        Self {
            pos,
            dir: direction.normalize_or(Vec2::RIGHT),
            owner,
            radius,
        }
    }

    /// Square hitbox used against walls.
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, self.radius * 2.0, self.radius * 2.0)
    }
}
