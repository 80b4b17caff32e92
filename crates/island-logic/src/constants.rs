//! Game constants - arena size, movement tuning and combat numbers.
//!
//! Speeds are in pixels per simulation tick; durations are in seconds.

pub mod arena {
    pub const WIDTH: f32 = 1200.0;
    pub const HEIGHT: f32 = 720.0;
    /// Thickness of the wall that rings every zone.
    pub const BORDER: f32 = 40.0;
    /// Fixed simulation rate.
    pub const TICK_HZ: f32 = 60.0;
    pub const TICK_SECONDS: f32 = 1.0 / TICK_HZ;

    /// Window inside which pickups and guards may spawn.
    pub const SAFE_MIN_X: f32 = 60.0;
    pub const SAFE_MAX_X: f32 = WIDTH - 100.0;
    pub const SAFE_MIN_Y: f32 = 60.0;
    pub const SAFE_MAX_Y: f32 = HEIGHT - 100.0;
    /// Side of the square probe used to keep spawns away from walls.
    pub const SAFE_PROBE: f32 = 40.0;
}

pub mod player {
    pub const WIDTH: f32 = 22.0;
    pub const HEIGHT: f32 = 32.0;
    pub const SPEED: f32 = 3.0;
    pub const SPRINT_MULTIPLIER: f32 = 1.6;
    pub const MAX_STAMINA: f32 = 100.0;
    pub const START_X: f32 = 100.0;
    pub const START_Y: f32 = 550.0;
    pub const FIRE_COOLDOWN: f32 = 0.18;
    pub const MUZZLE_FLASH: f32 = 0.05;
}

pub mod guard {
    pub const WIDTH: f32 = 22.0;
    pub const HEIGHT: f32 = 32.0;
    /// Guards stop closing in once this near the player.
    pub const STOP_DISTANCE: f32 = 75.0;
    /// A patrol waypoint counts as reached inside this radius.
    pub const WAYPOINT_RADIUS: f32 = 10.0;
    /// Number of segments the sight line is split into.
    pub const SIGHT_STEPS: u32 = 26;
    pub const SIGHT_PROBE: f32 = 4.0;
    pub const FIRST_SHOT_MIN: f32 = 0.2;
    pub const FIRST_SHOT_MAX: f32 = 0.8;
    /// Constructor clamp on the spawn corner.
    pub const CLAMP_MIN: f32 = 50.0;
    pub const CLAMP_MARGIN: f32 = 70.0;
}

pub mod survivor {
    pub const WIDTH: f32 = 20.0;
    pub const HEIGHT: f32 = 30.0;
    pub const FOLLOW_FAR: f32 = 50.0;
    pub const FOLLOW_NEAR: f32 = 30.0;
    pub const FOLLOW_SPEED: f32 = 2.2;
    pub const RETREAT_SPEED: f32 = 1.0;
    /// Reach for the interact key around a survivor's body (total, both axes).
    pub const INTERACT_REACH: f32 = 24.0;
    /// Followers whose center crosses this x on the Harbor pier are rescued.
    pub const RESCUE_X: f32 = 1010.0;
    /// Placement behind the player after a gate transfer.
    pub const TRANSFER_OFFSET_X: f32 = -40.0;
    pub const TRANSFER_SPACING: f32 = 20.0;
    pub const TRANSFER_OFFSET_Y: f32 = 20.0;
}

pub mod combat {
    pub const BULLET_SPEED: f32 = 10.0;
    pub const PLAYER_BULLET_RADIUS: f32 = 4.0;
    pub const GUARD_BULLET_RADIUS: f32 = 5.0;
    pub const GUN_AMMO: u32 = 20;
    pub const AMMO_BOX: u32 = 12;
}

pub mod timers {
    pub const GATE_COOLDOWN: f32 = 0.7;
    pub const HINT_COOLDOWN: f32 = 1.0;
    pub const DAMAGE_FLASH: f32 = 0.2;
    pub const FLICKER: f32 = 0.15;
    pub const MESSAGE_SHORT: f32 = 2.0;
    pub const MESSAGE_LONG: f32 = 3.0;
    /// Footstep cadence while walking and while sprinting.
    pub const FOOTSTEP_WALK: f32 = 0.35;
    pub const FOOTSTEP_SPRINT: f32 = 0.25;
}

pub mod objectives {
    pub const CLUES_REQUIRED: u32 = 3;
    pub const SURVIVORS_REQUIRED: u32 = 2;
}

pub mod harbor {
    use crate::geometry::{Rect, Vec2};

    /// Walkable pier over the water.
    pub const PIER: Rect = Rect::new(800.0, 200.0, 300.0, 40.0);
    /// The escape boat moored at the pier end.
    pub const BOAT: Rect = Rect::new(1020.0, 210.0, 80.0, 40.0);
    /// Solid ground south of the beach.
    pub const GROUND: Rect = Rect::new(40.0, 300.0, 1120.0, 340.0);
    /// Band that removes pier pilings from the collision set.
    pub const PIER_CLEARANCE: Rect = Rect::new(800.0, 150.0, 300.0, 40.0);
    /// Anything whose center is above this line is in the water.
    pub const SHORELINE_Y: f32 = 200.0;
    /// Where a swimmer is put back on land.
    pub const LAND_RESCUE: Vec2 = Vec2::new(500.0, 400.0);
    /// Arrivals through a gate are pushed south of this line.
    pub const ARRIVAL_MIN_Y: f32 = 300.0;
    pub const ARRIVAL_Y: f32 = 400.0;
}
