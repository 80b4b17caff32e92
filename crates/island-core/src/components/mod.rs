//! Component definitions for the ECS game world.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in systems.

mod actors;
mod common;
mod projectiles;

pub use actors::*;
pub use common::*;
pub use projectiles::*;
