//! Island Core - Escape the Secret Island game engine
//!
//! A top-down escape game: slip past patrolling guards across four zones,
//! gather clues and keys, lead two survivors to the pier and board the boat.
//!
//! # Architecture
//!
//! The world is an Entity Component System via `hecs`:
//! - **Entities**: the player, guards, survivors, bullets
//! - **Components**: Pure data attached to entities (Body, Guard, Survivor, etc.)
//! - **Systems**: Free functions that query and update components
//!
//! Static rules (zone layouts, tasks, difficulty tables) live in `island_logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use island_core::prelude::*;
//!
//! let mut engine = GameEngine::new(42);
//! engine.handle(Command::Start);
//!
//! loop {
//!     engine.update(1.0 / 60.0, &PlayerInput::idle());
//!     for event in engine.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
pub mod events;
pub mod generation;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{Command, GameEngine, Phase};
    pub use crate::events::{GameEvent, SoundCue};
    pub use crate::systems::PlayerInput;
}
