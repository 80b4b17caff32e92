//! Pure game rules for Escape the Secret Island.
//!
//! Nothing in this crate touches the ECS, the window or the sound card.
//! Functions take plain data and return results, so every rule can be unit
//! tested and shared by the engine, the viewer and the validation harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`audio`] | Music/effect synthesis, WAV encoding, music director |
//! | [`constants`] | Arena size, movement tuning, combat numbers, timers |
//! | [`difficulty`] | Story / Survivor / Nightmare profiles |
//! | [`geometry`] | `Vec2` and axis-aligned `Rect` in screen space |
//! | [`items`] | Pickup kinds, ids and the default layout |
//! | [`movement`] | Wall collision, arena clamp, Harbor water rule |
//! | [`sight`] | Probe-based line of sight through walls |
//! | [`spawns`] | Pickup candidates, guard rosters, spawn safety |
//! | [`tasks`] | Region objectives and the escape condition |
//! | [`zones`] | Zone walls, gates, keys and the boat |

pub mod audio;
pub mod constants;
pub mod difficulty;
pub mod geometry;
pub mod items;
pub mod movement;
pub mod sight;
pub mod spawns;
pub mod tasks;
pub mod zones;
