//! Generation - populating a fresh round

mod actors;
mod items;

pub use actors::*;
pub use items::*;
