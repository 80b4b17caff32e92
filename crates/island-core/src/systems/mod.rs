//! Systems - logic that operates on components

mod bullets;
mod footing;
mod gates;
mod guards;
mod interaction;
mod player;
mod survivors;

pub use bullets::*;
pub use footing::*;
pub use gates::*;
pub use guards::*;
pub use interaction::*;
pub use player::*;
pub use survivors::*;
