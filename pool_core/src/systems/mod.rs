pub mod collision;
pub mod cushions;
pub mod movement;
pub mod pockets;

pub use collision::*;
pub use cushions::*;
pub use movement::*;
pub use pockets::*;
