pub mod credits;
pub mod tile;
pub mod tileset;

pub use credits::*;
pub use tile::*;
pub use tileset::*;
