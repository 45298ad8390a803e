pub mod compose;
pub mod layer;
pub mod symbology;
pub mod terrain;
pub mod vector;

pub use compose::*;
pub use layer::*;
