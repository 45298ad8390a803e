pub mod geojson;
pub mod source;

pub use geojson::*;
pub use source::*;
