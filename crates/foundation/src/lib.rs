pub mod color;
pub mod geo;
pub mod range;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use geo::*;
pub use range::*;
