pub mod app;
pub mod config;
pub mod input;
pub mod stream;

pub use app::*;
pub use config::*;
pub use input::*;
pub use stream::*;
