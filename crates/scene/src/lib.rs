pub mod ui_state;
pub mod view;

pub use ui_state::*;
pub use view::*;
