pub mod constants;
pub mod controller;
pub mod funnel;
pub mod geometry;
pub mod layout;
pub mod orbit;
pub mod picker;
pub mod selection;
pub mod state;
pub mod tween;

pub use controller::*;
pub use funnel::*;
pub use layout::*;
pub use selection::*;
pub use state::*;
