//! Application state module

mod app_state;
mod forms;
mod overlay;
mod progress;
mod session;
mod success_timer;
mod wizard;

pub use app_state::*;
pub use forms::*;
pub use overlay::*;
pub use session::*;
pub use wizard::*;
