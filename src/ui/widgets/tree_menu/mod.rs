//! Tree Menu Widget
//!
//! Interactive checkbox tree over a `SelectionTree` of candidate views, with
//! tri-state group icons, live search and the copy preference toggles.
//!
//! # Module Structure
//!
//! - `menu` - TreeMenu state management and action handling
//! - `render` - Terminal rendering functions
//! - `input` - Keyboard input handling and interactive loop

mod input;
mod menu;
mod render;

pub use input::run_interactive;
pub use menu::TreeMenu;
