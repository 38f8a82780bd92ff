//! Navigation and rendering for the key-value browser, independent of any
//! terminal library.

mod browser;
mod layout;
pub mod lines;
mod pane;
mod render;
mod state;
mod transition;

pub use browser::{Browser, Flow};
pub use layout::Layout;
pub use pane::{Pane, PaneId, PaneSet, Rect, Screen, TextPane, Tone};
pub use render::Pipeline;
pub use state::{NavigationState, View};
pub use transition::{Effect, InputEvent, Transition, transition};
