//! Full-Screen GUI
//!
//! Screens shown between rounds. Both are drawn through
//! [`RenderSink`](crate::render::RenderSink) in screen coordinates and react
//! to [`InputEvent`](crate::input::InputEvent)s one at a time.
//!
//! # Available Components
//!
//! - [`ModeMenu`] - picks the matcher mode before a round
//! - [`GameOverScreen`] - final score and the replay prompt
//!
//! # Example Usage
//!
//! ```ignore
//! let mut menu = ModeMenu::new();
//! for event in input.poll() {
//!     if let MenuAction::Chosen(mode) = menu.handle(&event) {
//!         // start a round in `mode`
//!     }
//! }
//! menu.render(&mut sink, width, height)?;
//! ```

pub mod game_over;
pub mod menu;

pub use game_over::{GameOverAction, GameOverScreen};
pub use menu::{MenuAction, ModeMenu};
