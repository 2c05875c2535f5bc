//! Falling Catch
//!
//! A small arcade game: sprites (or shapes) fall from the top of the window
//! and the player removes them before they leave it, by clicking them or by
//! typing their letter or name. Each round is a fixed countdown; when it runs
//! out the final score is shown and the player may go again.
//!
//! # Layout
//!
//! - [`clock`], [`input`], [`render`]: the collaborator seams (time, events,
//!   drawing). The core never touches SDL2 directly except for its `Color` and
//!   `Rect` value types.
//! - [`entity`], [`catalog`], [`spawner`], [`matcher`]: what falls and how
//!   input removes it
//! - [`round`]: one timed round
//! - [`gui`], [`session`]: mode menu, round-over prompt, the replay loop
//! - [`config`]: JSON configuration
//! - [`platform`]: SDL2 implementations of the seams

pub mod catalog;
pub mod clock;
pub mod config;
pub mod entity;
pub mod gui;
pub mod input;
pub mod matcher;
pub mod platform;
pub mod render;
pub mod round;
pub mod session;
pub mod spawner;
pub mod text;
