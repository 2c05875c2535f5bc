//! Backend glue
//!
//! The core only knows the [`InputSource`](crate::input::InputSource) and
//! [`RenderSink`](crate::render::RenderSink) traits. This module holds the
//! SDL2 implementations used by the binary.

pub mod sdl;

pub use sdl::{SdlInput, SdlRenderer, load_sprite_catalog};
