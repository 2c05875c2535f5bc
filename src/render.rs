//! Render sink
//!
//! The core draws through the [`RenderSink`] trait and never touches a window
//! directly. Coordinates are play-area pixels with the origin top-left.
//!
//! # Implementations
//!
//! - `platform::sdl::SdlRenderer` draws to an SDL2 canvas
//! - [`RecordingSink`] keeps a list of [`DrawCommand`]s so screens can be
//!   checked without a window

use crate::entity::{ShapeKind, SpriteHandle};
use sdl2::pixels::Color;
use sdl2::rect::Rect;

pub const WHITE: Color = Color::RGB(255, 255, 255);
pub const BLACK: Color = Color::RGB(0, 0, 0);
pub const RED: Color = Color::RGB(255, 0, 0);
pub const GREEN: Color = Color::RGB(0, 255, 0);
pub const BLUE: Color = Color::RGB(0, 0, 255);
pub const PURPLE: Color = Color::RGB(100, 0, 100);

/// Colours a spawned shape may take
pub const SHAPE_COLORS: [Color; 4] = [RED, GREEN, BLUE, PURPLE];

/// Geometry for [`RenderSink::draw_primitive`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Filled shape centred on `(x, y)`, inscribed in a box of half-size `radius`
    Shape {
        kind: ShapeKind,
        x: f32,
        y: f32,
        radius: f32,
    },
    /// Filled rectangle
    FillRect(Rect),
    /// Rectangle outline
    OutlineRect(Rect),
}

/// Drawing operations the game needs from a backend.
///
/// Errors are backend messages, passed straight up to the caller.
pub trait RenderSink {
    /// Fills the whole frame with `color`
    fn clear(&mut self, color: Color) -> Result<(), String>;

    /// Blits a catalog sprite scaled into `dest`
    fn draw_sprite(&mut self, handle: SpriteHandle, dest: Rect) -> Result<(), String>;

    fn draw_primitive(&mut self, primitive: Primitive, color: Color) -> Result<(), String>;

    /// Draws `text` with its top-left corner at `(x, y)`.
    ///
    /// `scale` multiplies the 5x7 base glyph size.
    fn draw_text(&mut self, text: &str, color: Color, x: i32, y: i32, scale: u32)
    -> Result<(), String>;

    /// Shows the finished frame
    fn present(&mut self) -> Result<(), String>;
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Sprite(SpriteHandle, Rect),
    Primitive(Primitive, Color),
    Text { text: String, color: Color, x: i32, y: i32, scale: u32 },
    Present,
}

/// Sink that records every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the most recent `clear`
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|cmd| matches!(cmd, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    /// All text strings drawn in the last frame
    pub fn last_frame_text(&self) -> Vec<&str> {
        self.last_frame()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn frames_presented(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::Present))
            .count()
    }
}

impl RenderSink for RecordingSink {
    fn clear(&mut self, color: Color) -> Result<(), String> {
        self.commands.push(DrawCommand::Clear(color));
        Ok(())
    }

    fn draw_sprite(&mut self, handle: SpriteHandle, dest: Rect) -> Result<(), String> {
        self.commands.push(DrawCommand::Sprite(handle, dest));
        Ok(())
    }

    fn draw_primitive(&mut self, primitive: Primitive, color: Color) -> Result<(), String> {
        self.commands.push(DrawCommand::Primitive(primitive, color));
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        color: Color,
        x: i32,
        y: i32,
        scale: u32,
    ) -> Result<(), String> {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            color,
            x,
            y,
            scale,
        });
        Ok(())
    }

    fn present(&mut self) -> Result<(), String> {
        self.commands.push(DrawCommand::Present);
        Ok(())
    }
}
