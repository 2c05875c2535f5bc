//! SDL2 backend
//!
//! - [`SdlInput`] turns the SDL event queue into [`InputEvent`]s
//! - [`SdlRenderer`] draws to a window canvas, shapes as filled scanlines and
//!   text with the bitmap font
//! - [`load_sprite_catalog`] loads every image in the asset directory as a
//!   texture and builds the sprite catalog from them

use crate::catalog::{Catalog, CatalogItem, CatalogLook, canonical_name, discover_images};
use crate::entity::{ShapeKind, SpriteHandle};
use crate::input::{InputEvent, InputSource, Key, PointerButton};
use crate::render::{Primitive, RenderSink};
use crate::text::draw_simple_text;
use sdl2::EventPump;
use sdl2::event::Event;
use sdl2::image::LoadTexture;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use std::path::Path;

/// Input from the SDL event queue
pub struct SdlInput {
    event_pump: EventPump,
}

impl SdlInput {
    pub fn new(event_pump: EventPump) -> Self {
        SdlInput { event_pump }
    }
}

impl InputSource for SdlInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.event_pump.poll_iter().filter_map(translate_event).collect()
    }
}

fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(keycode),
            ..
        } => Some(InputEvent::KeyPress(translate_key(keycode))),
        Event::MouseButtonDown {
            mouse_btn, x, y, ..
        } => Some(InputEvent::PointerPress {
            button: translate_button(mouse_btn),
            x: x as f32,
            y: y as f32,
        }),
        _ => None,
    }
}

fn translate_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::Backspace => Key::Backspace,
        Keycode::Return | Keycode::KpEnter => Key::Enter,
        Keycode::Escape => Key::Escape,
        Keycode::Up => Key::Up,
        Keycode::Down => Key::Down,
        Keycode::Space => Key::Char(' '),
        Keycode::Kp0 => Key::Char('0'),
        Keycode::Kp1 => Key::Char('1'),
        Keycode::Kp2 => Key::Char('2'),
        Keycode::Kp3 => Key::Char('3'),
        Keycode::Kp4 => Key::Char('4'),
        Keycode::Kp5 => Key::Char('5'),
        Keycode::Kp6 => Key::Char('6'),
        Keycode::Kp7 => Key::Char('7'),
        Keycode::Kp8 => Key::Char('8'),
        Keycode::Kp9 => Key::Char('9'),
        _ => {
            // Printable keys are named by their character ("A", "7", "-")
            let name = keycode.name();
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if !c.is_control() => Key::Char(c.to_ascii_lowercase()),
                _ => Key::Other,
            }
        }
    }
}

fn translate_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

/// Window canvas plus the textures sprite handles index into
pub struct SdlRenderer<'t> {
    canvas: Canvas<Window>,
    textures: Vec<Texture<'t>>,
}

impl<'t> SdlRenderer<'t> {
    pub fn new(canvas: Canvas<Window>, textures: Vec<Texture<'t>>) -> Self {
        SdlRenderer { canvas, textures }
    }
}

impl RenderSink for SdlRenderer<'_> {
    fn clear(&mut self, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        self.canvas.clear();
        Ok(())
    }

    fn draw_sprite(&mut self, handle: SpriteHandle, dest: Rect) -> Result<(), String> {
        let texture = self
            .textures
            .get(handle.0)
            .ok_or_else(|| format!("No texture for sprite handle {}", handle.0))?;
        self.canvas.copy(texture, None, dest)
    }

    fn draw_primitive(&mut self, primitive: Primitive, color: Color) -> Result<(), String> {
        self.canvas.set_draw_color(color);
        match primitive {
            Primitive::Shape { kind, x, y, radius } => {
                self.canvas.fill_rects(&shape_spans(kind, x, y, radius))
            }
            Primitive::FillRect(rect) => self.canvas.fill_rect(rect),
            Primitive::OutlineRect(rect) => self.canvas.draw_rect(rect),
        }
    }

    fn draw_text(
        &mut self,
        text: &str,
        color: Color,
        x: i32,
        y: i32,
        scale: u32,
    ) -> Result<(), String> {
        draw_simple_text(&mut self.canvas, text, x, y, color, scale)
    }

    fn present(&mut self) -> Result<(), String> {
        self.canvas.present();
        Ok(())
    }
}

/// One-pixel-high horizontal spans filling `kind` centred on `(x, y)`.
///
/// SDL2's renderer has no polygon fill, so every shape is drawn row by row.
/// Triangles point up; diamonds touch all four sides of the bounding box.
pub fn shape_spans(kind: ShapeKind, x: f32, y: f32, radius: f32) -> Vec<Rect> {
    let r = radius.round().max(0.0) as i32;
    let (cx, cy) = (x.round() as i32, y.round() as i32);

    if kind == ShapeKind::Square {
        let side = (2 * r + 1) as u32;
        return vec![Rect::new(cx - r, cy - r, side, side)];
    }

    (-r..=r)
        .filter_map(|dy| {
            let half = match kind {
                ShapeKind::Circle => (((r * r - dy * dy) as f32).sqrt()).floor() as i32,
                // Apex at the top, full width at the bottom row
                ShapeKind::Triangle => (dy + r) / 2,
                ShapeKind::Diamond => r - dy.abs(),
                ShapeKind::Square => r,
            };
            (half >= 0).then(|| Rect::new(cx - half, cy + dy, (2 * half + 1) as u32, 1))
        })
        .collect()
}

/// Loads every image in `dir` as a texture and builds a sprite catalog.
///
/// Sprite handle `n` is index `n` in the returned texture list. Images that
/// fail to load are skipped with a warning; a missing directory gives an
/// empty catalog.
pub fn load_sprite_catalog<'t>(
    texture_creator: &'t TextureCreator<WindowContext>,
    dir: &Path,
) -> (Vec<Texture<'t>>, Catalog) {
    let mut textures = Vec::new();
    let mut items = Vec::new();

    for path in discover_images(dir) {
        let Some(name) = canonical_name(&path) else {
            continue;
        };

        match texture_creator.load_texture(&path) {
            Ok(texture) => {
                let query = texture.query();
                items.push(CatalogItem {
                    look: CatalogLook::Sprite {
                        handle: SpriteHandle(textures.len()),
                        width: query.width,
                        height: query.height,
                    },
                    name,
                });
                textures.push(texture);
            }
            Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    log::info!("Loaded {} sprites from {}", items.len(), dir.display());
    (textures, Catalog::new(items))
}
