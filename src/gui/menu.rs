//! Mode Selection Menu
//!
//! Centred box listing the four matcher modes. Digits pick a mode directly;
//! Up/Down move the highlight (wrapping) and Enter confirms it.

use crate::input::{InputEvent, Key};
use crate::matcher::MatchMode;
use crate::render::{Primitive, RenderSink};
use crate::text::text_width;
use sdl2::pixels::Color;
use sdl2::rect::Rect;

/// Configuration for menu appearance
#[derive(Debug, Clone)]
pub struct MenuStyle {
    /// Menu box width in pixels
    pub width: u32,

    /// Menu box height in pixels
    pub height: u32,

    /// Colour behind the box
    pub screen_color: Color,

    pub background_color: Color,

    pub border_color: Color,

    /// Border thickness (draws double border if > 1)
    pub border_thickness: u32,

    pub title_color: Color,

    pub item_color: Color,

    pub selected_item_color: Color,

    /// Selection highlight color
    pub highlight_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            width: 600,
            height: 400,
            screen_color: Color::RGB(255, 255, 255),
            background_color: Color::RGB(30, 30, 40),
            border_color: Color::RGB(100, 100, 120),
            border_thickness: 2,
            title_color: Color::RGB(220, 220, 240),
            item_color: Color::RGB(160, 160, 170),
            selected_item_color: Color::RGB(255, 255, 255),
            highlight_color: Color::RGB(80, 100, 140),
        }
    }
}

/// What a key press did to the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Nothing decided yet
    Pending,
    Chosen(MatchMode),
    Quit,
}

/// Stateful mode-selection menu
pub struct ModeMenu {
    title: String,
    selected_index: usize,
    style: MenuStyle,
}

impl ModeMenu {
    pub fn new() -> Self {
        ModeMenu {
            title: "SELECT MODE".to_string(),
            selected_index: 0,
            style: MenuStyle::default(),
        }
    }

    /// Move selection up (wraps to bottom)
    pub fn select_previous(&mut self) {
        if self.selected_index == 0 {
            self.selected_index = MatchMode::ALL.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down (wraps to top)
    pub fn select_next(&mut self) {
        self.selected_index = (self.selected_index + 1) % MatchMode::ALL.len();
    }

    pub fn selected(&self) -> MatchMode {
        MatchMode::ALL[self.selected_index]
    }

    /// Feeds one event to the menu
    pub fn handle(&mut self, event: &InputEvent) -> MenuAction {
        if event.is_quit() {
            return MenuAction::Quit;
        }

        match event {
            InputEvent::KeyPress(Key::Char(c)) => match MatchMode::from_selector(*c) {
                Some(mode) => MenuAction::Chosen(mode),
                None => MenuAction::Pending,
            },
            InputEvent::KeyPress(Key::Up) => {
                self.select_previous();
                MenuAction::Pending
            }
            InputEvent::KeyPress(Key::Down) => {
                self.select_next();
                MenuAction::Pending
            }
            InputEvent::KeyPress(Key::Enter) => MenuAction::Chosen(self.selected()),
            _ => MenuAction::Pending,
        }
    }

    /// Draws the menu centred on a `screen_width` x `screen_height` frame
    pub fn render<S: RenderSink>(
        &self,
        sink: &mut S,
        screen_width: u32,
        screen_height: u32,
    ) -> Result<(), String> {
        sink.clear(self.style.screen_color)?;

        let menu_x = screen_width.saturating_sub(self.style.width) / 2;
        let menu_y = screen_height.saturating_sub(self.style.height) / 2;
        let frame = Rect::new(
            menu_x as i32,
            menu_y as i32,
            self.style.width,
            self.style.height,
        );

        sink.draw_primitive(Primitive::FillRect(frame), self.style.background_color)?;
        sink.draw_primitive(Primitive::OutlineRect(frame), self.style.border_color)?;
        if self.style.border_thickness > 1 {
            let inner = Rect::new(
                (menu_x + 2) as i32,
                (menu_y + 2) as i32,
                self.style.width - 4,
                self.style.height - 4,
            );
            sink.draw_primitive(Primitive::OutlineRect(inner), self.style.border_color)?;
        }

        let title_width = text_width(&self.title, 3);
        sink.draw_text(
            &self.title,
            self.style.title_color,
            (menu_x + self.style.width.saturating_sub(title_width) / 2) as i32,
            (menu_y + 30) as i32,
            3,
        )?;

        let item_height = 60;
        let item_start_y = menu_y + 100;

        for (i, mode) in MatchMode::ALL.iter().enumerate() {
            let item_y = item_start_y + i as u32 * item_height;
            let is_selected = i == self.selected_index;

            if is_selected {
                sink.draw_primitive(
                    Primitive::FillRect(Rect::new(
                        (menu_x + 15) as i32,
                        item_y as i32 - 6,
                        self.style.width - 30,
                        36,
                    )),
                    self.style.highlight_color,
                )?;
            }

            let text_color = if is_selected {
                self.style.selected_item_color
            } else {
                self.style.item_color
            };
            sink.draw_text(
                &format!("{}  {}", mode.selector(), mode.title()),
                text_color,
                (menu_x + 60) as i32,
                item_y as i32,
                3,
            )?;
        }

        Ok(())
    }
}

impl Default for ModeMenu {
    fn default() -> Self {
        Self::new()
    }
}
