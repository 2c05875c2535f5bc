//! Round-Over Screen
//!
//! Shown when a round's time runs out. Displays the final score and the best
//! score of the session, then waits for Y (play again) or N (quit).

use crate::input::InputEvent;
use crate::render::RenderSink;
use crate::text::text_width;
use sdl2::pixels::Color;

const TITLE: &str = "TIME'S UP! GAME OVER.";
const PROMPT: &str = "Y: PLAY AGAIN  N: QUIT";

/// Configuration for round-over screen appearance
#[derive(Debug, Clone)]
pub struct GameOverStyle {
    pub background_color: Color,

    /// "TIME'S UP" text color
    pub title_color: Color,

    pub score_color: Color,

    /// Instruction text color
    pub instruction_color: Color,
}

impl Default for GameOverStyle {
    fn default() -> Self {
        GameOverStyle {
            background_color: Color::RGB(255, 255, 255),
            title_color: Color::RGB(255, 0, 0),
            score_color: Color::RGB(0, 0, 0),
            instruction_color: Color::RGB(100, 100, 110),
        }
    }
}

/// The player's answer to the replay prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverAction {
    Pending,
    PlayAgain,
    Quit,
}

pub struct GameOverScreen {
    style: GameOverStyle,
}

impl GameOverScreen {
    pub fn new() -> Self {
        GameOverScreen {
            style: GameOverStyle::default(),
        }
    }

    /// Y/N answer the prompt; Escape or closing the window quits
    pub fn handle(&self, event: &InputEvent) -> GameOverAction {
        if event.is_quit() {
            return GameOverAction::Quit;
        }

        match event.char().map(|c| c.to_ascii_lowercase()) {
            Some('y') => GameOverAction::PlayAgain,
            Some('n') => GameOverAction::Quit,
            _ => GameOverAction::Pending,
        }
    }

    /// Draws the screen for a `screen_width` x `screen_height` frame
    pub fn render<S: RenderSink>(
        &self,
        sink: &mut S,
        screen_width: u32,
        screen_height: u32,
        score: u32,
        best_score: u32,
    ) -> Result<(), String> {
        sink.clear(self.style.background_color)?;

        let center_y = (screen_height / 2) as i32;
        let centred = |text: &str, scale: u32| {
            (screen_width.saturating_sub(text_width(text, scale)) / 2) as i32
        };

        sink.draw_text(TITLE, self.style.title_color, centred(TITLE, 4), center_y - 100, 4)?;

        let final_score = format!("FINAL SCORE: {}", score);
        sink.draw_text(
            &final_score,
            self.style.score_color,
            centred(&final_score, 3),
            center_y - 20,
            3,
        )?;

        let best = format!("BEST: {}", best_score);
        sink.draw_text(&best, self.style.score_color, centred(&best, 2), center_y + 30, 2)?;

        sink.draw_text(
            PROMPT,
            self.style.instruction_color,
            centred(PROMPT, 2),
            center_y + 90,
            2,
        )?;

        Ok(())
    }
}

impl Default for GameOverScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::render::RecordingSink;

    #[test]
    fn test_answers() {
        let screen = GameOverScreen::new();
        let press = |c| InputEvent::KeyPress(Key::Char(c));

        assert_eq!(screen.handle(&press('y')), GameOverAction::PlayAgain);
        assert_eq!(screen.handle(&press('Y')), GameOverAction::PlayAgain);
        assert_eq!(screen.handle(&press('n')), GameOverAction::Quit);
        assert_eq!(screen.handle(&press('x')), GameOverAction::Pending);
        assert_eq!(screen.handle(&InputEvent::Quit), GameOverAction::Quit);
        assert_eq!(
            screen.handle(&InputEvent::KeyPress(Key::Escape)),
            GameOverAction::Quit
        );
    }

    #[test]
    fn test_render_shows_scores() {
        let screen = GameOverScreen::new();
        let mut sink = RecordingSink::new();
        screen.render(&mut sink, 1000, 800, 12, 30).unwrap();

        assert_eq!(
            sink.last_frame_text(),
            vec![TITLE, "FINAL SCORE: 12", "BEST: 30", PROMPT]
        );
    }
}
