//! Session Controller
//!
//! Drives repeated rounds: pick a mode, play a round, answer the replay
//! prompt, repeat. Quitting anywhere ends the session at once; a round that
//! was quit reports no score.
//!
//! All collaborators live in a [`GameContext`] passed in at construction, so
//! the same controller runs against SDL2 or against scripted input and a
//! recording sink.

use crate::catalog::Catalog;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::gui::{GameOverAction, GameOverScreen, MenuAction, ModeMenu};
use crate::input::InputSource;
use crate::matcher::MatchMode;
use crate::render::RenderSink;
use crate::round::{FrameOutcome, Round};
use crate::spawner::Spawner;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Everything a round or screen needs from the outside world
pub struct GameContext<C: Clock, I: InputSource, S: RenderSink> {
    pub clock: C,
    pub input: I,
    pub sink: S,
    pub config: GameConfig,
}

/// Answer to the round-over prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Replay,
    Quit,
}

/// What a finished session reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Rounds that ran out of time. A round quit midway doesn't count.
    pub rounds_played: u32,
    /// Score of the last completed round (0 if none)
    pub last_score: u32,
    pub best_score: u32,
}

pub struct Session<C: Clock, I: InputSource, S: RenderSink> {
    ctx: GameContext<C, I, S>,
    spawner: Spawner,
    rng: Pcg32,
    summary: SessionSummary,
}

impl<C: Clock, I: InputSource, S: RenderSink> Session<C, I, S> {
    /// Creates a session spawning from `catalog`, with all randomness seeded
    /// from `seed`.
    pub fn new(ctx: GameContext<C, I, S>, catalog: Catalog, seed: u64) -> Self {
        let spawner = Spawner::new(ctx.config.spawn_settings(), catalog);
        Session {
            ctx,
            spawner,
            rng: Pcg32::seed_from_u64(seed),
            summary: SessionSummary::default(),
        }
    }

    pub fn context(&self) -> &GameContext<C, I, S> {
        &self.ctx
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Shows the mode menu until a mode is picked.
    ///
    /// Returns `None` if the player quit.
    pub fn select_mode(&mut self) -> Result<Option<MatchMode>, String> {
        let mut menu = ModeMenu::new();
        let (width, height) = (self.ctx.config.window.width, self.ctx.config.window.height);

        loop {
            self.ctx.clock.tick(self.ctx.config.round.menu_fps);

            for event in self.ctx.input.poll() {
                match menu.handle(&event) {
                    MenuAction::Pending => {}
                    MenuAction::Chosen(mode) => {
                        log::info!("Mode selected: {}", mode.title());
                        return Ok(Some(mode));
                    }
                    MenuAction::Quit => {
                        log::info!("Quit from mode selection");
                        return Ok(None);
                    }
                }
            }

            menu.render(&mut self.ctx.sink, width, height)?;
            self.ctx.sink.present()?;
        }
    }

    /// Shows the round-over screen for `score` until the player answers.
    pub fn round_over(&mut self, score: u32) -> Result<Decision, String> {
        let screen = GameOverScreen::new();
        let (width, height) = (self.ctx.config.window.width, self.ctx.config.window.height);

        loop {
            self.ctx.clock.tick(self.ctx.config.round.menu_fps);

            for event in self.ctx.input.poll() {
                match screen.handle(&event) {
                    GameOverAction::Pending => {}
                    GameOverAction::PlayAgain => return Ok(Decision::Replay),
                    GameOverAction::Quit => return Ok(Decision::Quit),
                }
            }

            screen.render(
                &mut self.ctx.sink,
                width,
                height,
                score,
                self.summary.best_score,
            )?;
            self.ctx.sink.present()?;
        }
    }

    /// Plays rounds until the player quits.
    pub fn run(&mut self) -> Result<SessionSummary, String> {
        while let Some(mode) = self.select_mode()? {
            let mut round = Round::new(mode, self.ctx.config.round_rules(), self.ctx.clock.now());

            let score = match round.run(&mut self.ctx, &mut self.spawner, &mut self.rng)? {
                FrameOutcome::Expired { score } => score,
                _ => break,
            };

            self.summary.rounds_played += 1;
            self.summary.last_score = score;
            self.summary.best_score = self.summary.best_score.max(score);

            if self.round_over(score)? == Decision::Quit {
                break;
            }
        }

        Ok(self.summary)
    }
}
