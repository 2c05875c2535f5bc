//! Round Loop
//!
//! One timed round: spawn, match input, fall, cull, draw, until the countdown
//! runs out.
//!
//! # Frame order
//!
//! 1. Tick the clock, compute elapsed time from the round start
//! 2. Out of time? The round is over, before anything spawns or draws
//! 3. Maybe spawn
//! 4. Drain every pending input event, in order (quit ends everything)
//! 5. Everything falls
//! 6. Cull entities below the screen or past their lifespan
//! 7. Draw entities and HUD
//! 8. Present
//!
//! Time is always `now - started_at`; frame deltas are never summed, so
//! frame pacing jitter can't stretch or shrink a round.

use crate::clock::Clock;
use crate::entity::{Entity, Visual};
use crate::input::{InputEvent, InputSource};
use crate::matcher::{ClickScoring, MatchMode, Matcher};
use crate::render::{BLACK, Primitive, RenderSink, WHITE};
use crate::session::GameContext;
use crate::spawner::Spawner;
use crate::text::{GLYPH_HEIGHT, text_width};
use rand::Rng;

/// HUD text scale
const HUD_SCALE: u32 = 3;
/// Scale of labels drawn on entities
const LABEL_SCALE: u32 = 2;

/// Fixed parameters of a round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundRules {
    pub duration_ms: u64,
    pub width: u32,
    pub height: u32,
    /// Entities older than this are removed. `None` means no expiry.
    pub lifespan_ms: Option<u64>,
    pub click_scoring: ClickScoring,
    /// Also show elapsed seconds on the HUD
    pub show_elapsed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    Expired,
}

/// What the loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// Time ran out; the round's final score
    Expired { score: u32 },
    /// The player closed the game. No score is reported.
    Quit,
}

/// State of one round. Nothing in here survives into the next round.
pub struct Round {
    rules: RoundRules,
    phase: RoundPhase,
    /// Live entities in spawn order
    entities: Vec<Entity>,
    score: u32,
    started_at: u64,
    last_spawn: Option<u64>,
    matcher: Matcher,
    elapsed_ms: u64,
    spawned: u32,
}

impl Round {
    pub fn new(mode: MatchMode, rules: RoundRules, started_at: u64) -> Self {
        let matcher = Matcher::new(mode, rules.click_scoring);
        Round {
            rules,
            phase: RoundPhase::Running,
            entities: Vec::new(),
            score: 0,
            started_at,
            last_spawn: None,
            matcher,
            elapsed_ms: 0,
            spawned: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn mode(&self) -> MatchMode {
        self.matcher.mode()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Total entities spawned this round, removed or not
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Word-mode typed text
    pub fn typed(&self) -> Option<&str> {
        self.matcher.typed()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn time_left_ms(&self) -> u64 {
        self.rules.duration_ms.saturating_sub(self.elapsed_ms)
    }

    /// Updates elapsed time and expires the round once it's used up.
    ///
    /// Returns the final outcome if the round is over.
    pub fn check_expiry(&mut self, now: u64) -> Option<FrameOutcome> {
        if self.phase == RoundPhase::Running {
            self.elapsed_ms = now.saturating_sub(self.started_at);
            if self.elapsed_ms >= self.rules.duration_ms {
                self.phase = RoundPhase::Expired;
                log::info!(
                    "Round over after {} ms: score {} ({} spawned)",
                    self.elapsed_ms,
                    self.score,
                    self.spawned
                );
            }
        }

        match self.phase {
            RoundPhase::Running => None,
            RoundPhase::Expired => Some(FrameOutcome::Expired { score: self.score }),
        }
    }

    /// Runs the simulation part of one frame (steps 2 to 6).
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        now: u64,
        events: Vec<InputEvent>,
        spawner: &mut Spawner,
        rng: &mut R,
    ) -> FrameOutcome {
        if let Some(outcome) = self.check_expiry(now) {
            return outcome;
        }

        let mode = self.mode();
        if let Some(entity) = spawner.maybe_spawn(rng, now, &mut self.last_spawn, mode) {
            self.entities.push(entity);
            self.spawned += 1;
        }

        for event in events {
            if event.is_quit() {
                log::info!("Quit during round (score {} discarded)", self.score);
                return FrameOutcome::Quit;
            }

            let outcome = self.matcher.resolve(&event, &mut self.entities, now);
            if !outcome.is_empty() {
                log::debug!(
                    "{} matched {} entities for {} points",
                    self.mode().title(),
                    outcome.removed.len(),
                    outcome.points
                );
            }
            self.score += outcome.points;
        }

        let fall_speed = spawner.fall_speed();
        for entity in &mut self.entities {
            entity.fall(fall_speed);
        }

        let height = self.rules.height as f32;
        let lifespan = self.rules.lifespan_ms;
        let before = self.entities.len();
        self.entities
            .retain(|e| !e.is_below(height) && !e.is_expired(now, lifespan));
        if self.entities.len() != before {
            log::trace!("Culled {} entities", before - self.entities.len());
        }

        FrameOutcome::Continue
    }

    /// Draws the current state (step 7). Doesn't present.
    pub fn draw<S: RenderSink>(&self, sink: &mut S) -> Result<(), String> {
        sink.clear(WHITE)?;

        for entity in &self.entities {
            draw_entity(sink, entity)?;
        }

        sink.draw_text(&format!("SCORE: {}", self.score), BLACK, 10, 10, HUD_SCALE)?;
        sink.draw_text(
            &format!("TIME LEFT: {}S", self.time_left_ms() / 1000),
            BLACK,
            10,
            50,
            HUD_SCALE,
        )?;

        let mut next_line = 90;
        if self.rules.show_elapsed {
            sink.draw_text(
                &format!("ELAPSED: {}S", self.elapsed_ms / 1000),
                BLACK,
                10,
                next_line,
                HUD_SCALE,
            )?;
            next_line += 40;
        }
        sink.draw_text(
            &format!("MODE: {}", self.mode().title()),
            BLACK,
            10,
            next_line,
            HUD_SCALE,
        )?;

        if let Some(typed) = self.typed() {
            let y = self.rules.height as i32 - 40;
            sink.draw_text(&format!("TYPED: {}_", typed), BLACK, 10, y, HUD_SCALE)?;
        }

        Ok(())
    }

    /// Runs the round to completion against real (or scripted) collaborators.
    pub fn run<C, I, S, R>(
        &mut self,
        ctx: &mut GameContext<C, I, S>,
        spawner: &mut Spawner,
        rng: &mut R,
    ) -> Result<FrameOutcome, String>
    where
        C: Clock,
        I: InputSource,
        S: RenderSink,
        R: Rng + ?Sized,
    {
        log::info!(
            "Round started: mode {}, {} ms",
            self.mode().title(),
            self.rules.duration_ms
        );

        loop {
            ctx.clock.tick(ctx.config.round.target_fps);
            let now = ctx.clock.now();

            if let Some(outcome) = self.check_expiry(now) {
                return Ok(outcome);
            }

            let events = ctx.input.poll();
            match self.step(now, events, spawner, rng) {
                FrameOutcome::Continue => {}
                outcome => return Ok(outcome),
            }

            self.draw(&mut ctx.sink)?;
            ctx.sink.present()?;
        }
    }
}

fn draw_entity<S: RenderSink>(sink: &mut S, entity: &Entity) -> Result<(), String> {
    match &entity.visual {
        Visual::Sprite { handle, .. } => {
            sink.draw_sprite(*handle, entity.bounds())?;
            if let Some(label) = &entity.label {
                // Names go under the sprite
                let x = entity.x as i32 - (text_width(label, LABEL_SCALE) / 2) as i32;
                let y = (entity.y + entity.half_height) as i32 + 4;
                sink.draw_text(label, BLACK, x, y, LABEL_SCALE)?;
            }
        }
        Visual::Shape { kind, color } => {
            sink.draw_primitive(
                Primitive::Shape {
                    kind: *kind,
                    x: entity.x,
                    y: entity.y,
                    radius: entity.half_width,
                },
                *color,
            )?;
            if let Some(label) = &entity.label {
                // Labels sit centred on the shape
                let x = entity.x as i32 - (text_width(label, LABEL_SCALE) / 2) as i32;
                let y = entity.y as i32 - (GLYPH_HEIGHT * LABEL_SCALE / 2) as i32;
                sink.draw_text(label, WHITE, x, y, LABEL_SCALE)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::clock::ManualClock;
    use crate::config::GameConfig;
    use crate::entity::{ShapeKind, Visual};
    use crate::input::{Key, PointerButton, ScriptedInput};
    use crate::render::{DrawCommand, RecordingSink};
    use crate::spawner::SpawnSettings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rules(duration_ms: u64) -> RoundRules {
        RoundRules {
            duration_ms,
            width: 800,
            height: 600,
            lifespan_ms: None,
            click_scoring: ClickScoring::Single,
            show_elapsed: false,
        }
    }

    fn spawner(interval: u64, fall_speed: f32) -> Spawner {
        Spawner::new(
            SpawnSettings {
                spawn_interval_ms: interval,
                fall_speed,
                width: 800,
                shape_radius: (30, 30),
            },
            Catalog::shapes(),
        )
    }

    fn context(config: GameConfig) -> GameContext<ManualClock, ScriptedInput, RecordingSink> {
        GameContext {
            clock: ManualClock::default(),
            input: ScriptedInput::default(),
            sink: RecordingSink::new(),
            config,
        }
    }

    #[test]
    fn test_expires_exactly_at_duration() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = spawner(1000, 3.0);
        let mut round = Round::new(MatchMode::Click, rules(3000), 100);

        assert_eq!(round.step(3099, vec![], &mut spawner, &mut rng), FrameOutcome::Continue);
        assert_eq!(round.time_left_ms(), 1);
        assert_eq!(
            round.step(3100, vec![], &mut spawner, &mut rng),
            FrameOutcome::Expired { score: 0 }
        );
        assert_eq!(round.phase(), RoundPhase::Expired);
        // Stays expired
        assert_eq!(
            round.step(3200, vec![], &mut spawner, &mut rng),
            FrameOutcome::Expired { score: 0 }
        );
    }

    #[test]
    fn test_spawns_carry_round_mode_keys() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut spawner = spawner(1000, 1.0);
        let mut round = Round::new(MatchMode::Letter, rules(60_000), 0);

        assert_eq!(round.step(0, vec![], &mut spawner, &mut rng), FrameOutcome::Continue);

        let entity = &round.entities()[0];
        assert!(entity.key.is_some_and(|k| k.is_ascii_uppercase()));
        assert_eq!(round.spawned(), 1);
    }

    #[test]
    fn test_expired_frame_spawns_nothing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawner = spawner(1000, 3.0);
        let mut round = Round::new(MatchMode::Click, rules(1000), 0);

        round.step(1000, vec![], &mut spawner, &mut rng);
        assert_eq!(round.spawned(), 0);
    }

    #[test]
    fn test_spawn_cadence_over_full_round() {
        let mut config = GameConfig::default();
        config.round.duration_ms = 3000;
        let mut ctx = context(config.clone());
        let mut rng = Pcg32::seed_from_u64(5);
        // Slow fall so nothing leaves the screen
        let mut spawner = spawner(1000, 0.01);
        let mut round = Round::new(MatchMode::Click, config.round_rules(), ctx.clock.now());

        let outcome = round.run(&mut ctx, &mut spawner, &mut rng).unwrap();

        assert_eq!(outcome, FrameOutcome::Expired { score: 0 });
        assert_eq!(round.spawned(), 3);
        assert_eq!(round.entities().len(), 3);
    }

    #[test]
    fn test_culled_entities_are_not_drawn() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(10_000, 3.0);
        let mut round = Round::new(MatchMode::Click, rules(60_000), 0);

        round.step(0, vec![], &mut spawner, &mut rng);
        assert_eq!(round.entities().len(), 1);

        // Shape radius 30 spawns at y = -30 and needs its top edge past 600
        let mut frame = 0;
        while !round.entities().is_empty() {
            frame += 1;
            round.step(frame, vec![], &mut spawner, &mut rng);
            for entity in round.entities() {
                assert!(!entity.is_below(600.0));
            }
        }
        // (600 + 30 + 30) / 3 = 220 frames of falling
        assert_eq!(frame, 219);

        let mut sink = RecordingSink::new();
        round.draw(&mut sink).unwrap();
        assert!(
            !sink
                .commands
                .iter()
                .any(|cmd| matches!(cmd, DrawCommand::Primitive(..)))
        );
    }

    #[test]
    fn test_lifespan_expiry() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(10_000, 0.01);
        let mut rules = rules(60_000);
        rules.lifespan_ms = Some(5000);
        let mut round = Round::new(MatchMode::Click, rules, 0);

        round.step(0, vec![], &mut spawner, &mut rng);
        round.step(5000, vec![], &mut spawner, &mut rng);
        assert_eq!(round.entities().len(), 1);
        round.step(5001, vec![], &mut spawner, &mut rng);
        assert!(round.entities().is_empty());
    }

    #[test]
    fn test_click_scores_and_removes() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(10_000, 1.0);
        let mut round = Round::new(MatchMode::Click, rules(60_000), 0);

        round.step(0, vec![], &mut spawner, &mut rng);
        let target = round.entities()[0].clone();

        let click = InputEvent::PointerPress {
            button: PointerButton::Left,
            x: target.x,
            y: target.y,
        };
        round.step(16, vec![click], &mut spawner, &mut rng);

        assert_eq!(round.score(), 1);
        assert!(round.entities().is_empty());
    }

    #[test]
    fn test_letter_round_removes_all_sharing_key() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(1, 0.01);
        let mut round = Round::new(MatchMode::Letter, rules(60_000), 0);

        for t in 0..20 {
            round.step(t, vec![], &mut spawner, &mut rng);
        }
        let key = round.entities()[0].key.unwrap();
        let sharing = round.entities().iter().filter(|e| e.key == Some(key)).count() as u32;

        // Same timestamp as the last spawn, so nothing new appears
        round.step(
            19,
            vec![InputEvent::KeyPress(Key::Char(key.to_ascii_lowercase()))],
            &mut spawner,
            &mut rng,
        );

        assert_eq!(round.score(), sharing);
        assert!(round.entities().iter().all(|e| e.key != Some(key)));
    }

    #[test]
    fn test_quit_stops_draining() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(10_000, 1.0);
        let mut round = Round::new(MatchMode::Click, rules(60_000), 0);
        round.step(0, vec![], &mut spawner, &mut rng);
        let target = round.entities()[0].clone();

        let outcome = round.step(
            16,
            vec![
                InputEvent::KeyPress(Key::Escape),
                InputEvent::PointerPress {
                    button: PointerButton::Left,
                    x: target.x,
                    y: target.y,
                },
            ],
            &mut spawner,
            &mut rng,
        );

        assert_eq!(outcome, FrameOutcome::Quit);
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn test_run_returns_quit_from_input() {
        let mut ctx = context(GameConfig::default());
        ctx.input.push_idle(5);
        ctx.input.push_frame(vec![InputEvent::Quit]);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(1000, 3.0);
        let mut round = Round::new(MatchMode::Word, ctx.config.round_rules(), 0);

        let outcome = round.run(&mut ctx, &mut spawner, &mut rng).unwrap();

        assert_eq!(outcome, FrameOutcome::Quit);
        assert_eq!(ctx.sink.frames_presented(), 5);
    }

    #[test]
    fn test_hud_text() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(10_000, 1.0);
        let mut rules = rules(30_000);
        rules.show_elapsed = true;
        let mut round = Round::new(MatchMode::Word, rules, 0);

        round.step(12_500, vec![InputEvent::KeyPress(Key::Char('c'))], &mut spawner, &mut rng);
        let mut sink = RecordingSink::new();
        round.draw(&mut sink).unwrap();
        let text = sink.last_frame_text();

        assert!(text.contains(&"SCORE: 0"));
        assert!(text.contains(&"TIME LEFT: 17S"));
        assert!(text.contains(&"ELAPSED: 12S"));
        assert!(text.contains(&"MODE: FULL NAME"));
        assert!(text.contains(&"TYPED: c_"));
    }

    #[test]
    fn test_shape_labels_drawn_over_shape() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut spawner = spawner(10_000, 1.0);
        let mut round = Round::new(MatchMode::Letter, rules(30_000), 0);
        round.step(0, vec![], &mut spawner, &mut rng);

        let mut sink = RecordingSink::new();
        round.draw(&mut sink).unwrap();
        let entity = &round.entities()[0];
        let label = entity.label.clone().unwrap();

        assert!(matches!(
            entity.visual,
            Visual::Shape { kind, .. } if ShapeKind::ALL.contains(&kind)
        ));
        assert!(sink.last_frame_text().contains(&label.as_str()));
    }
}
