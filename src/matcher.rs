//! Input Matcher
//!
//! Resolves one input event against the live entities of a round and reports
//! what was removed and how many points it earned.
//!
//! # Modes
//!
//! | Mode     | Input    | Removes                                        | Points           |
//! |----------|----------|------------------------------------------------|------------------|
//! | `Click`  | pointer  | first entity (spawn order) under the pointer    | see [`ClickScoring`] |
//! | `Letter` | key      | every entity whose random letter matches        | 1 per entity     |
//! | `Prefix` | key      | every entity whose name starts with the key     | 1 per entity     |
//! | `Word`   | typing   | first entity whose name equals the typed buffer | 1                |
//!
//! Removal never happens while iterating: the matched ids are collected first
//! and the vector is filtered afterwards, so plural matches can't skip
//! neighbours.

use crate::entity::{Entity, EntityId};
use crate::input::{InputEvent, Key, PointerButton};
use serde::{Deserialize, Serialize};

/// Matching rule set, picked once per round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchMode {
    Click,
    Letter,
    Prefix,
    Word,
}

impl MatchMode {
    pub const ALL: [MatchMode; 4] = [
        MatchMode::Click,
        MatchMode::Letter,
        MatchMode::Prefix,
        MatchMode::Word,
    ];

    /// Key that selects this mode on the menu
    pub fn selector(&self) -> char {
        match self {
            MatchMode::Click => '1',
            MatchMode::Letter => '2',
            MatchMode::Prefix => '3',
            MatchMode::Word => '4',
        }
    }

    pub fn from_selector(c: char) -> Option<Self> {
        Self::ALL.iter().copied().find(|mode| mode.selector() == c)
    }

    /// Menu and HUD title
    pub fn title(&self) -> &'static str {
        match self {
            MatchMode::Click => "CLICK",
            MatchMode::Letter => "LETTERS",
            MatchMode::Prefix => "FIRST LETTER",
            MatchMode::Word => "FULL NAME",
        }
    }
}

/// How pointer hits are scored in click mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickScoring {
    /// Any button, 1 point per hit
    Single,
    /// Left click 1, quick repeated left click 3, right click 2.
    ///
    /// A left click is a combo when the previous left click happened at most
    /// `window_ms` earlier and less than `sqrt(max_distance_sq)` away.
    Combo { window_ms: u64, max_distance_sq: f32 },
}

/// Result of resolving one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub removed: Vec<EntityId>,
    pub points: u32,
}

impl MatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.points == 0
    }
}

/// Where and when the last left click happened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickStamp {
    pub at: u64,
    pub x: f32,
    pub y: f32,
}

/// Per-round matcher state. One variant per [`MatchMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Matcher {
    Click {
        scoring: ClickScoring,
        last_left_click: Option<ClickStamp>,
    },
    Letter,
    Prefix,
    Word {
        buffer: String,
    },
}

impl Matcher {
    pub fn new(mode: MatchMode, scoring: ClickScoring) -> Self {
        match mode {
            MatchMode::Click => Matcher::Click {
                scoring,
                last_left_click: None,
            },
            MatchMode::Letter => Matcher::Letter,
            MatchMode::Prefix => Matcher::Prefix,
            MatchMode::Word => Matcher::Word {
                buffer: String::new(),
            },
        }
    }

    pub fn mode(&self) -> MatchMode {
        match self {
            Matcher::Click { .. } => MatchMode::Click,
            Matcher::Letter => MatchMode::Letter,
            Matcher::Prefix => MatchMode::Prefix,
            Matcher::Word { .. } => MatchMode::Word,
        }
    }

    /// Text typed so far (word mode only)
    pub fn typed(&self) -> Option<&str> {
        match self {
            Matcher::Word { buffer } => Some(buffer.as_str()),
            _ => None,
        }
    }

    /// Applies `event` to `entities`, removing whatever it matches.
    ///
    /// `now` is the frame time, used for double-click detection.
    pub fn resolve(
        &mut self,
        event: &InputEvent,
        entities: &mut Vec<Entity>,
        now: u64,
    ) -> MatchOutcome {
        match self {
            Matcher::Click {
                scoring,
                last_left_click,
            } => match *event {
                InputEvent::PointerPress { button, x, y } => {
                    resolve_click(*scoring, last_left_click, button, x, y, entities, now)
                }
                _ => MatchOutcome::default(),
            },
            Matcher::Letter => match event.char() {
                Some(c) => {
                    let pressed = c.to_ascii_uppercase();
                    remove_all(entities, |e| e.key == Some(pressed))
                }
                None => MatchOutcome::default(),
            },
            Matcher::Prefix => match event.char() {
                Some(c) => {
                    let pressed = c.to_lowercase().next().unwrap_or(c);
                    remove_all(entities, |e| e.name.starts_with(pressed))
                }
                None => MatchOutcome::default(),
            },
            Matcher::Word { buffer } => match *event {
                InputEvent::KeyPress(Key::Char(c)) if is_typeable(c) => {
                    buffer.extend(c.to_lowercase());
                    match entities.iter().position(|e| e.name == *buffer) {
                        Some(index) => {
                            let entity = entities.remove(index);
                            buffer.clear();
                            MatchOutcome {
                                removed: vec![entity.id],
                                points: 1,
                            }
                        }
                        None => MatchOutcome::default(),
                    }
                }
                InputEvent::KeyPress(Key::Backspace) => {
                    buffer.pop();
                    MatchOutcome::default()
                }
                InputEvent::KeyPress(Key::Enter) => {
                    buffer.clear();
                    MatchOutcome::default()
                }
                _ => MatchOutcome::default(),
            },
        }
    }
}

/// Characters that can appear in canonical names
fn is_typeable(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '.' || c == '\'' || c == '_'
}

/// Removes every entity matching `pred`, one point each
fn remove_all(entities: &mut Vec<Entity>, pred: impl Fn(&Entity) -> bool) -> MatchOutcome {
    let removed: Vec<EntityId> = entities.iter().filter(|e| pred(e)).map(|e| e.id).collect();
    if !removed.is_empty() {
        entities.retain(|e| !removed.contains(&e.id));
    }
    MatchOutcome {
        points: removed.len() as u32,
        removed,
    }
}

fn resolve_click(
    scoring: ClickScoring,
    last_left_click: &mut Option<ClickStamp>,
    button: PointerButton,
    x: f32,
    y: f32,
    entities: &mut Vec<Entity>,
    now: u64,
) -> MatchOutcome {
    let hit = entities.iter().position(|e| e.contains_point(x, y));

    let points = match scoring {
        ClickScoring::Single => 1,
        ClickScoring::Combo {
            window_ms,
            max_distance_sq,
        } => match button {
            PointerButton::Left => {
                let combo = last_left_click.is_some_and(|last| {
                    let dx = x - last.x;
                    let dy = y - last.y;
                    now.saturating_sub(last.at) <= window_ms && dx * dx + dy * dy < max_distance_sq
                });
                // Every left click counts for the next combo, hit or miss
                *last_left_click = Some(ClickStamp { at: now, x, y });
                if combo { 3 } else { 1 }
            }
            PointerButton::Right => 2,
            // Other buttons still pop the entity, just for nothing
            PointerButton::Middle | PointerButton::Other => 0,
        },
    };

    match hit {
        Some(index) => {
            let entity = entities.remove(index);
            MatchOutcome {
                removed: vec![entity.id],
                points,
            }
        }
        None => MatchOutcome::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ShapeKind, Visual};
    use sdl2::pixels::Color;

    const COMBO: ClickScoring = ClickScoring::Combo {
        window_ms: 300,
        max_distance_sq: 100.0,
    };

    fn entity(id: EntityId, name: &str, key: Option<char>, x: f32, y: f32) -> Entity {
        Entity {
            id,
            x,
            y,
            half_width: 20.0,
            half_height: 20.0,
            visual: Visual::Shape {
                kind: ShapeKind::Square,
                color: Color::RGB(0, 0, 255),
            },
            name: name.to_string(),
            key,
            label: None,
            spawned_at: 0,
        }
    }

    fn click(button: PointerButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerPress { button, x, y }
    }

    fn key(c: char) -> InputEvent {
        InputEvent::KeyPress(Key::Char(c))
    }

    #[test]
    fn test_mode_selectors_round_trip() {
        for mode in MatchMode::ALL {
            assert_eq!(MatchMode::from_selector(mode.selector()), Some(mode));
        }
        assert_eq!(MatchMode::from_selector('5'), None);
    }

    #[test]
    fn test_click_removes_first_overlapping_only() {
        let mut matcher = Matcher::new(MatchMode::Click, ClickScoring::Single);
        let mut entities = vec![
            entity(1, "abra", None, 100.0, 100.0),
            entity(2, "kadabra", None, 105.0, 105.0),
        ];

        let outcome = matcher.resolve(&click(PointerButton::Left, 102.0, 102.0), &mut entities, 0);

        assert_eq!(outcome.removed, vec![1]);
        assert_eq!(outcome.points, 1);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, 2);
    }

    #[test]
    fn test_click_miss_scores_nothing() {
        let mut matcher = Matcher::new(MatchMode::Click, ClickScoring::Single);
        let mut entities = vec![entity(1, "abra", None, 100.0, 100.0)];

        let outcome = matcher.resolve(&click(PointerButton::Right, 500.0, 500.0), &mut entities, 0);

        assert!(outcome.is_empty());
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_click_ignores_keys() {
        let mut matcher = Matcher::new(MatchMode::Click, ClickScoring::Single);
        let mut entities = vec![entity(1, "abra", Some('A'), 100.0, 100.0)];

        assert!(matcher.resolve(&key('a'), &mut entities, 0).is_empty());
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_letter_removes_every_match() {
        let mut matcher = Matcher::new(MatchMode::Letter, ClickScoring::Single);
        let mut entities = vec![
            entity(1, "x", Some('A'), 0.0, 0.0),
            entity(2, "y", Some('B'), 0.0, 0.0),
            entity(3, "z", Some('A'), 0.0, 0.0),
            entity(4, "w", Some('A'), 0.0, 0.0),
        ];

        let outcome = matcher.resolve(&key('a'), &mut entities, 0);

        assert_eq!(outcome.removed, vec![1, 3, 4]);
        assert_eq!(outcome.points, 3);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].id, 2);
    }

    #[test]
    fn test_letter_without_match() {
        let mut matcher = Matcher::new(MatchMode::Letter, ClickScoring::Single);
        let mut entities = vec![entity(1, "x", Some('A'), 0.0, 0.0)];

        assert!(matcher.resolve(&key('q'), &mut entities, 0).is_empty());
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn test_prefix_matches_name_start() {
        let mut matcher = Matcher::new(MatchMode::Prefix, ClickScoring::Single);
        let mut entities = vec![
            entity(1, "pikachu", Some('p'), 0.0, 0.0),
            entity(2, "eevee", Some('e'), 0.0, 0.0),
            entity(3, "psyduck", Some('p'), 0.0, 0.0),
        ];

        let outcome = matcher.resolve(&key('P'), &mut entities, 0);

        assert_eq!(outcome.removed, vec![1, 3]);
        assert_eq!(outcome.points, 2);
        assert_eq!(entities[0].name, "eevee");
    }

    #[test]
    fn test_word_typing_removes_exact_match() {
        let mut matcher = Matcher::new(MatchMode::Word, ClickScoring::Single);
        let mut entities = vec![
            entity(1, "eevee", None, 0.0, 0.0),
            entity(2, "abra", None, 0.0, 0.0),
            entity(3, "abra", None, 0.0, 0.0),
        ];

        let mut total = MatchOutcome::default();
        for c in "ABRA".chars() {
            let outcome = matcher.resolve(&key(c), &mut entities, 0);
            total.removed.extend(outcome.removed);
            total.points += outcome.points;
        }

        // Only the first duplicate goes
        assert_eq!(total.removed, vec![2]);
        assert_eq!(total.points, 1);
        assert_eq!(matcher.typed(), Some(""));
        assert_eq!(entities.len(), 2);
    }

    #[test]
    fn test_word_partial_prefix_keeps_everything() {
        let mut matcher = Matcher::new(MatchMode::Word, ClickScoring::Single);
        let mut entities = vec![entity(1, "eevee", None, 0.0, 0.0)];

        for c in "eev".chars() {
            assert!(matcher.resolve(&key(c), &mut entities, 0).is_empty());
        }

        assert_eq!(entities.len(), 1);
        assert_eq!(matcher.typed(), Some("eev"));
    }

    #[test]
    fn test_word_backspace_and_enter() {
        let mut matcher = Matcher::new(MatchMode::Word, ClickScoring::Single);
        let mut entities = vec![entity(1, "abra", None, 0.0, 0.0)];

        for c in "abx".chars() {
            matcher.resolve(&key(c), &mut entities, 0);
        }
        matcher.resolve(&InputEvent::KeyPress(Key::Backspace), &mut entities, 0);
        assert_eq!(matcher.typed(), Some("ab"));

        matcher.resolve(&InputEvent::KeyPress(Key::Enter), &mut entities, 0);
        assert_eq!(matcher.typed(), Some(""));
        assert_eq!(entities.len(), 1); // Enter never scores

        // Spaces are not part of names
        matcher.resolve(&key(' '), &mut entities, 0);
        assert_eq!(matcher.typed(), Some(""));
    }

    #[test]
    fn test_word_mode_handles_hyphenated_names() {
        let mut matcher = Matcher::new(MatchMode::Word, ClickScoring::Single);
        let mut entities = vec![entity(1, "mr-mime", None, 0.0, 0.0)];

        let points: u32 = "mr-mime"
            .chars()
            .map(|c| matcher.resolve(&key(c), &mut entities, 0).points)
            .sum();

        assert_eq!(points, 1);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_double_click_scores_three() {
        let mut matcher = Matcher::new(MatchMode::Click, COMBO);
        let mut entities = vec![
            entity(1, "circle", None, 100.0, 100.0),
            entity(2, "square", None, 100.0, 100.0),
        ];

        let first = matcher.resolve(&click(PointerButton::Left, 100.0, 100.0), &mut entities, 1000);
        let second = matcher.resolve(&click(PointerButton::Left, 103.0, 104.0), &mut entities, 1250);

        assert_eq!(first.points, 1);
        assert_eq!(second.points, 3);
        assert!(entities.is_empty());
    }

    #[test]
    fn test_slow_second_click_scores_one() {
        let mut matcher = Matcher::new(MatchMode::Click, COMBO);
        let mut entities = vec![
            entity(1, "circle", None, 100.0, 100.0),
            entity(2, "square", None, 100.0, 100.0),
        ];

        let first = matcher.resolve(&click(PointerButton::Left, 100.0, 100.0), &mut entities, 1000);
        let second = matcher.resolve(&click(PointerButton::Left, 100.0, 100.0), &mut entities, 1301);

        assert_eq!(first.points + second.points, 2);
    }

    #[test]
    fn test_far_second_click_scores_one() {
        let mut matcher = Matcher::new(MatchMode::Click, COMBO);
        let mut entities = vec![
            entity(1, "circle", None, 100.0, 100.0),
            entity(2, "square", None, 100.0, 100.0),
        ];

        matcher.resolve(&click(PointerButton::Left, 100.0, 100.0), &mut entities, 1000);
        // Exactly 10 units away: distance squared 100 is not "within" 100
        let second = matcher.resolve(&click(PointerButton::Left, 110.0, 100.0), &mut entities, 1100);

        assert_eq!(second.points, 1);
    }

    #[test]
    fn test_missed_left_click_still_arms_combo() {
        let mut matcher = Matcher::new(MatchMode::Click, COMBO);
        let mut entities = vec![entity(1, "circle", None, 100.0, 100.0)];

        let miss = matcher.resolve(&click(PointerButton::Left, 75.0, 100.0), &mut entities, 1000);
        assert!(miss.is_empty());

        let hit = matcher.resolve(&click(PointerButton::Left, 82.0, 100.0), &mut entities, 1100);
        assert_eq!(hit.points, 3);
    }

    #[test]
    fn test_right_click_scores_two_regardless_of_history() {
        let mut matcher = Matcher::new(MatchMode::Click, COMBO);
        let mut entities = vec![
            entity(1, "circle", None, 100.0, 100.0),
            entity(2, "square", None, 100.0, 100.0),
        ];

        matcher.resolve(&click(PointerButton::Left, 100.0, 100.0), &mut entities, 1000);
        let right = matcher.resolve(&click(PointerButton::Right, 100.0, 100.0), &mut entities, 1010);

        assert_eq!(right.points, 2);
        assert_eq!(right.removed, vec![2]);
    }
}
