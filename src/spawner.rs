//! Spawner
//!
//! Drops a new entity from the catalog every `spawn_interval_ms`.
//!
//! Randomness comes from the caller's RNG so a seeded round spawns the same
//! entities in the same places every time.

use crate::catalog::{Catalog, CatalogLook};
use crate::entity::{Entity, EntityId, Visual};
use crate::matcher::MatchMode;
use crate::render::SHAPE_COLORS;
use rand::Rng;

/// Spawner settings
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSettings {
    pub spawn_interval_ms: u64,
    /// Pixels an entity falls per frame
    pub fall_speed: f32,
    /// Play-area width; spawns stay fully inside it horizontally
    pub width: u32,
    /// Radius range for procedural shapes (inclusive)
    pub shape_radius: (u32, u32),
}

pub struct Spawner {
    settings: SpawnSettings,
    catalog: Catalog,
    next_id: EntityId,
}

impl Spawner {
    pub fn new(settings: SpawnSettings, catalog: Catalog) -> Self {
        Spawner {
            settings,
            catalog,
            next_id: 1,
        }
    }

    pub fn fall_speed(&self) -> f32 {
        self.settings.fall_speed
    }

    /// Spawns one entity if the interval has elapsed since `last_spawn`.
    ///
    /// `None` for `last_spawn` means nothing spawned yet this round, so the
    /// first check always spawns. On a spawn, `last_spawn` becomes `now`;
    /// otherwise it is left alone. An empty catalog never spawns.
    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: u64,
        last_spawn: &mut Option<u64>,
        mode: MatchMode,
    ) -> Option<Entity> {
        let due = match *last_spawn {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.settings.spawn_interval_ms,
        };
        if !due {
            return None;
        }

        let item = self.catalog.pick(rng)?.clone();

        let (visual, half_width, half_height) = match item.look {
            CatalogLook::Sprite {
                handle,
                width,
                height,
            } => (
                Visual::Sprite {
                    handle,
                    width,
                    height,
                },
                width as f32 / 2.0,
                height as f32 / 2.0,
            ),
            CatalogLook::Shape(kind) => {
                let (min, max) = self.settings.shape_radius;
                let radius = rng.random_range(min.min(max)..=max.max(min)) as f32;
                let color = SHAPE_COLORS[rng.random_range(0..SHAPE_COLORS.len())];
                (Visual::Shape { kind, color }, radius, radius)
            }
        };

        let x = self.random_x(rng, half_width);
        let (key, label) = match mode {
            MatchMode::Click => (None, None),
            MatchMode::Letter => {
                let letter = (b'A' + rng.random_range(0..26u8)) as char;
                (Some(letter), Some(letter.to_string()))
            }
            MatchMode::Prefix => (item.name.chars().next(), Some(item.name.clone())),
            MatchMode::Word => (None, Some(item.name.clone())),
        };

        let entity = Entity {
            id: self.next_id,
            x,
            // Bottom edge touching the top of the screen
            y: -half_height,
            half_width,
            half_height,
            visual,
            name: item.name,
            key,
            label,
            spawned_at: now,
        };
        self.next_id += 1;
        *last_spawn = Some(now);

        log::debug!(
            "Spawned #{} '{}' at ({:.0}, {:.0})",
            entity.id,
            entity.name,
            entity.x,
            entity.y
        );
        Some(entity)
    }

    /// Centre x keeping the whole entity on screen. Entities wider than the
    /// play area are centred.
    fn random_x<R: Rng + ?Sized>(&self, rng: &mut R, half_width: f32) -> f32 {
        let low = half_width.ceil() as i64;
        let high = self.settings.width as i64 - low;
        if high < low {
            self.settings.width as f32 / 2.0
        } else {
            rng.random_range(low..=high) as f32
        }
    }
}
