//! Field layout: zones, bases and actor movement constants
//!
//! Supplied by whatever owns the screen geometry and read-only for the life of
//! a session. `validate` must pass before a session is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::consts::*;
use crate::error::ConfigError;

/// One of the five landing bases
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Base {
    /// Base number (1..=5), compared directly against the die face
    pub id: u8,
    pub center: Vec2,
    pub size: Vec2,
}

impl Base {
    pub fn new(id: u8, center: Vec2, size: Vec2) -> Self {
        Self { id, center, size }
    }

    #[inline]
    pub fn footprint(&self) -> Aabb {
        Aabb::from_center_size(self.center, self.size)
    }
}

/// Where an actor's center currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    /// Safe area actors start in and return to after a jailbreak
    Start,
    /// Holding strip
    Jail,
    /// Everywhere else
    Arena,
}

/// Static field geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub arena: Aabb,
    pub start_zone: Aabb,
    pub jail: Aabb,
    /// Bases ordered by id, so `bases[id - 1]` is base `id`
    pub bases: Vec<Base>,
    /// Side of an actor's square footprint
    pub actor_size: f32,
    /// Walking speed (pixels/s)
    pub move_speed: f32,
    /// Human turn rate (radians/s)
    pub rotation_speed: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}

impl Layout {
    /// Standard 1280x720 field: four corner bases and a center base above a
    /// start zone, with the jail strip along the bottom of the start zone
    pub fn standard() -> Self {
        let base_size = Vec2::splat(140.0);
        let bases = [
            Vec2::new(160.0, 140.0),
            Vec2::new(1120.0, 140.0),
            Vec2::new(1120.0, 420.0),
            Vec2::new(160.0, 420.0),
            Vec2::new(640.0, 280.0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, center)| Base::new(i as u8 + 1, center, base_size))
        .collect();

        Self {
            arena: Aabb::new(Vec2::ZERO, Vec2::new(ARENA_WIDTH, ARENA_HEIGHT)),
            start_zone: Aabb::new(Vec2::new(0.0, 560.0), Vec2::new(ARENA_WIDTH, ARENA_HEIGHT)),
            jail: Aabb::new(Vec2::new(440.0, 650.0), Vec2::new(840.0, ARENA_HEIGHT)),
            bases,
            actor_size: ACTOR_SIZE,
            move_speed: MOVE_SPEED,
            rotation_speed: ROTATION_SPEED,
        }
    }

    /// Check the layout is complete and consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("actor_size", self.actor_size),
            ("move_speed", self.move_speed),
            ("rotation_speed", self.rotation_speed),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        if self.arena.is_empty() {
            return Err(ConfigError::EmptyZone { zone: "arena" });
        }
        for (zone, rect) in [("start", &self.start_zone), ("jail", &self.jail)] {
            if rect.is_empty() {
                return Err(ConfigError::EmptyZone { zone });
            }
            if !self.arena.contains(rect) {
                return Err(ConfigError::ZoneOutsideArena { zone });
            }
        }
        if self.jail_area().is_empty() {
            return Err(ConfigError::ZoneTooSmall {
                zone: "jail",
                actor_size: self.actor_size,
            });
        }
        if self.release_area().is_empty() {
            return Err(ConfigError::ZoneTooSmall {
                zone: "start",
                actor_size: self.actor_size,
            });
        }

        if self.bases.len() != BASE_COUNT {
            return Err(ConfigError::BaseCount {
                expected: BASE_COUNT,
                found: self.bases.len(),
            });
        }
        for (index, base) in self.bases.iter().enumerate() {
            let expected = index as u8 + 1;
            if base.id != expected {
                return Err(ConfigError::BaseId {
                    index,
                    id: base.id,
                    expected,
                });
            }
            let footprint = base.footprint();
            if footprint.is_empty() || !self.arena.contains(&footprint) {
                return Err(ConfigError::BaseOutsideArena { id: base.id });
            }
            if footprint.overlaps(&self.start_zone) {
                return Err(ConfigError::BaseInStartZone { id: base.id });
            }
        }
        for (i, a) in self.bases.iter().enumerate() {
            for b in &self.bases[i + 1..] {
                if a.footprint().overlaps(&b.footprint()) {
                    return Err(ConfigError::BasesOverlap { a: a.id, b: b.id });
                }
            }
        }
        Ok(())
    }

    /// Look up a base by id
    #[inline]
    pub fn base(&self, id: u8) -> Option<&Base> {
        let index = usize::from(id).checked_sub(1)?;
        self.bases.get(index)
    }

    /// Footprint of an actor centered at `pos`
    #[inline]
    pub fn actor_footprint(&self, pos: Vec2) -> Aabb {
        Aabb::from_center_size(pos, Vec2::splat(self.actor_size))
    }

    /// Where a jailed actor's center may be placed (footprint stays inside the jail)
    pub fn jail_area(&self) -> Aabb {
        let half = self.actor_size * 0.5;
        self.jail.inset(half, half)
    }

    /// Where a released actor's center may be placed: inside the start zone
    /// and clear of the jail strip below it
    pub fn release_area(&self) -> Aabb {
        let half = self.actor_size * 0.5;
        let mut area = self.start_zone.inset(half, half);
        if self.jail.min.y > self.start_zone.min.y {
            area.max.y = area.max.y.min(self.jail.min.y - half);
        }
        area
    }

    /// Classify a point against the zones. Jail wins over start.
    pub fn classify(&self, point: Vec2) -> Zone {
        if self.jail.contains_point(point) {
            Zone::Jail
        } else if self.start_zone.contains_point(point) {
            Zone::Start
        } else {
            Zone::Arena
        }
    }
}
