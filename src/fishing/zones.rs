//! Concentric zone geometry of the fishing board.
//!
//! ```text
//!        ┌─────── Red ───────┐
//!        │   ┌── Yellow ──┐  │
//!        │   │  ( Green ) │  │
//!        │   └────────────┘  │
//!        └───────────────────┘
//! ```
//!
//! Positions are board-local with the center at the origin. A "unit" position
//! is a board position divided by the Red radius, so the Red rim sits at 1.0.

use bevy::math::Vec2;
use rand::Rng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{FishingError, FishingResult};

// ─── Zone ────────────────────────────────────────────────────────────────────

/// Named radial band, ordered inner to outer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Green = 0,
    Yellow = 1,
    Red = 2,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Green, Zone::Yellow, Zone::Red];

    /// The next zone inward, or `None` for Green.
    pub fn inner(self) -> Option<Zone> {
        match self {
            Zone::Green => None,
            Zone::Yellow => Some(Zone::Green),
            Zone::Red => Some(Zone::Yellow),
        }
    }
}

/// One ring of the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneRing {
    pub radius: f32,
    /// Power multiplier at the inner edge (`.0`) and outer edge (`.1`).
    pub multiplier_range: (f32, f32),
}

impl ZoneRing {
    pub const fn new(radius: f32, lo: f32, hi: f32) -> Self {
        Self {
            radius,
            multiplier_range: (lo, hi),
        }
    }
}

// ─── Board geometry ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleZones {
    pub green: ZoneRing,
    pub yellow: ZoneRing,
    pub red: ZoneRing,
}

impl Default for CircleZones {
    fn default() -> Self {
        Self {
            green: ZoneRing::new(60.0, 0.5, 1.0),
            yellow: ZoneRing::new(120.0, 1.0, 1.5),
            red: ZoneRing::new(180.0, 1.5, 2.0),
        }
    }
}

impl CircleZones {
    pub fn ring(&self, zone: Zone) -> &ZoneRing {
        match zone {
            Zone::Green => &self.green,
            Zone::Yellow => &self.yellow,
            Zone::Red => &self.red,
        }
    }

    /// Radius of the outermost ring; every position is clamped inside it.
    pub fn board_radius(&self) -> f32 {
        self.red.radius
    }

    /// Check radii are positive and strictly increasing inner to outer.
    pub fn validate(&self) -> FishingResult<()> {
        let mut previous = 0.0;
        for zone in Zone::ALL {
            let radius = self.ring(zone).radius;
            if radius <= previous {
                return Err(FishingError::InvalidZones(format!(
                    "{zone:?} radius {radius} must be greater than {previous}"
                )));
            }
            previous = radius;
        }
        Ok(())
    }

    /// Outer edge of `zone` as a fraction of the Red radius.
    pub fn threshold(&self, zone: Zone) -> f32 {
        let red = self.board_radius();
        if red <= 0.0 {
            return 0.0;
        }
        self.ring(zone).radius / red
    }

    /// Inner edge of `zone` as a fraction of the Red radius.
    pub fn inner_threshold(&self, zone: Zone) -> f32 {
        zone.inner().map_or(0.0, |inner| self.threshold(inner))
    }

    /// Innermost zone whose threshold reaches `normalized_radius`.
    ///
    /// Radii past the rim classify as Red.
    pub fn classify(&self, normalized_radius: f32) -> Zone {
        Zone::ALL
            .into_iter()
            .find(|&zone| normalized_radius <= self.threshold(zone))
            .unwrap_or(Zone::Red)
    }

    /// Multiplier for a unit position, lerped across its zone's range by how
    /// far the position sits between the zone's inner and outer edge.
    pub fn power_multiplier(&self, unit_position: Vec2) -> f32 {
        let magnitude = unit_position.length();
        let zone = self.classify(magnitude);
        let inner = self.inner_threshold(zone);
        let outer = self.threshold(zone);
        let span = outer - inner;
        let t = if span > 0.0 {
            ((magnitude - inner) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (lo, hi) = self.ring(zone).multiplier_range;
        lo + (hi - lo) * t
    }

    /// Board position → unit position.
    pub fn unit_circle(&self, position: Vec2) -> Vec2 {
        let red = self.board_radius();
        if red <= 0.0 {
            return Vec2::ZERO;
        }
        position / red
    }

    /// Unit position → board position.
    pub fn board_position(&self, unit: Vec2) -> Vec2 {
        unit * self.board_radius()
    }

    /// Pull `position` back onto the Red rim if it lies outside, keeping its
    /// direction from the center.
    pub fn clamp_to_board(&self, position: Vec2) -> Vec2 {
        position.clamp_length_max(self.board_radius().max(0.0))
    }

    /// Random point on the unit rim.
    pub fn random_rim_position(&self, rng: &mut dyn RngCore) -> Vec2 {
        random_direction(rng)
    }

    /// Random unit position whose radius falls inside `zone`'s band.
    pub fn random_position_in_zone(&self, zone: Zone, rng: &mut dyn RngCore) -> Vec2 {
        let inner = self.inner_threshold(zone);
        let outer = self.threshold(zone);
        let radius = if outer > inner {
            rng.gen_range(inner..=outer)
        } else {
            outer
        };
        random_direction(rng) * radius
    }

    /// Any zone other than `exclude`, uniformly.
    pub fn random_zone_except(&self, exclude: Zone, rng: &mut dyn RngCore) -> Zone {
        let candidates: Vec<Zone> = Zone::ALL.into_iter().filter(|&z| z != exclude).collect();
        candidates[rng.gen_range(0..candidates.len())]
    }
}

/// Unit vector pointing at `degrees` (counter-clockwise from +X).
pub fn unit_from_angle(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Unsigned angle in degrees between two vectors, 0 when either is zero.
pub fn unsigned_angle(from: Vec2, to: Vec2) -> f32 {
    let denominator = (from.length_squared() * to.length_squared()).sqrt();
    if denominator < 1e-15 {
        return 0.0;
    }
    let dot = (from.dot(to) / denominator).clamp(-1.0, 1.0);
    dot.acos().to_degrees()
}

/// Facing angle in degrees for a sprite at `position` turned toward the center.
pub fn facing_center(position: Vec2) -> f32 {
    let to_center = (-position).normalize_or_zero();
    to_center.y.atan2(to_center.x).to_degrees() + 90.0
}

fn random_direction(rng: &mut dyn RngCore) -> Vec2 {
    unit_from_angle(rng.gen_range(0.0..360.0))
}
