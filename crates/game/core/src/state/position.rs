use core::f32::consts::{PI, TAU};

/// World-space location with facing.
///
/// `orientation` is in radians, counter-clockwise from the +x axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub orientation: f32,
}

impl Position {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        orientation: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32, orientation: f32) -> Self {
        Self {
            x,
            y,
            z,
            orientation,
        }
    }

    /// Euclidean distance in three dimensions.
    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Absolute angle from this position towards `other`, normalized to `[0, 2π)`.
    pub fn angle_to(&self, other: &Position) -> f32 {
        let angle = (other.y - self.y).atan2(other.x - self.x);
        normalize(angle)
    }

    /// Returns true if `other` lies inside an arc of width `arc` centered on
    /// this position's facing.
    ///
    /// An arc of `π` is the front half-plane.
    pub fn has_in_arc(&self, other: &Position, arc: f32) -> bool {
        if self.x == other.x && self.y == other.y {
            return true;
        }

        let mut relative = self.angle_to(other) - self.orientation;
        // Bring into (-π, π].
        relative = normalize(relative);
        if relative > PI {
            relative -= TAU;
        }

        let half = arc / 2.0;
        relative >= -half && relative <= half
    }

    /// Returns a copy rotated to face `other`.
    pub fn facing(&self, other: &Position) -> Self {
        Self {
            orientation: self.angle_to(other),
            ..*self
        }
    }
}

fn normalize(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}
