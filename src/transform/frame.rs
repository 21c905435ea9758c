//! Rigid 2D transforms and the canonical agent frame.

use crate::foundation::core::{Affine, Point, Vec2};
use crate::scene::model::TrackState;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A rigid 2D transform: rotation followed by translation.
///
/// Applying the transform maps `p` to `R(rotation_rad) * p + translation`.
pub struct Transform2D {
    /// Rotation angle in radians.
    pub rotation_rad: f64,
    /// Translation applied after rotation.
    pub translation: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            rotation_rad: 0.0,
            translation: Vec2::ZERO,
        }
    }

    /// Transform from world frame into the agent frame anchored at
    /// `position` with heading `yaw`.
    ///
    /// In the output frame the anchor sits at the origin and the agent's
    /// forward direction is the positive x-axis: applying the result to
    /// `position` yields `(0, 0)`, and [`Self::apply_yaw`] maps `yaw` to
    /// zero.
    pub fn agent_frame(position: Point, yaw: f64) -> Self {
        let rotation_rad = -yaw;
        Self {
            rotation_rad,
            translation: -rotate(rotation_rad, position.to_vec2()),
        }
    }

    /// Transform from world frame into the agent frame of a track's
    /// prediction-time state. Pure function of the state snapshot.
    pub fn agent_frame_for_state(state: &TrackState) -> Self {
        Self::agent_frame(state.position, state.yaw)
    }

    /// Apply to a single point.
    pub fn apply(&self, p: Point) -> Point {
        let v = rotate(self.rotation_rad, p.to_vec2()) + self.translation;
        Point::new(v.x, v.y)
    }

    /// Apply to every point of a sequence, preserving order and count.
    pub fn apply_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.apply(p)).collect()
    }

    /// Map a world-frame heading into this transform's output frame.
    pub fn apply_yaw(&self, yaw: f64) -> f64 {
        yaw + self.rotation_rad
    }

    /// Composition `self ∘ other`: applying the result equals applying
    /// `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            rotation_rad: self.rotation_rad + other.rotation_rad,
            translation: rotate(self.rotation_rad, other.translation) + self.translation,
        }
    }

    /// The inverse transform; `inverse().apply(apply(p))` round-trips `p`.
    pub fn inverse(&self) -> Self {
        let rotation_rad = -self.rotation_rad;
        Self {
            rotation_rad,
            translation: -rotate(rotation_rad, self.translation),
        }
    }

    /// This transform as a [`kurbo::Affine`], for interop with consumers
    /// that work on affine matrices.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation) * Affine::rotate(self.rotation_rad)
    }
}

fn rotate(rad: f64, v: Vec2) -> Vec2 {
    let (sin, cos) = rad.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/frame.rs"]
mod tests;
