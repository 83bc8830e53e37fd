//! Three interlocking rings that pop in for `order` and spin with parallax.
//!
//! The rings exist for the whole lifetime of the scene. Hiding is a scale
//! fade toward zero so rotation and position keep their continuity.

use crate::constants::*;
use crate::geometry::Instance;
use crate::input::{Pointer, Viewport};
use crate::mode::Mode;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

#[derive(Clone, Copy, Debug)]
pub struct CenterpieceFrame {
    pub mode: Mode,
    pub pointer: Pointer,
    pub viewport: Viewport,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Centerpiece {
    pub rotation: Vec3,
    pub position: Vec2,
    scale: f32,
}

impl Default for Centerpiece {
    fn default() -> Self {
        Self::new()
    }
}

/// Ring orientations inside the group: face-on, about x, about y.
pub fn ring_orientations() -> [Quat; RING_COUNT] {
    [
        Quat::IDENTITY,
        Quat::from_rotation_x(FRAC_PI_2),
        Quat::from_rotation_y(FRAC_PI_2),
    ]
}

#[inline]
pub fn target_scale(mode: Mode) -> f32 {
    if mode == Mode::Order {
        1.0
    } else {
        0.0
    }
}

/// Parallax offset for a pointer, or `None` when it cannot be trusted.
pub fn parallax_target(pointer: Pointer, viewport: Viewport) -> Option<Vec2> {
    if viewport.is_degenerate() {
        return None;
    }
    let p = pointer.finite()?;
    let target = Vec2::new(
        p.x * viewport.width / PARALLAX_DIVISOR,
        p.y * viewport.height / PARALLAX_DIVISOR,
    );
    target.is_finite().then_some(target)
}

impl Centerpiece {
    pub fn new() -> Self {
        Self {
            rotation: Vec3::ZERO,
            position: Vec2::ZERO,
            scale: 0.0,
        }
    }

    /// Shared ring scale, always within `[0, 1]`.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn advance(&mut self, frame: &CenterpieceFrame) {
        self.rotation.x += CENTERPIECE_SPIN[0];
        self.rotation.y += CENTERPIECE_SPIN[1];

        // hold position when the pointer or viewport is unusable
        if let Some(target) = parallax_target(frame.pointer, frame.viewport) {
            self.position += (target - self.position) * PARALLAX_LERP;
        }

        let goal = target_scale(frame.mode);
        let next = self.scale + (goal - self.scale) * CENTERPIECE_SCALE_LERP;
        if next.is_finite() {
            self.scale = next.clamp(0.0, 1.0);
        }
    }

    /// Append the three ring instances to `out`.
    pub fn render(&self, out: &mut Vec<Instance>) {
        let group = Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position.extend(0.0),
        );
        for (orient, color) in ring_orientations().into_iter().zip(RING_COLORS) {
            out.push(Instance::new(
                group * Mat4::from_quat(orient),
                color,
                RING_EMISSIVE,
            ));
        }
    }
}
