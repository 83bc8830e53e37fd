//! The particle field: N points whose targets depend on the narrative mode.
//!
//! Only position is smoothed. Scale, rotation and color are taken straight
//! from the per-frame target. The field owns a seeded RNG so a run is
//! replayable from `(count, palette, seed)` and the sequence of frames.

use crate::constants::*;
use crate::geometry::Instance;
use crate::input::Pointer;
use crate::mode::Mode;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("particle palette is empty")]
    EmptyPalette,
    #[error("particle count {count} exceeds the maximum of {max}")]
    TooManyParticles { count: usize, max: usize },
}

#[derive(Clone, Debug)]
pub struct Particle {
    /// Phase accumulator.
    pub t: f32,
    pub factor: f32,
    pub speed: f32,
    pub offset: Vec3,
    pub grid: Vec3,
    /// Pointer influence on the chaos orbit, in world units.
    pub pointer: Vec2,
    /// Smoothed position; `None` until the first frame.
    pub current: Option<Vec3>,
    pub scale: f32,
    pub rotation: Vec3,
    pub color: [f32; 3],
}

/// What a particle is heading for this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub position: Vec3,
    pub scale: f32,
    /// Mode-wide color, `None` means "use the palette".
    pub color: Option<[f32; 3]>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FieldFrame {
    pub mode: Mode,
    pub pointer: Pointer,
}

#[inline]
pub fn lerp_factor(mode: Mode) -> f32 {
    match mode {
        Mode::Warning => LERP_WARNING,
        _ => LERP_DEFAULT,
    }
}

/// One smoothing step: `current + (target - current) * k`.
#[inline]
pub fn approach(current: Vec3, target: Vec3, k: f32) -> Vec3 {
    current + (target - current) * k
}

/// Smallest side length whose cube holds `count` cells.
pub fn grid_side(count: usize) -> usize {
    let mut side = (count as f64).cbrt().round() as usize;
    while side.saturating_mul(side).saturating_mul(side) < count {
        side += 1;
    }
    while side > 1 && (side - 1).pow(3) >= count {
        side -= 1;
    }
    side.max(1)
}

pub fn grid_coordinate(index: usize, side: usize) -> Vec3 {
    let side = side.max(1);
    let half = side as f32 * GRID_SPACING / 2.0;
    Vec3::new(
        (index % side) as f32 * GRID_SPACING - half,
        ((index / side) % side) as f32 * GRID_SPACING - half,
        (index / (side * side)) as f32 * GRID_SPACING - half,
    )
}

/// Per-mode target for one particle at its current phase.
///
/// `rng` is only drawn from in [`Mode::Warning`].
pub fn target_for(p: &Particle, mode: Mode, rng: &mut impl Rng) -> Target {
    let t = p.t;
    let f = p.factor;
    match mode {
        Mode::Chaos => {
            // keeps moving while hidden so it resumes smoothly when shown
            let a = t.cos() + t.sin() / 10.0;
            let b = t.sin() + (t * 2.0).cos() / 10.0;
            let m = p.pointer / POINTER_INFLUENCE_DIVISOR;
            let swing = (t / 10.0 * f).cos();
            Target {
                position: Vec3::new(
                    m.x * a + p.offset.x + swing + t.sin() * f / 10.0,
                    m.y * b + p.offset.y + (t / 10.0 * f).sin() + (t * 2.0).cos() * f / 10.0,
                    m.y * b + p.offset.z + swing + (t * 3.0).sin() * f / 10.0,
                ),
                scale: 0.0,
                color: None,
            }
        }
        Mode::Drift => {
            let [fx, fy, fz] = DRIFT_FREQS;
            Target {
                position: p.offset
                    + Vec3::new((t * fx).sin(), (t * fy).cos(), (t * fz).sin()) * DRIFT_AMPLITUDE,
                scale: DRIFT_SCALE,
                color: None,
            }
        }
        Mode::Warning => {
            let jitter = Vec3::new(
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
                rng.gen::<f32>() - 0.5,
            ) * WARNING_JITTER;
            Target {
                position: p.offset + jitter,
                scale: WARNING_SCALE,
                color: Some(WARNING_COLOR),
            }
        }
        Mode::Order => Target {
            position: p.grid,
            scale: ORDER_SCALE,
            color: Some(ORDER_COLOR),
        },
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    palette: Vec<[f32; 3]>,
    rng: StdRng,
    frames: u64,
    rejected: u64,
}

impl ParticleField {
    pub fn new(count: usize, palette: &[[f32; 3]], seed: u64) -> Result<Self, FieldError> {
        if palette.is_empty() {
            return Err(FieldError::EmptyPalette);
        }
        if count > MAX_PARTICLES {
            return Err(FieldError::TooManyParticles {
                count,
                max: MAX_PARTICLES,
            });
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let side = grid_side(count);
        let particles = (0..count)
            .map(|i| {
                let t = rng.gen::<f32>() * PHASE_INIT_MAX;
                let factor = FACTOR_MIN + rng.gen::<f32>() * FACTOR_SPAN;
                let speed = SPEED_MIN + rng.gen::<f32>() * SPEED_SPAN;
                let offset = Vec3::new(
                    rng.gen::<f32>() * 2.0 - 1.0,
                    rng.gen::<f32>() * 2.0 - 1.0,
                    rng.gen::<f32>() * 2.0 - 1.0,
                ) * OFFSET_HALF_EXTENT;
                Particle {
                    t,
                    factor,
                    speed,
                    offset,
                    grid: grid_coordinate(i, side),
                    pointer: Vec2::ZERO,
                    current: None,
                    scale: 0.0,
                    rotation: Vec3::ZERO,
                    color: palette[i % palette.len()],
                }
            })
            .collect();
        log::info!("[scene] particle field count={} grid_side={}", count, side);
        Ok(Self {
            particles,
            palette: palette.to_vec(),
            rng,
            frames: 0,
            rejected: 0,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn palette(&self) -> &[[f32; 3]] {
        &self.palette
    }

    /// Frames advanced since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Position updates dropped because they would have gone non-finite.
    pub fn rejected_updates(&self) -> u64 {
        self.rejected
    }

    /// Advance every particle by one frame.
    pub fn advance(&mut self, frame: &FieldFrame) {
        let mode = frame.mode;
        let k = lerp_factor(mode);
        let pointer = frame
            .pointer
            .finite()
            .map(|p| p * POINTER_REACH)
            .filter(|r| r.is_finite());
        let palette_len = self.palette.len();
        let rejected_before = self.rejected;

        for (i, p) in self.particles.iter_mut().enumerate() {
            p.t += p.speed / 2.0;
            if let Some(reach) = pointer {
                p.pointer = reach;
            }
            let target = target_for(p, mode, &mut self.rng);

            let next = match p.current {
                None => target.position,
                Some(cur) => approach(cur, target.position, k),
            };
            if next.is_finite() {
                p.current = Some(next);
            } else {
                self.rejected += 1;
            }

            p.scale = target.scale;
            p.rotation = Vec3::new(p.t.cos(), p.t.sin(), 0.0);
            // rewritten every frame, even when unchanged
            p.color = target.color.unwrap_or(self.palette[i % palette_len]);
        }

        if rejected_before == 0 && self.rejected > 0 {
            log::warn!("[scene] dropped non-finite particle update(s)");
        }
        self.frames += 1;
    }

    /// Append one instance per particle to `out`.
    pub fn render(&self, out: &mut Vec<Instance>) {
        out.reserve(self.particles.len());
        for p in &self.particles {
            let pos = p.current.unwrap_or(p.offset);
            let rot = Quat::from_euler(EulerRot::XYZ, p.rotation.x, p.rotation.y, p.rotation.z);
            let model = Mat4::from_scale_rotation_translation(Vec3::splat(p.scale), rot, pos);
            out.push(Instance::new(model, p.color, PARTICLE_EMISSIVE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_side_is_exact_cube_root_ceiling() {
        assert_eq!(grid_side(0), 1);
        assert_eq!(grid_side(1), 1);
        assert_eq!(grid_side(8), 2);
        assert_eq!(grid_side(9), 3);
        assert_eq!(grid_side(27), 3);
        assert_eq!(grid_side(1000), 10);
        assert_eq!(grid_side(1500), 12);
    }

    #[test]
    fn grid_is_centered_lattice() {
        let side = 10;
        assert_eq!(grid_coordinate(0, side), Vec3::splat(-10.0));
        assert_eq!(grid_coordinate(1, side), Vec3::new(-8.0, -10.0, -10.0));
        assert_eq!(grid_coordinate(10, side), Vec3::new(-10.0, -8.0, -10.0));
        assert_eq!(grid_coordinate(100, side), Vec3::new(-10.0, -10.0, -8.0));
    }

    #[test]
    fn lerp_is_snappier_only_in_warning() {
        assert_eq!(lerp_factor(Mode::Warning), 0.1);
        for m in [Mode::Chaos, Mode::Drift, Mode::Order] {
            assert_eq!(lerp_factor(m), 0.05);
        }
    }
}
