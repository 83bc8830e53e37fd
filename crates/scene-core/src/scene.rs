//! The render-loop side: owns the field and the centerpiece, reads the mode
//! once per frame and produces the frame's draw commands.

use crate::centerpiece::{Centerpiece, CenterpieceFrame};
use crate::constants::*;
use crate::geometry::Instance;
use crate::input::{Pointer, Viewport};
use crate::mode::{Mode, ModeStore};
use crate::particles::{FieldError, FieldFrame, ParticleField};
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub desktop_particles: usize,
    pub mobile_particles: usize,
    pub mobile_breakpoint_px: f32,
    pub palette: Vec<[f32; 3]>,
    pub seed: u64,
    pub camera_z: f32,
    pub fov_y_deg: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            desktop_particles: DESKTOP_PARTICLES,
            mobile_particles: MOBILE_PARTICLES,
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            palette: DEFAULT_PALETTE.to_vec(),
            seed: 42,
            camera_z: CAMERA_Z,
            fov_y_deg: CAMERA_FOV_Y_DEG,
        }
    }
}

impl SceneConfig {
    /// Particle count for a viewport `width_px` wide.
    pub fn particle_count_for_width(&self, width_px: f32) -> usize {
        if width_px < self.mobile_breakpoint_px {
            self.mobile_particles
        } else {
            self.desktop_particles
        }
    }
}

/// Per-frame output, reused across frames to avoid reallocating.
#[derive(Clone, Debug, Default)]
pub struct FrameOutput {
    pub mode: Mode,
    pub particles: Vec<Instance>,
    pub rings: Vec<Instance>,
    pub centerpiece_scale: f32,
}

pub struct Scene {
    config: SceneConfig,
    store: Rc<ModeStore>,
    last_mode: Option<Mode>,
    field: ParticleField,
    centerpiece: Centerpiece,
    pointer: Pointer,
    aspect: f32,
    frames: u64,
}

impl Scene {
    pub fn new(config: SceneConfig, store: Rc<ModeStore>, width_px: f32) -> Result<Self, FieldError> {
        let count = config.particle_count_for_width(width_px);
        let field = ParticleField::new(count, &config.palette, config.seed)?;
        Ok(Self {
            config,
            store,
            last_mode: None,
            field,
            centerpiece: Centerpiece::new(),
            pointer: Pointer::NEUTRAL,
            aspect: 1.0,
            frames: 0,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn store(&self) -> &Rc<ModeStore> {
        &self.store
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn centerpiece(&self) -> &Centerpiece {
        &self.centerpiece
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    /// Update the aspect ratio from the canvas size in pixels.
    pub fn set_surface_size(&mut self, width_px: f32, height_px: f32) {
        if width_px > 0.0 && height_px > 0.0 && width_px.is_finite() && height_px.is_finite() {
            self.aspect = width_px / height_px;
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::from_camera(self.config.fov_y_deg, self.config.camera_z, self.aspect)
    }

    /// Rebuild the field for the breakpoint matching `width_px`, keeping the
    /// centerpiece. Returns whether the field was rebuilt.
    pub fn resize(&mut self, width_px: f32) -> Result<bool, FieldError> {
        let count = self.config.particle_count_for_width(width_px);
        self.set_particle_count(count)
    }

    pub fn set_particle_count(&mut self, count: usize) -> Result<bool, FieldError> {
        if count == self.field.len() {
            return Ok(false);
        }
        self.field = ParticleField::new(count, &self.config.palette, self.config.seed)?;
        Ok(true)
    }

    /// Advance one frame and write the draw commands into `out`.
    pub fn frame(&mut self, out: &mut FrameOutput) {
        // stable for the whole frame
        let mode = self.store.get_mode();
        if self.last_mode.replace(mode) != Some(mode) {
            log::debug!("[scene] frame {} sees mode {}", self.frames, mode);
        }

        self.field.advance(&FieldFrame {
            mode,
            pointer: self.pointer,
        });
        self.centerpiece.advance(&CenterpieceFrame {
            mode,
            pointer: self.pointer,
            viewport: self.viewport(),
        });

        out.mode = mode;
        out.particles.clear();
        self.field.render(&mut out.particles);
        out.rings.clear();
        self.centerpiece.render(&mut out.rings);
        out.centerpiece_scale = self.centerpiece.scale();
        self.frames += 1;
    }
}
