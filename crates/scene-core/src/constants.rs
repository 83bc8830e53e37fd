// Shared visual tuning constants used by the core and the web frontend.

/// Pack a `0xRRGGBB` literal into normalized RGB.
macro_rules! rgb {
    ($hex:expr) => {
        [
            (($hex >> 16) & 0xff) as f32 / 255.0,
            (($hex >> 8) & 0xff) as f32 / 255.0,
            ($hex & 0xff) as f32 / 255.0,
        ]
    };
}

// Particle counts
pub const DESKTOP_PARTICLES: usize = 1500;
pub const MOBILE_PARTICLES: usize = 500;
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0; // widths below this use the mobile count
pub const MAX_PARTICLES: usize = 20_000; // upper bound handed to the GPU instance buffer

// Particle profile ranges (fixed at creation)
pub const PHASE_INIT_MAX: f32 = 100.0;
pub const FACTOR_MIN: f32 = 20.0;
pub const FACTOR_SPAN: f32 = 100.0;
pub const SPEED_MIN: f32 = 0.01;
pub const SPEED_SPAN: f32 = 1.0 / 200.0;
pub const OFFSET_HALF_EXTENT: f32 = 50.0; // offsets in [-50, 50)

// Ordered lattice
pub const GRID_SPACING: f32 = 2.0;

// Per-mode targets
pub const DRIFT_SCALE: f32 = 0.3;
pub const DRIFT_AMPLITUDE: f32 = 5.0;
pub const DRIFT_FREQS: [f32; 3] = [0.5, 0.3, 0.2]; // per-axis multiples of the phase
pub const WARNING_SCALE: f32 = 0.4;
pub const WARNING_JITTER: f32 = 2.0; // full width of the per-frame jitter
pub const ORDER_SCALE: f32 = 0.2;

// Smoothing
pub const LERP_DEFAULT: f32 = 0.05;
pub const LERP_WARNING: f32 = 0.1; // snappier approach while jagged
pub const POINTER_INFLUENCE_DIVISOR: f32 = 10.0;
pub const POINTER_REACH: f32 = 50.0; // world units a full pointer deflection feeds the chaos orbit

// Colors
pub const DEFAULT_PALETTE: [[f32; 3]; 3] = [rgb!(0x7076C6), rgb!(0x7177C7), rgb!(0xFF4500)];
pub const WARNING_COLOR: [f32; 3] = rgb!(0xFF0000); // alert red
pub const ORDER_COLOR: [f32; 3] = rgb!(0x00F3FF); // neon blue
pub const BACKGROUND_COLOR: [f32; 3] = rgb!(0x1E1B4B);

// Centerpiece
pub const RING_COUNT: usize = 3;
pub const RING_RADIUS: f32 = 3.0;
pub const RING_TUBE: f32 = 0.05;
pub const RING_RADIAL_SEGMENTS: u32 = 16;
pub const RING_TUBULAR_SEGMENTS: u32 = 100;
pub const RING_COLORS: [[f32; 3]; RING_COUNT] = [rgb!(0x7076C6), rgb!(0x7177C7), rgb!(0xFF4500)];
pub const RING_EMISSIVE: f32 = 2.0;
pub const CENTERPIECE_SPIN: [f32; 2] = [0.002, 0.003]; // radians per frame around x, y
pub const PARALLAX_DIVISOR: f32 = 10.0; // viewport extent / 10 at full pointer deflection
pub const PARALLAX_LERP: f32 = 0.1;
pub const CENTERPIECE_SCALE_LERP: f32 = 0.05;

// Particle geometry
pub const PARTICLE_CUBE_SIZE: f32 = 0.5;
pub const PARTICLE_EMISSIVE: f32 = 0.5;

// Camera
pub const CAMERA_Z: f32 = 15.0;
pub const CAMERA_FOV_Y_DEG: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;

// Fog
pub const FOG_NEAR: f32 = 5.0;
pub const FOG_FAR: f32 = 30.0;
