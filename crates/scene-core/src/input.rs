use glam::Vec2;

/// Pointer position normalized to `[-1, 1]` on both axes, y up.
///
/// Hosts without a pointer (touch, cursor outside the page) report
/// [`Pointer::NEUTRAL`]. Values are not trusted to be finite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub const NEUTRAL: Pointer = Pointer { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `None` when either coordinate is NaN or infinite.
    #[inline]
    pub fn finite(self) -> Option<Vec2> {
        (self.x.is_finite() && self.y.is_finite()).then(|| Vec2::new(self.x, self.y))
    }
}

/// Visible extent, in world units, of the plane the camera looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent of the plane at `distance` in front of a perspective camera.
    pub fn from_camera(fov_y_deg: f32, distance: f32, aspect: f32) -> Self {
        let height = 2.0 * distance * (fov_y_deg.to_radians() * 0.5).tan();
        Self {
            width: height * aspect,
            height,
        }
    }

    /// Zero, negative or non-finite extents cannot scale a pointer offset.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}
