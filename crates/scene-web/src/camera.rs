use glam::{Mat4, Vec3};
use scene_core::constants::{CAMERA_FAR, CAMERA_NEAR};

/// Fixed look-at camera on the +z axis aimed at the origin.
#[inline]
pub fn eye(camera_z: f32) -> Vec3 {
    Vec3::new(0.0, 0.0, camera_z)
}

/// Clip-from-world matrix for the scene camera.
pub fn view_proj(camera_z: f32, fov_y_deg: f32, aspect: f32) -> Mat4 {
    let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    let proj = Mat4::perspective_rh(fov_y_deg.to_radians(), aspect, CAMERA_NEAR, CAMERA_FAR);
    let view = Mat4::look_at_rh(eye(camera_z), Vec3::ZERO, Vec3::Y);
    proj * view
}
