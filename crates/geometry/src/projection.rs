//! Pseudo-3D rotation and orthographic projection
//!
//! Polyhedral kinds define canonical 3D vertices around the local origin,
//! rotate them (tilt about the X axis, then yaw about the Y axis, in that
//! order) and project orthographically: the depth component, compressed by a
//! perspective factor, is added to the vertical screen axis. Faces carry the
//! average transformed depth of their vertices as a sort key; rendering in
//! ascending key order draws the farthest faces first so nearer faces
//! occlude them.

/// A point in the local 3D space of a polyhedral shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Rotates `v` by `tilt_rad` about the X axis, then by `yaw_rad` about the
/// Y axis. Larger resulting `z` is nearer to the viewer.
pub fn tilt_yaw_rotate(v: Vec3, tilt_rad: f64, yaw_rad: f64) -> Vec3 {
    let (sin_t, cos_t) = tilt_rad.sin_cos();
    let y_t = v.y * cos_t - v.z * sin_t;
    let z_t = v.y * sin_t + v.z * cos_t;

    let (sin_y, cos_y) = yaw_rad.sin_cos();
    let x_r = v.x * cos_y + z_t * sin_y;
    let z_r = -v.x * sin_y + z_t * cos_y;

    Vec3::new(x_r, y_t, z_r)
}

/// Projects a rotated vertex to screen space around `(cx, cy)`. The depth
/// component is scaled by `perspective_factor` and added to the screen Y so
/// nearer vertices sit lower on screen. Rounding happens here, once.
pub fn project_vertex(v: Vec3, cx: i32, cy: i32, perspective_factor: f64) -> (i32, i32) {
    (
        cx + v.x.round() as i32,
        cy + (v.y + v.z * perspective_factor).round() as i32,
    )
}

/// Average transformed depth of a face's vertices. Faces sorted ascending by
/// this key render farthest-first.
pub fn face_depth_key(face: &[Vec3]) -> f64 {
    if face.is_empty() {
        return 0.0;
    }
    face.iter().map(|v| v.z).sum::<f64>() / face.len() as f64
}
