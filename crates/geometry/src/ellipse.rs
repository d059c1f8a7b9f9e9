//! Algebraic circle and ellipse containment

/// True if `(px, py)` lies inside or on the circle. Non-positive radii
/// contain nothing.
pub fn point_in_circle(px: i32, py: i32, cx: i32, cy: i32, radius: f64) -> bool {
    if radius <= 0.0 {
        return false;
    }
    let dx = f64::from(px - cx);
    let dy = f64::from(py - cy);
    dx * dx + dy * dy <= radius * radius
}

/// True if `(px, py)` lies inside or on the axis-aligned ellipse with
/// semi-axes `rx`, `ry`. Non-positive semi-axes contain nothing.
pub fn point_in_ellipse(px: i32, py: i32, cx: i32, cy: i32, rx: f64, ry: f64) -> bool {
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let nx = f64::from(px - cx) / rx;
    let ny = f64::from(py - cy) / ry;
    nx * nx + ny * ny <= 1.0
}
