//! Geometry Kernel - shared math for shape construction and hit-testing
//!
//! This crate provides the pure-math foundation the shape catalog is built on:
//! - 2D rotation about a local origin with rounding deferred to the final step
//! - Axis-aligned bounding boxes with inflation and overlap tests
//! - Crossing-number (ray-casting) point-in-polygon testing
//! - Algebraic circle and ellipse membership
//! - Regular-polygon and star vertex ring generation
//! - Pseudo-3D tilt/yaw rotation with depth-compressed orthographic projection
//!
//! Everything here is deterministic: identical inputs always produce identical
//! outputs, so hit-test geometry reconstructed from a stored record matches the
//! geometry computed at generation time bit for bit.

pub mod bbox;
pub mod ellipse;
pub mod polygon;
pub mod projection;

pub use bbox::BBox;
pub use ellipse::{point_in_circle, point_in_ellipse};
pub use polygon::{
    point_in_polygon, regular_polygon_vertices, rotate_polygon_vertices, star_vertices,
};
pub use projection::{face_depth_key, project_vertex, tilt_yaw_rotate, Vec3};
