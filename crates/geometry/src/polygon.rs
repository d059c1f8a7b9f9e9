//! Polygon vertex generation, rotation and containment

/// Crossing-number (ray-casting) point-in-polygon test.
///
/// Walks the ordered edge list, including the implicit closing edge from the
/// last vertex back to the first, and counts edges a rightward ray from the
/// point crosses. Odd count means inside. O(n) in the vertex count.
///
/// Polygons with fewer than 3 vertices contain nothing.
pub fn point_in_polygon(px: i32, py: i32, vertices: &[(i32, i32)]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let (px, py) = (f64::from(px), f64::from(py));
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (x1, y1) = (f64::from(vertices[j].0), f64::from(vertices[j].1));
        let (x2, y2) = (f64::from(vertices[i].0), f64::from(vertices[i].1));
        if ((y2 > py) != (y1 > py)) && (px < (x1 - x2) * (py - y2) / (y1 - y2) + x2) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Rotates origin-centered float vertices by `angle_rad`, translates them to
/// `(cx, cy)` and rounds to pixel coordinates.
///
/// Rounding happens only at this final step so repeated trigonometry never
/// compounds into the stored geometry.
pub fn rotate_polygon_vertices(
    cx: i32,
    cy: i32,
    centered: &[(f64, f64)],
    angle_rad: f64,
) -> Vec<(i32, i32)> {
    let (sin, cos) = angle_rad.sin_cos();
    centered
        .iter()
        .map(|&(x, y)| {
            let rx = x * cos - y * sin;
            let ry = x * sin + y * cos;
            (
                cx + rx.round() as i32,
                cy + ry.round() as i32,
            )
        })
        .collect()
}

/// Vertices of a regular `n`-gon of the given circumradius, centered at the
/// origin. The first vertex points straight up (screen coordinates, so the
/// base angle is -PI/2) before `start_angle_offset_rad` is applied.
pub fn regular_polygon_vertices(
    radius: f64,
    num_vertices: usize,
    start_angle_offset_rad: f64,
) -> Vec<(f64, f64)> {
    let mut verts = Vec::with_capacity(num_vertices);
    let start = -std::f64::consts::FRAC_PI_2 + start_angle_offset_rad;
    let step = 2.0 * std::f64::consts::PI / num_vertices as f64;
    for i in 0..num_vertices {
        let a = start + step * i as f64;
        verts.push((radius * a.cos(), radius * a.sin()));
    }
    verts
}

/// Vertices of an `n`-pointed star: `2n` vertices alternating between the
/// outer and inner radius, starting with an outer point straight up.
pub fn star_vertices(
    outer_radius: f64,
    inner_radius: f64,
    num_points: usize,
    start_angle_offset_rad: f64,
) -> Vec<(f64, f64)> {
    let mut verts = Vec::with_capacity(num_points * 2);
    let start = -std::f64::consts::FRAC_PI_2 + start_angle_offset_rad;
    let step = std::f64::consts::PI / num_points as f64;
    for i in 0..num_points * 2 {
        let r = if i % 2 == 0 { outer_radius } else { inner_radius };
        let a = start + step * i as f64;
        verts.push((r * a.cos(), r * a.sin()));
    }
    verts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn unit_square() -> Vec<(i32, i32)> {
        vec![(0, 0), (10, 0), (10, 10), (0, 10)]
    }

    #[test]
    fn test_point_in_polygon_square() {
        let sq = unit_square();
        assert!(point_in_polygon(5, 5, &sq));
        assert!(!point_in_polygon(15, 5, &sq));
        assert!(!point_in_polygon(5, -1, &sq));
    }

    #[test]
    fn test_point_in_polygon_concave() {
        // L-shape: the notch at the top right is outside.
        let l = vec![(0, 0), (4, 0), (4, 2), (2, 2), (2, 6), (0, 6)];
        assert!(point_in_polygon(1, 5, &l));
        assert!(point_in_polygon(3, 1, &l));
        assert!(!point_in_polygon(3, 4, &l));
    }

    #[test]
    fn test_point_in_polygon_degenerate() {
        assert!(!point_in_polygon(0, 0, &[]));
        assert!(!point_in_polygon(0, 0, &[(0, 0), (5, 5)]));
    }

    #[test]
    fn test_rotate_identity() {
        let centered = vec![(-5.0, 0.0), (5.0, 0.0), (0.0, 7.0)];
        let verts = rotate_polygon_vertices(10, 20, &centered, 0.0);
        assert_eq!(verts, vec![(5, 20), (15, 20), (10, 27)]);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let centered = vec![(10.0, 0.0)];
        let verts = rotate_polygon_vertices(0, 0, &centered, PI / 2.0);
        assert_eq!(verts, vec![(0, 10)]);
    }

    #[test]
    fn test_regular_polygon_first_vertex_points_up() {
        let hex = regular_polygon_vertices(10.0, 6, 0.0);
        assert_eq!(hex.len(), 6);
        assert!(hex[0].0.abs() < 1e-9);
        assert!((hex[0].1 + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_star_alternates_radii() {
        let star = star_vertices(10.0, 4.0, 5, 0.0);
        assert_eq!(star.len(), 10);
        for (i, &(x, y)) in star.iter().enumerate() {
            let r = (x * x + y * y).sqrt();
            let expected = if i % 2 == 0 { 10.0 } else { 4.0 };
            assert!((r - expected).abs() < 1e-9, "vertex {} radius {}", i, r);
        }
    }

    proptest! {
        // Rotating a regular n-gon by its own symmetry angle reproduces the
        // same vertex set up to re-indexing.
        #[test]
        fn prop_regular_polygon_rotational_symmetry(n in 3usize..12, radius in 20.0f64..200.0) {
            let centered = regular_polygon_vertices(radius, n, 0.0);
            let symmetry = 2.0 * PI / n as f64;
            let base = rotate_polygon_vertices(0, 0, &centered, 0.0);
            let turned = rotate_polygon_vertices(0, 0, &centered, symmetry);
            for v in &turned {
                let close = base
                    .iter()
                    .any(|b| (b.0 - v.0).abs() <= 1 && (b.1 - v.1).abs() <= 1);
                prop_assert!(close, "vertex {:?} not in original set", v);
            }
        }

        // The polygon centroid of a convex regular polygon is always inside.
        #[test]
        fn prop_centroid_inside_regular_polygon(n in 3usize..12, radius in 10.0f64..100.0, angle in 0.0f64..(2.0 * PI)) {
            let centered = regular_polygon_vertices(radius, n, 0.0);
            let verts = rotate_polygon_vertices(500, 500, &centered, angle);
            prop_assert!(point_in_polygon(500, 500, &verts));
        }

        // Points far outside the circumradius are never inside.
        #[test]
        fn prop_far_point_outside(n in 3usize..12, radius in 10.0f64..100.0) {
            let centered = regular_polygon_vertices(radius, n, 0.0);
            let verts = rotate_polygon_vertices(500, 500, &centered, 0.3);
            let far = 500 + radius as i32 * 3;
            prop_assert!(!point_in_polygon(far, 500, &verts));
        }
    }
}
