//! Pseudo-3D shape catalog (`td_model` namespace)
//!
//! Ten kinds rendered as projected solids: extruded prisms (cube, cuboid,
//! cross_3d, star5_3d), a squashed-base pyramid, ellipse-capped cylinder and
//! cone, a projected octahedron, and shaded round forms (sphere, torus).
//! Faces carry independent brightness multipliers and render farthest-first.
//!
//! Each kind documents its clickable-face policy on the descriptor; the
//! policies are fixed per kind, not uniform across the catalog.

pub mod boxes;
pub mod cone;
pub mod cross3d;
pub mod cylinder;
pub mod octahedron;
pub mod palette;
pub mod pyramid;
pub mod sphere;
pub mod star5_3d;
pub mod torus;

use std::sync::Arc;

use geometry::{point_in_polygon, BBox};
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{PlacedShape, RenderStyle, ShapeDescriptor};
use crate::record::{DrawingRecord, ParamMap};

/// Namespace name the pseudo-3D catalog registers under.
pub const NAMESPACE: &str = "td_model";

/// All pseudo-3D descriptors, in registration order.
pub fn descriptors() -> Vec<Arc<dyn ShapeDescriptor>> {
    vec![
        Arc::new(boxes::CubeDescriptor),
        Arc::new(boxes::CuboidDescriptor),
        Arc::new(pyramid::PyramidDescriptor),
        Arc::new(sphere::SphereDescriptor),
        Arc::new(cylinder::CylinderDescriptor),
        Arc::new(cone::ConeDescriptor),
        Arc::new(octahedron::OctahedronDescriptor),
        Arc::new(torus::TorusDescriptor),
        Arc::new(cross3d::Cross3dDescriptor),
        Arc::new(star5_3d::Star53dDescriptor),
    ]
}

/// Base direction of the depth offset for extruded prisms: up and to the
/// right, before the shape's own rotation is added.
pub(crate) const EXTRUSION_BASE_ANGLE: f64 = -std::f64::consts::FRAC_PI_4;

/// Shifts front-face vertices by the depth offset to get the back face.
pub(crate) fn extrude(front: &[(i32, i32)], offset: f64, angle_rad: f64) -> Vec<(i32, i32)> {
    let dx = (offset * angle_rad.cos()).round() as i32;
    let dy = (offset * angle_rad.sin()).round() as i32;
    front.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
}

/// Side quad connecting front edge `i` to the matching back edge.
pub(crate) fn side_quad(front: &[(i32, i32)], back: &[(i32, i32)], i: usize) -> [(i32, i32); 4] {
    let j = (i + 1) % front.len();
    [front[i], front[j], back[j], back[i]]
}

/// A generic extruded prism. Clickable region: the FRONT face only; the
/// depth offset is visual and never part of the hit area.
pub(crate) struct ExtrudedPolygon {
    kind: &'static str,
    color: ColorSpec,
    params: ParamMap,
    front: Vec<(i32, i32)>,
    back: Vec<(i32, i32)>,
    bbox: BBox,
    side_brightness: f64,
}

impl ExtrudedPolygon {
    pub(crate) fn new(
        kind: &'static str,
        color: ColorSpec,
        params: &ParamMap,
        front: Vec<(i32, i32)>,
        offset: f64,
        rotation: f64,
        side_brightness: f64,
    ) -> Self {
        let back = extrude(&front, offset, EXTRUSION_BASE_ANGLE + rotation);
        let bbox = BBox::of_vertices(&front).merge(&BBox::of_vertices(&back));
        Self {
            kind,
            color,
            params: params.clone(),
            front,
            back,
            bbox,
            side_brightness,
        }
    }
}

impl PlacedShape for ExtrudedPolygon {
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn bounding_box(&self) -> BBox {
        self.bbox
    }

    fn record(&self) -> DrawingRecord {
        DrawingRecord {
            shape_kind: self.kind.to_string(),
            color: self.color.clone(),
            params: self.params.clone(),
            bbox: self.bbox.to_array(),
        }
    }

    fn render(&self, canvas: &mut Canvas, style: &RenderStyle) {
        let fill = self.color.to_rgb().unwrap_or(color::FALLBACK_GREY);
        let side = Rgb(color::adjust_brightness(fill, self.side_brightness));
        let edge = Rgb(color::contrasting_edge_line(fill));
        // Back face first, then every connecting quad, then the front face
        // on top.
        canvas.fill_polygon(&self.back, side);
        for i in 0..self.front.len() {
            canvas.fill_polygon(&side_quad(&self.front, &self.back, i), side);
        }
        canvas.fill_polygon(&self.front, Rgb(fill));
        canvas.stroke_polygon(&self.front, edge, style.outline_width);
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        point_in_polygon(px, py, &self.front)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete_and_unique() {
        let descs = descriptors();
        assert_eq!(descs.len(), 10);
        let mut names: Vec<&str> = descs.iter().map(|d| d.kind()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
        assert!(names.contains(&"cube"));
        assert!(names.contains(&"torus"));
    }

    #[test]
    fn test_extrude_offsets_all_vertices_equally() {
        let front = vec![(0, 0), (10, 0), (10, 10)];
        let back = extrude(&front, 10.0, 0.0);
        assert_eq!(back, vec![(10, 0), (20, 0), (20, 10)]);
        let back_up = extrude(&front, 10.0, -std::f64::consts::FRAC_PI_2);
        assert_eq!(back_up, vec![(0, -10), (10, -10), (10, 0)]);
    }

    #[test]
    fn test_side_quad_wraps_around() {
        let front = vec![(0, 0), (10, 0), (5, 10)];
        let back = extrude(&front, 4.0, 0.0);
        let q = side_quad(&front, &back, 2);
        assert_eq!(q, [(5, 10), (0, 0), (4, 0), (9, 10)]);
    }
}
