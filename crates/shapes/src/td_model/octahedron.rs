//! Octahedron
//!
//! The representative projected polyhedron: six canonical vertices on the
//! local axes, tilted about X, yawed about Y, orthographically projected
//! with the depth compressed into the screen Y. Its eight triangular faces
//! sort by average transformed depth and render farthest-first with
//! per-face brightness. Clickable policy: every face, front and back alike;
//! together they cover the projected silhouette.

use geometry::{face_depth_key, point_in_polygon, project_vertex, tilt_yaw_rotate, BBox, Vec3};
use rand::RngCore;
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::ShapeResult;
use crate::record::{optional_f64, require_f64, require_i32, require_positive, DrawingRecord, ParamMap};

pub struct OctahedronDescriptor;

const PERSPECTIVE_FACTOR: f64 = 0.4;
/// Face shading from farthest to nearest.
const FACE_BRIGHTNESS: [f64; 8] = [0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.15, 1.3];

/// Vertex indices of the eight faces: the up apex (0) and the down apex (1)
/// each join the four equatorial edges.
const FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 4],
    [1, 4, 3],
    [1, 3, 5],
    [1, 5, 2],
];

impl ShapeDescriptor for OctahedronDescriptor {
    fn kind(&self) -> &'static str {
        "octahedron"
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::None
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let size = sample_primary(ctx, rng, 4);
        let mut params = ParamMap::new();
        params.insert("size".to_string(), size.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx")?;
        let cy = require_i32(params, kind, "cy")?;
        let rotation = require_f64(params, kind, "rotation_angle_rad")?;
        let size = f64::from(require_positive(params, kind, "size")?);
        let tilt = optional_f64(params, "tilt_angle_rad", 0.0);

        let canonical = [
            Vec3::new(0.0, -size, 0.0), // up apex (screen Y grows downward)
            Vec3::new(0.0, size, 0.0),  // down apex
            Vec3::new(size, 0.0, 0.0),
            Vec3::new(-size, 0.0, 0.0),
            Vec3::new(0.0, 0.0, size),
            Vec3::new(0.0, 0.0, -size),
        ];
        let rotated: Vec<Vec3> = canonical
            .iter()
            .map(|&v| tilt_yaw_rotate(v, tilt, rotation))
            .collect();
        let projected: Vec<(i32, i32)> = rotated
            .iter()
            .map(|&v| project_vertex(v, cx, cy, PERSPECTIVE_FACTOR))
            .collect();

        // Triangles paired with their depth keys, sorted farthest-first.
        let mut faces: Vec<(f64, [(i32, i32); 3])> = FACES
            .iter()
            .map(|idx| {
                let tri3d = [rotated[idx[0]], rotated[idx[1]], rotated[idx[2]]];
                let tri2d = [projected[idx[0]], projected[idx[1]], projected[idx[2]]];
                (face_depth_key(&tri3d), tri2d)
            })
            .collect();
        faces.sort_by(|a, b| a.0.total_cmp(&b.0));

        let bbox = BBox::of_vertices(&projected);

        Ok(Box::new(PlacedOctahedron {
            color,
            params: params.clone(),
            faces,
            bbox,
        }))
    }
}

struct PlacedOctahedron {
    color: ColorSpec,
    params: ParamMap,
    /// (depth key, projected triangle), ascending depth.
    faces: Vec<(f64, [(i32, i32); 3])>,
    bbox: BBox,
}

impl PlacedShape for PlacedOctahedron {
    fn kind(&self) -> &'static str {
        "octahedron"
    }

    fn bounding_box(&self) -> BBox {
        self.bbox
    }

    fn record(&self) -> DrawingRecord {
        DrawingRecord {
            shape_kind: self.kind().to_string(),
            color: self.color.clone(),
            params: self.params.clone(),
            bbox: self.bbox.to_array(),
        }
    }

    fn render(&self, canvas: &mut Canvas, style: &RenderStyle) {
        let fill = self.color.to_rgb().unwrap_or(color::FALLBACK_GREY);
        let edge = Rgb(color::contrasting_edge_line(fill));
        for (i, (_, tri)) in self.faces.iter().enumerate() {
            let factor = FACE_BRIGHTNESS[i.min(FACE_BRIGHTNESS.len() - 1)];
            canvas.fill_polygon(tri, Rgb(color::adjust_brightness(fill, factor)));
            canvas.stroke_polygon(tri, edge, style.outline_width);
        }
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        self.faces
            .iter()
            .any(|(_, tri)| point_in_polygon(px, py, tri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParamValue;

    fn make_octahedron(tilt: f64) -> Box<dyn PlacedShape> {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 200.into());
        params.insert("cy".to_string(), 200.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("size".to_string(), 60.into());
        params.insert("tilt_angle_rad".to_string(), ParamValue::Number(tilt));
        OctahedronDescriptor
            .construct(ColorSpec::named("orangered"), &params)
            .unwrap()
    }

    #[test]
    fn test_silhouette_containment_untilted() {
        let o = make_octahedron(0.0);
        // The projected silhouette is the diamond spanned by the four
        // axis-aligned extremes.
        assert!(o.contains(200, 200));
        assert!(o.contains(202, 150)); // toward the up apex
        assert!(o.contains(255, 200)); // right apex
        assert!(!o.contains(255, 145)); // diamond excludes the corner
        assert!(!o.contains(270, 200));
    }

    #[test]
    fn test_bbox_spans_apexes() {
        let o = make_octahedron(0.0);
        let bb = o.bounding_box();
        assert_eq!(bb.min_x, 140.0);
        assert_eq!(bb.max_x, 260.0);
        // Depth-displaced z vertices stay within the apex extremes.
        assert_eq!(bb.min_y, 140.0);
        assert_eq!(bb.max_y, 260.0);
    }

    #[test]
    fn test_tilt_changes_geometry_deterministically() {
        let a = make_octahedron(0.4);
        let b = make_octahedron(0.4);
        let c = make_octahedron(0.0);
        let mut diverged = false;
        for px in (140..=260).step_by(4) {
            for py in (140..=260).step_by(4) {
                assert_eq!(a.contains(px, py), b.contains(px, py));
                if a.contains(px, py) != c.contains(px, py) {
                    diverged = true;
                }
            }
        }
        assert!(diverged, "tilt had no effect on the silhouette");
    }
}
