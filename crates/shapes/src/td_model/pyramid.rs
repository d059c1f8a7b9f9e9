//! Square-base pyramid
//!
//! Anchored on the BASE center: the stored center keys are `cx_base` /
//! `cy_base`, the apex sits `height` pixels above it. The base square is
//! rotated, then squashed vertically by the base depth factor to fake
//! perspective. Clickable policy: base plus all four side faces.

use geometry::{point_in_polygon, BBox};
use rand::{Rng, RngCore};
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::ShapeResult;
use crate::record::{optional_f64, require_f64, require_i32, require_positive, DrawingRecord, ParamMap};

pub struct PyramidDescriptor;

const BASE_BRIGHTNESS: f64 = 0.45;
// Back-to-front face shading, darkest furthest from the light.
const FACE_BRIGHTNESS: [f64; 4] = [0.6, 0.75, 0.95, 1.2];

impl ShapeDescriptor for PyramidDescriptor {
    fn kind(&self) -> &'static str {
        "pyramid"
    }

    fn center_keys(&self) -> (&'static str, &'static str) {
        ("cx_base", "cy_base")
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::None
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let base_side = sample_primary(ctx, rng, 2);
        let height = ((f64::from(base_side) * rng.gen_range(0.7..1.3)) as i32).max(2);
        let depth_factor_base = rng.gen_range(0.45..0.6);
        let mut params = ParamMap::new();
        params.insert("base_side".to_string(), base_side.into());
        params.insert("height".to_string(), height.into());
        params.insert("depth_factor_base".to_string(), depth_factor_base.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx_base")?;
        let cy = require_i32(params, kind, "cy_base")?;
        let rotation = require_f64(params, kind, "rotation_angle_rad")?;
        let base_side = f64::from(require_positive(params, kind, "base_side")?);
        let height = require_positive(params, kind, "height")?;
        let depth_factor = optional_f64(params, "depth_factor_base", 0.5);

        // Rotate the base square in the ground plane, then squash its screen
        // Y by the depth factor. Rounding happens after the squash.
        let h = base_side / 2.0;
        let corners = [(-h, -h), (h, -h), (h, h), (-h, h)];
        let (sin, cos) = rotation.sin_cos();
        let base: Vec<(i32, i32)> = corners
            .iter()
            .map(|&(x, y)| {
                let rx = x * cos - y * sin;
                let ry = (x * sin + y * cos) * depth_factor;
                (cx + rx.round() as i32, cy + ry.round() as i32)
            })
            .collect();
        let apex = (cx, cy - height);

        let mut bbox = BBox::of_vertices(&base);
        bbox = bbox.merge(&BBox::of_vertices(&[apex]));

        Ok(Box::new(PlacedPyramid {
            color,
            params: params.clone(),
            base,
            apex,
            bbox,
        }))
    }
}

struct PlacedPyramid {
    color: ColorSpec,
    params: ParamMap,
    base: Vec<(i32, i32)>,
    apex: (i32, i32),
    bbox: BBox,
}

impl PlacedPyramid {
    fn side_faces(&self) -> Vec<[(i32, i32); 3]> {
        (0..4)
            .map(|i| [self.apex, self.base[i], self.base[(i + 1) % 4]])
            .collect()
    }
}

impl PlacedShape for PlacedPyramid {
    fn kind(&self) -> &'static str {
        "pyramid"
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

        canvas.fill_polygon(&self.base, Rgb(color::adjust_brightness(fill, BASE_BRIGHTNESS)));

        // Sort side faces by the average screen Y of their base edge: edges
        // higher on screen are farther away and render first.
        let mut faces = self.side_faces();
        faces.sort_by(|a, b| {
            let ya = a[1].1 + a[2].1;
            let yb = b[1].1 + b[2].1;
            ya.cmp(&yb)
        });
        for (i, face) in faces.iter().enumerate() {
            let factor = FACE_BRIGHTNESS[i.min(FACE_BRIGHTNESS.len() - 1)];
            canvas.fill_polygon(face, Rgb(color::adjust_brightness(fill, factor)));
        }

        canvas.stroke_polygon(&self.base, edge, style.outline_width);
        for corner in &self.base {
            canvas.line(self.apex, *corner, edge, style.outline_width);
        }
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        if point_in_polygon(px, py, &self.base) {
            return true;
        }
        self.side_faces()
            .iter()
            .any(|f| point_in_polygon(px, py, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParamValue;

    fn make_pyramid() -> Box<dyn PlacedShape> {
        let mut params = ParamMap::new();
        params.insert("cx_base".to_string(), 200.into());
        params.insert("cy_base".to_string(), 250.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("base_side".to_string(), 80.into());
        params.insert("height".to_string(), 90.into());
        params.insert("depth_factor_base".to_string(), ParamValue::Number(0.5));
        PyramidDescriptor
            .construct(ColorSpec::named("gold"), &params)
            .unwrap()
    }

    #[test]
    fn test_silhouette_containment() {
        let p = make_pyramid();
        // Apex and the column below it.
        assert!(p.contains(200, 165));
        assert!(p.contains(200, 220));
        // Base region (squashed square around the base center).
        assert!(p.contains(200, 250));
        assert!(p.contains(235, 250));
        // Outside the silhouette.
        assert!(!p.contains(200, 155));
        assert!(!p.contains(250, 250));
        assert!(!p.contains(235, 180));
    }

    #[test]
    fn test_bbox_spans_apex_to_base() {
        let p = make_pyramid();
        let bb = p.bounding_box();
        assert_eq!(bb.min_y, 160.0); // apex: 250 - 90
        assert_eq!(bb.max_y, 270.0); // base bottom: 250 + 40 * 0.5
        assert_eq!(bb.min_x, 160.0);
        assert_eq!(bb.max_x, 240.0);
    }

    #[test]
    fn test_center_keys_are_base_anchored() {
        let (kx, ky) = PyramidDescriptor.center_keys();
        assert_eq!((kx, ky), ("cx_base", "cy_base"));
    }
}
