//! Flat shape catalog (`base_model` namespace)
//!
//! Nine 2D kinds. All polygonal kinds share the `FlatPolygon` instance type:
//! origin-centered vertices rotated and translated once at construction,
//! ray-casting containment, filled render with a contrast-derived outline.

pub mod circle;
pub mod cross;
pub mod hexagon;
pub mod palette;
pub mod rectangle;
pub mod rhombus;
pub mod square;
pub mod star5;
pub mod trapezoid;
pub mod triangle;

use std::sync::Arc;

use geometry::{point_in_polygon, rotate_polygon_vertices, BBox};
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{PlacedShape, RenderStyle, ShapeDescriptor};
use crate::error::ShapeResult;
use crate::record::{require_f64, require_i32, DrawingRecord, ParamMap};

/// Namespace name the flat catalog registers under.
pub const NAMESPACE: &str = "base_model";

/// All flat-kind descriptors, in registration order.
pub fn descriptors() -> Vec<Arc<dyn ShapeDescriptor>> {
    vec![
        Arc::new(circle::CircleDescriptor),
        Arc::new(square::SquareDescriptor),
        Arc::new(rectangle::RectangleDescriptor),
        Arc::new(triangle::EquilateralTriangleDescriptor),
        Arc::new(hexagon::HexagonDescriptor),
        Arc::new(rhombus::RhombusDescriptor),
        Arc::new(trapezoid::TrapezoidDescriptor),
        Arc::new(cross::CrossDescriptor),
        Arc::new(star5::Star5Descriptor),
    ]
}

/// A placed flat polygon: the common instance type behind every polygonal
/// flat kind.
pub(crate) struct FlatPolygon {
    kind: &'static str,
    color: ColorSpec,
    params: ParamMap,
    vertices: Vec<(i32, i32)>,
    bbox: BBox,
}

impl FlatPolygon {
    /// Rotates `centered` vertices by the rotation stored in `params`,
    /// translates them to the stored center and caches the result.
    pub(crate) fn build(
        kind: &'static str,
        color: ColorSpec,
        params: &ParamMap,
        centered: &[(f64, f64)],
    ) -> ShapeResult<Box<dyn PlacedShape>> {
        let cx = require_i32(params, kind, "cx")?;
        let cy = require_i32(params, kind, "cy")?;
        let rotation = require_f64(params, kind, "rotation_angle_rad")?;
        let vertices = rotate_polygon_vertices(cx, cy, centered, rotation);
        let bbox = BBox::of_vertices(&vertices);
        Ok(Box::new(Self {
            kind,
            color,
            params: params.clone(),
            vertices,
            bbox,
        }))
    }
}

impl PlacedShape for FlatPolygon {
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
        let outline = color::contrasting_outline(fill);
        canvas.fill_outlined_polygon(
            &self.vertices,
            Rgb(fill),
            Rgb(outline),
            style.outline_width,
        );
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        point_in_polygon(px, py, &self.vertices)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::descriptor::SizeContext;

    pub fn make_ctx() -> SizeContext {
        SizeContext {
            canvas_width: 1200,
            canvas_height: 750,
            min_primary: 90,
            max_primary: 150,
            min_secondary: 45,
            max_secondary: 120,
        }
    }

    pub fn make_rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_complete_and_unique() {
        let descs = descriptors();
        assert_eq!(descs.len(), 9);
        let mut names: Vec<&str> = descs.iter().map(|d| d.kind()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 9);
        assert!(names.contains(&"circle"));
        assert!(names.contains(&"star5"));
    }

    #[test]
    fn test_flat_polygon_round_trip_containment() {
        use crate::record::ParamValue;

        // Construct, serialize, reconstruct; containment must agree on a
        // grid of sample points.
        let desc = square::SquareDescriptor;
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.6));
        params.insert("side".to_string(), 60.into());

        let first = desc.construct(ColorSpec::named("red"), &params).unwrap();
        let record = first.record();
        let second = desc.construct(record.color.clone(), &record.params).unwrap();

        for px in (40..=160).step_by(4) {
            for py in (40..=160).step_by(4) {
                assert_eq!(
                    first.contains(px, py),
                    second.contains(px, py),
                    "divergence at ({}, {})",
                    px,
                    py
                );
            }
        }
    }
}
