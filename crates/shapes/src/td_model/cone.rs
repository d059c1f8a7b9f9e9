//! Cone
//!
//! Anchored on the BASE ellipse center (`cx_base` / `cy_base`); the apex sits
//! `height` pixels above it. Clickable policy: the silhouette triangle plus
//! the part of the base ellipse at or below the apex.

use geometry::{point_in_ellipse, point_in_polygon, BBox};
use rand::{Rng, RngCore};
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::ShapeResult;
use crate::record::{optional_f64, require_i32, require_positive, DrawingRecord, ParamMap};

pub struct ConeDescriptor;

const BASE_BRIGHTNESS: f64 = 0.8;
const SIDE_BRIGHTNESS_LEFT: f64 = 1.1;
const SIDE_BRIGHTNESS_RIGHT: f64 = 0.7;

impl ShapeDescriptor for ConeDescriptor {
    fn kind(&self) -> &'static str {
        "cone"
    }

    fn center_keys(&self) -> (&'static str, &'static str) {
        ("cx_base", "cy_base")
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::None
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let primary = sample_primary(ctx, rng, 6);
        let base_radius = (primary / 2).max(3);
        // Height is its own draw from the primary range so the cone never
        // outgrows the configured size envelope.
        let height = sample_primary(ctx, rng, 4);
        let perspective = rng.gen_range(0.3..0.5);
        let mut params = ParamMap::new();
        params.insert("base_radius".to_string(), base_radius.into());
        params.insert("height".to_string(), height.into());
        params.insert("perspective_factor_base".to_string(), perspective.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx_base")?;
        let cy = require_i32(params, kind, "cy_base")?;
        let base_radius = require_positive(params, kind, "base_radius")?;
        let height = require_positive(params, kind, "height")?;
        let perspective = optional_f64(params, "perspective_factor_base", 0.4);
        let ry = (f64::from(base_radius) * perspective).max(1.0);
        Ok(Box::new(PlacedCone {
            color,
            params: params.clone(),
            cx,
            cy,
            rx: base_radius,
            ry,
            height,
        }))
    }
}

struct PlacedCone {
    color: ColorSpec,
    params: ParamMap,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: f64,
    height: i32,
}

impl PlacedCone {
    fn apex(&self) -> (i32, i32) {
        (self.cx, self.cy - self.height)
    }

    fn silhouette(&self) -> [(i32, i32); 3] {
        [
            self.apex(),
            (self.cx - self.rx, self.cy),
            (self.cx + self.rx, self.cy),
        ]
    }
}

impl PlacedShape for PlacedCone {
    fn kind(&self) -> &'static str {
        "cone"
    }

    fn bounding_box(&self) -> BBox {
        BBox::new(
            f64::from(self.cx - self.rx),
            f64::from(self.apex().1),
            f64::from(self.cx + self.rx),
            f64::from(self.cy) + self.ry,
        )
    }

    fn record(&self) -> DrawingRecord {
        DrawingRecord {
            shape_kind: self.kind().to_string(),
            color: self.color.clone(),
            params: self.params.clone(),
            bbox: self.bounding_box().to_array(),
        }
    }

    fn render(&self, canvas: &mut Canvas, style: &RenderStyle) {
        let fill = self.color.to_rgb().unwrap_or(color::FALLBACK_GREY);
        let edge = Rgb(color::contrasting_edge_line(fill));
        let ry = self.ry.round() as i32;

        canvas.fill_ellipse(
            self.cx,
            self.cy,
            self.rx,
            ry,
            Rgb(color::adjust_brightness(fill, BASE_BRIGHTNESS)),
        );

        // Horizontal gradient across the flank, lit from the left.
        let width = self.rx * 2;
        let cols: Vec<Rgb<u8>> = (0..=width)
            .map(|i| {
                let t = f64::from(i) / f64::from(width.max(1));
                let factor =
                    SIDE_BRIGHTNESS_LEFT + (SIDE_BRIGHTNESS_RIGHT - SIDE_BRIGHTNESS_LEFT) * t;
                Rgb(color::adjust_brightness(fill, factor))
            })
            .collect();
        let tri = self.silhouette();
        let left = self.cx - self.rx;
        let bb = self.bounding_box();
        canvas.fill_shaded(
            (bb.min_x as i32, bb.min_y as i32, bb.max_x as i32, self.cy),
            |x, y| point_in_polygon(x, y, &tri),
            |x, _| cols[(x - left).clamp(0, width) as usize],
        );

        canvas.stroke_ellipse(self.cx, self.cy, self.rx, ry, edge, style.outline_width);
        canvas.line(self.apex(), (self.cx - self.rx, self.cy), edge, style.outline_width);
        canvas.line(self.apex(), (self.cx + self.rx, self.cy), edge, style.outline_width);
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        if point_in_polygon(px, py, &self.silhouette()) {
            return true;
        }
        py >= self.apex().1
            && point_in_ellipse(px, py, self.cx, self.cy, f64::from(self.rx), self.ry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParamValue;

    fn make_cone() -> Box<dyn PlacedShape> {
        let mut params = ParamMap::new();
        params.insert("cx_base".to_string(), 150.into());
        params.insert("cy_base".to_string(), 200.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("base_radius".to_string(), 50.into());
        params.insert("height".to_string(), 100.into());
        params.insert(
            "perspective_factor_base".to_string(),
            ParamValue::Number(0.4),
        );
        ConeDescriptor
            .construct(ColorSpec::named("darkorchid"), &params)
            .unwrap()
    }

    #[test]
    fn test_triangle_and_base_containment() {
        let c = make_cone();
        assert!(c.contains(150, 105)); // just under the apex
        assert!(c.contains(150, 180)); // mid flank
        assert!(c.contains(150, 218)); // lower bulge of the base ellipse
        assert!(!c.contains(150, 95)); // above the apex
        assert!(!c.contains(185, 120)); // right of the flank, above the base
        assert!(!c.contains(150, 221)); // below the base ellipse
    }

    #[test]
    fn test_bbox() {
        let c = make_cone();
        assert_eq!(c.bounding_box().to_array(), [100.0, 100.0, 200.0, 220.0]);
    }

    #[test]
    fn test_size_params_stay_in_envelope() {
        use crate::base_model::test_support::{make_ctx, make_rng};
        use crate::record::require_f64;

        let ctx = make_ctx();
        let mut rng = make_rng();
        for _ in 0..50 {
            let p = ConeDescriptor.generate_size_params(&ctx, &mut rng);
            let radius = require_f64(&p, "cone", "base_radius").unwrap();
            let height = require_f64(&p, "cone", "height").unwrap();
            assert!(radius <= f64::from(ctx.max_primary) / 2.0);
            assert!(height >= f64::from(ctx.min_primary));
            assert!(height <= f64::from(ctx.max_primary));
        }
    }
}
