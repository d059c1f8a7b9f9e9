//! Sphere
//!
//! Geometrically a circle; the 3D reading comes from a radial gradient with
//! an off-center highlight. Clickable policy: the full disc.

use geometry::{point_in_circle, BBox};
use rand::RngCore;
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::ShapeResult;
use crate::record::{require_i32, require_positive, DrawingRecord, ParamMap};

pub struct SphereDescriptor;

const HIGHLIGHT_BRIGHTNESS: f64 = 1.5;
const RIM_BRIGHTNESS: f64 = 0.6;
const SHADE_STEPS: usize = 48;

impl ShapeDescriptor for SphereDescriptor {
    fn kind(&self) -> &'static str {
        "sphere"
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::None
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let radius = sample_primary(ctx, rng, 1);
        let mut params = ParamMap::new();
        params.insert("radius".to_string(), radius.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx")?;
        let cy = require_i32(params, kind, "cy")?;
        let radius = require_positive(params, kind, "radius")?;
        Ok(Box::new(PlacedSphere {
            color,
            params: params.clone(),
            cx,
            cy,
            radius,
        }))
    }
}

struct PlacedSphere {
    color: ColorSpec,
    params: ParamMap,
    cx: i32,
    cy: i32,
    radius: i32,
}

impl PlacedShape for PlacedSphere {
    fn kind(&self) -> &'static str {
        "sphere"
    }

    fn bounding_box(&self) -> BBox {
        let r = f64::from(self.radius);
        BBox::new(
            f64::from(self.cx) - r,
            f64::from(self.cy) - r,
            f64::from(self.cx) + r,
            f64::from(self.cy) + r,
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

    fn render(&self, canvas: &mut Canvas, _style: &RenderStyle) {
        let fill = self.color.to_rgb().unwrap_or(color::FALLBACK_GREY);
        let r = f64::from(self.radius);
        // Highlight sits up-left of center; shade by distance from it.
        let hx = f64::from(self.cx) - r * 0.35;
        let hy = f64::from(self.cy) - r * 0.35;
        let max_dist = r * 1.4;

        // Brightness lookup avoids an HLS conversion per pixel.
        let shades: Vec<Rgb<u8>> = (0..=SHADE_STEPS)
            .map(|i| {
                let t = i as f64 / SHADE_STEPS as f64;
                let factor = HIGHLIGHT_BRIGHTNESS + (RIM_BRIGHTNESS - HIGHLIGHT_BRIGHTNESS) * t;
                Rgb(color::adjust_brightness(fill, factor))
            })
            .collect();

        let (cx, cy, radius) = (self.cx, self.cy, self.radius);
        let bb = self.bounding_box();
        canvas.fill_shaded(
            (
                bb.min_x as i32,
                bb.min_y as i32,
                bb.max_x as i32,
                bb.max_y as i32,
            ),
            |x, y| point_in_circle(x, y, cx, cy, f64::from(radius)),
            |x, y| {
                let dx = f64::from(x) - hx;
                let dy = f64::from(y) - hy;
                let t = ((dx * dx + dy * dy).sqrt() / max_dist).clamp(0.0, 1.0);
                shades[(t * SHADE_STEPS as f64).round() as usize]
            },
        );
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        point_in_circle(px, py, self.cx, self.cy, f64::from(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParamValue;

    fn make_sphere() -> Box<dyn PlacedShape> {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("radius".to_string(), 40.into());
        SphereDescriptor
            .construct(ColorSpec::named("crimson"), &params)
            .unwrap()
    }

    #[test]
    fn test_disc_containment() {
        let s = make_sphere();
        assert!(s.contains(100, 100));
        assert!(s.contains(139, 100));
        assert!(!s.contains(141, 100));
        assert!(!s.contains(129, 129));
    }

    #[test]
    fn test_render_shades_darker_toward_rim() {
        let mut canvas = Canvas::new(200, 200, Rgb([255, 255, 255]));
        let s = make_sphere();
        s.render(
            &mut canvas,
            &RenderStyle {
                outline_width: 1,
                background: Rgb([255, 255, 255]),
            },
        );
        let near_highlight = canvas.pixel(90, 90).unwrap();
        let near_rim = canvas.pixel(125, 125).unwrap();
        let sum = |p: Rgb<u8>| p.0.iter().map(|&c| u32::from(c)).sum::<u32>();
        assert!(sum(near_highlight) > sum(near_rim));
    }
}
