//! Torus, viewed face-on
//!
//! Projected as an annulus: outer circle minus the hole circle of radius
//! `outer - tube`. The hole is filled with the canvas background so the ring
//! reads as a solid object. Clickable policy: the annulus; clicks through
//! the hole miss.

use geometry::{point_in_circle, BBox};
use rand::{Rng, RngCore};
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::{ShapeError, ShapeResult};
use crate::record::{require_i32, require_positive, DrawingRecord, ParamMap};

pub struct TorusDescriptor;

const HIGHLIGHT_BRIGHTNESS: f64 = 1.5;
const SHADOW_BRIGHTNESS: f64 = 0.6;
const SHADE_STEPS: usize = 48;

impl ShapeDescriptor for TorusDescriptor {
    fn kind(&self) -> &'static str {
        "torus"
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::None
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let outer = sample_primary(ctx, rng, 6);
        let mut tube = ((f64::from(outer) * rng.gen_range(0.25..0.45)) as i32).max(1);
        if f64::from(tube) >= f64::from(outer) / 1.5 {
            tube = outer / 2;
        }
        // Keep a visible hole.
        if outer - tube < 2 {
            tube = (outer - 2).max(1);
        }
        let mut params = ParamMap::new();
        params.insert("outer_radius".to_string(), outer.into());
        params.insert("tube_radius".to_string(), tube.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx")?;
        let cy = require_i32(params, kind, "cy")?;
        let outer = require_positive(params, kind, "outer_radius")?;
        let tube = require_positive(params, kind, "tube_radius")?;
        if tube >= outer {
            return Err(ShapeError::InvalidParam {
                kind: kind.to_string(),
                param: "tube_radius".to_string(),
                reason: format!("tube radius {} must be below outer {}", tube, outer),
            });
        }
        Ok(Box::new(PlacedTorus {
            color,
            params: params.clone(),
            cx,
            cy,
            outer,
            hole: outer - tube,
        }))
    }
}

struct PlacedTorus {
    color: ColorSpec,
    params: ParamMap,
    cx: i32,
    cy: i32,
    outer: i32,
    hole: i32,
}

impl PlacedShape for PlacedTorus {
    fn kind(&self) -> &'static str {
        "torus"
    }

    fn bounding_box(&self) -> BBox {
        let r = f64::from(self.outer);
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

    fn render(&self, canvas: &mut Canvas, style: &RenderStyle) {
        let fill = self.color.to_rgb().unwrap_or(color::FALLBACK_GREY);
        let edge = Rgb(color::contrasting_edge_line(fill));

        // Ring shading runs light at the top rim to dark at the bottom.
        let shades: Vec<Rgb<u8>> = (0..=SHADE_STEPS)
            .map(|i| {
                let t = i as f64 / SHADE_STEPS as f64;
                let factor = HIGHLIGHT_BRIGHTNESS + (SHADOW_BRIGHTNESS - HIGHLIGHT_BRIGHTNESS) * t;
                Rgb(color::adjust_brightness(fill, factor))
            })
            .collect();
        let (cx, cy, outer, hole) = (self.cx, self.cy, self.outer, self.hole);
        let bb = self.bounding_box();
        let top = bb.min_y;
        let span = f64::from(outer) * 2.0;
        canvas.fill_shaded(
            (
                bb.min_x as i32,
                bb.min_y as i32,
                bb.max_x as i32,
                bb.max_y as i32,
            ),
            |x, y| {
                point_in_circle(x, y, cx, cy, f64::from(outer))
                    && !point_in_circle(x, y, cx, cy, f64::from(hole))
            },
            |_, y| {
                let t = ((f64::from(y) - top) / span).clamp(0.0, 1.0);
                shades[(t * SHADE_STEPS as f64).round() as usize]
            },
        );

        canvas.fill_circle(self.cx, self.cy, self.hole, style.background);
        canvas.stroke_circle(self.cx, self.cy, self.outer, edge, style.outline_width);
        canvas.stroke_circle(self.cx, self.cy, self.hole, edge, style.outline_width);
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        point_in_circle(px, py, self.cx, self.cy, f64::from(self.outer))
            && !point_in_circle(px, py, self.cx, self.cy, f64::from(self.hole))
    }
}
