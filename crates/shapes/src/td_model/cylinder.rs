//! Cylinder
//!
//! Anchored on the TOP ellipse center (`cx_top` / `cy_top`); the body drops
//! `height` pixels below it. Clickable policy: top ellipse, bottom ellipse
//! and the side rectangle between them.

use geometry::{point_in_ellipse, point_in_polygon, BBox};
use rand::{Rng, RngCore};
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::ShapeResult;
use crate::record::{optional_f64, require_i32, require_positive, DrawingRecord, ParamMap};

pub struct CylinderDescriptor;

const TOP_BRIGHTNESS: f64 = 1.3;
const SIDE_BRIGHTNESS_TOP: f64 = 0.9;
const SIDE_BRIGHTNESS_BOTTOM: f64 = 0.5;

impl ShapeDescriptor for CylinderDescriptor {
    fn kind(&self) -> &'static str {
        "cylinder"
    }

    fn center_keys(&self) -> (&'static str, &'static str) {
        ("cx_top", "cy_top")
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::None
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let primary = sample_primary(ctx, rng, 6);
        let radius = (primary / 2).max(3);
        // Height is its own draw from the primary range so the body never
        // outgrows the configured size envelope.
        let height = sample_primary(ctx, rng, 4);
        let perspective = rng.gen_range(0.3..0.5);
        let mut params = ParamMap::new();
        params.insert("radius".to_string(), radius.into());
        params.insert("height".to_string(), height.into());
        params.insert("perspective_factor_ellipse".to_string(), perspective.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx_top")?;
        let cy = require_i32(params, kind, "cy_top")?;
        let radius = require_positive(params, kind, "radius")?;
        let height = require_positive(params, kind, "height")?;
        let perspective = optional_f64(params, "perspective_factor_ellipse", 0.4);
        let ry = (f64::from(radius) * perspective).max(1.0);
        Ok(Box::new(PlacedCylinder {
            color,
            params: params.clone(),
            cx,
            cy,
            rx: radius,
            ry,
            height,
        }))
    }
}

struct PlacedCylinder {
    color: ColorSpec,
    params: ParamMap,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: f64,
    height: i32,
}

impl PlacedCylinder {
    fn bottom_cy(&self) -> i32 {
        self.cy + self.height
    }

    fn side_rect(&self) -> [(i32, i32); 4] {
        [
            (self.cx - self.rx, self.cy),
            (self.cx + self.rx, self.cy),
            (self.cx + self.rx, self.bottom_cy()),
            (self.cx - self.rx, self.bottom_cy()),
        ]
    }
}

impl PlacedShape for PlacedCylinder {
    fn kind(&self) -> &'static str {
        "cylinder"
    }

    fn bounding_box(&self) -> BBox {
        BBox::new(
            f64::from(self.cx - self.rx),
            f64::from(self.cy) - self.ry,
            f64::from(self.cx + self.rx),
            f64::from(self.bottom_cy()) + self.ry,
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

        // Bottom cap, then the vertically shaded body, then the top cap.
        canvas.fill_ellipse(
            self.cx,
            self.bottom_cy(),
            self.rx,
            ry,
            Rgb(color::adjust_brightness(fill, SIDE_BRIGHTNESS_BOTTOM)),
        );

        let rows: Vec<Rgb<u8>> = (0..=self.height)
            .map(|i| {
                let t = f64::from(i) / f64::from(self.height.max(1));
                let factor =
                    SIDE_BRIGHTNESS_TOP + (SIDE_BRIGHTNESS_BOTTOM - SIDE_BRIGHTNESS_TOP) * t;
                Rgb(color::adjust_brightness(fill, factor))
            })
            .collect();
        let (cx, cy, rx, bottom) = (self.cx, self.cy, self.rx, self.bottom_cy());
        canvas.fill_shaded(
            (cx - rx, cy, cx + rx, bottom),
            |_, _| true,
            |_, y| rows[(y - cy).clamp(0, bottom - cy) as usize],
        );

        canvas.fill_ellipse(
            self.cx,
            self.cy,
            self.rx,
            ry,
            Rgb(color::adjust_brightness(fill, TOP_BRIGHTNESS)),
        );

        canvas.stroke_ellipse(self.cx, self.cy, self.rx, ry, edge, style.outline_width);
        canvas.stroke_ellipse(self.cx, self.bottom_cy(), self.rx, ry, edge, style.outline_width);
        canvas.line(
            (self.cx - self.rx, self.cy),
            (self.cx - self.rx, self.bottom_cy()),
            edge,
            style.outline_width,
        );
        canvas.line(
            (self.cx + self.rx, self.cy),
            (self.cx + self.rx, self.bottom_cy()),
            edge,
            style.outline_width,
        );
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        let rx = f64::from(self.rx);
        point_in_ellipse(px, py, self.cx, self.cy, rx, self.ry)
            || point_in_ellipse(px, py, self.cx, self.bottom_cy(), rx, self.ry)
            || point_in_polygon(px, py, &self.side_rect())
    }
}
