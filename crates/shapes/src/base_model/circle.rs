//! Circle

use geometry::{point_in_circle, BBox};
use rand::RngCore;
use raster::{Canvas, Rgb};

use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::ShapeResult;
use crate::record::{require_i32, require_positive, DrawingRecord, ParamMap};

pub struct CircleDescriptor;

impl ShapeDescriptor for CircleDescriptor {
    fn kind(&self) -> &'static str {
        "circle"
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
        Ok(Box::new(PlacedCircle {
            color,
            params: params.clone(),
            cx,
            cy,
            radius,
        }))
    }
}

struct PlacedCircle {
    color: ColorSpec,
    params: ParamMap,
    cx: i32,
    cy: i32,
    radius: i32,
}

impl PlacedShape for PlacedCircle {
    fn kind(&self) -> &'static str {
        "circle"
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

    fn render(&self, canvas: &mut Canvas, style: &RenderStyle) {
        let fill = self.color.to_rgb().unwrap_or(color::FALLBACK_GREY);
        let outline = color::contrasting_outline(fill);
        canvas.fill_circle(self.cx, self.cy, self.radius, Rgb(fill));
        canvas.stroke_circle(self.cx, self.cy, self.radius, Rgb(outline), style.outline_width);
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        point_in_circle(px, py, self.cx, self.cy, f64::from(self.radius))
    }
}
