//! Cube and cuboid: extruded quadrilateral solids
//!
//! Both kinds share `BoxSolid`: a rotated front rectangle extruded along the
//! depth direction, with a lightened top face and a darkened right side face.
//! Clickable policy: front, top and side faces all accept clicks.

use geometry::{point_in_polygon, rotate_polygon_vertices, BBox};
use rand::{Rng, RngCore};
use raster::{Canvas, Rgb};

use crate::base_model::square::square_vertices;
use crate::color::{self, ColorSpec};
use crate::descriptor::{
    sample_primary, PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::ShapeResult;
use crate::record::{optional_f64, require_f64, require_i32, require_positive, DrawingRecord, ParamMap};
use crate::td_model::{extrude, EXTRUSION_BASE_ANGLE};

pub struct CubeDescriptor;
pub struct CuboidDescriptor;

const CUBE_TOP_BRIGHTNESS: f64 = 1.45;
const CUBE_SIDE_BRIGHTNESS: f64 = 0.7;
const CUBOID_TOP_BRIGHTNESS: f64 = 1.4;
const CUBOID_SIDE_BRIGHTNESS: f64 = 0.75;

impl ShapeDescriptor for CubeDescriptor {
    fn kind(&self) -> &'static str {
        "cube"
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::QuantizedTilt
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let side = sample_primary(ctx, rng, 2);
        let depth_factor = rng.gen_range(0.4..0.6);
        let mut params = ParamMap::new();
        params.insert("side".to_string(), side.into());
        params.insert("depth_factor".to_string(), depth_factor.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let side = f64::from(require_positive(params, kind, "side")?);
        let depth_factor = optional_f64(params, "depth_factor", 0.5);
        BoxSolid::build(
            kind,
            color,
            params,
            side,
            side,
            side * depth_factor,
            CUBE_TOP_BRIGHTNESS,
            CUBE_SIDE_BRIGHTNESS,
        )
    }
}

impl ShapeDescriptor for CuboidDescriptor {
    fn kind(&self) -> &'static str {
        "cuboid"
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::QuantizedTilt
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let width = sample_primary(ctx, rng, 2);
        let height = ((f64::from(width) * rng.gen_range(0.5..0.8)) as i32).max(2);
        let depth = ((f64::from(width) * rng.gen_range(0.3..0.6)) as i32).max(5);
        let depth_factor_visual = rng.gen_range(0.4..0.6);
        let mut params = ParamMap::new();
        params.insert("width".to_string(), width.into());
        params.insert("height".to_string(), height.into());
        params.insert("depth".to_string(), depth.into());
        params.insert("depth_factor_visual".to_string(), depth_factor_visual.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let width = f64::from(require_positive(params, kind, "width")?);
        let height = f64::from(require_positive(params, kind, "height")?);
        let depth = f64::from(require_positive(params, kind, "depth")?);
        let dfv = optional_f64(params, "depth_factor_visual", 0.5);
        BoxSolid::build(
            kind,
            color,
            params,
            width,
            height,
            depth * dfv,
            CUBOID_TOP_BRIGHTNESS,
            CUBOID_SIDE_BRIGHTNESS,
        )
    }
}

/// A placed box: front quad, back quad, derived top and right-side quads.
struct BoxSolid {
    kind: &'static str,
    color: ColorSpec,
    params: ParamMap,
    front: Vec<(i32, i32)>,
    top: [(i32, i32); 4],
    side: [(i32, i32); 4],
    bbox: BBox,
    top_brightness: f64,
    side_brightness: f64,
}

impl BoxSolid {
    #[allow(clippy::too_many_arguments)]
    fn build(
        kind: &'static str,
        color: ColorSpec,
        params: &ParamMap,
        width: f64,
        height: f64,
        depth_offset: f64,
        top_brightness: f64,
        side_brightness: f64,
    ) -> ShapeResult<Box<dyn PlacedShape>> {
        let cx = require_i32(params, kind, "cx")?;
        let cy = require_i32(params, kind, "cy")?;
        let rotation = require_f64(params, kind, "rotation_angle_rad")?;

        let centered: Vec<(f64, f64)> = if (width - height).abs() < f64::EPSILON {
            square_vertices(width)
        } else {
            vec![
                (-width / 2.0, -height / 2.0),
                (width / 2.0, -height / 2.0),
                (width / 2.0, height / 2.0),
                (-width / 2.0, height / 2.0),
            ]
        };
        // front[0] = top-left, [1] = top-right, [2] = bottom-right,
        // [3] = bottom-left, before the small tilt.
        let front = rotate_polygon_vertices(cx, cy, &centered, rotation);
        let back = extrude(&front, depth_offset, EXTRUSION_BASE_ANGLE + rotation);

        let top = [front[0], front[1], back[1], back[0]];
        let side = [front[1], back[1], back[2], front[2]];
        let bbox = BBox::of_vertices(&front).merge(&BBox::of_vertices(&back));

        Ok(Box::new(Self {
            kind,
            color,
            params: params.clone(),
            front,
            top,
            side,
            bbox,
            top_brightness,
            side_brightness,
        }))
    }
}

impl PlacedShape for BoxSolid {
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
        let top = Rgb(color::adjust_brightness(fill, self.top_brightness));
        let side = Rgb(color::adjust_brightness(fill, self.side_brightness));
        let edge = Rgb(color::contrasting_edge_line(fill));
        // Rear faces first so the front face occludes them where they meet.
        canvas.fill_polygon(&self.side, side);
        canvas.fill_polygon(&self.top, top);
        canvas.fill_polygon(&self.front, Rgb(fill));
        canvas.stroke_polygon(&self.top, edge, style.outline_width);
        canvas.stroke_polygon(&self.side, edge, style.outline_width);
        canvas.stroke_polygon(&self.front, edge, style.outline_width);
    }

    fn contains(&self, px: i32, py: i32) -> bool {
        point_in_polygon(px, py, &self.front)
            || point_in_polygon(px, py, &self.top)
            || point_in_polygon(px, py, &self.side)
    }
}
