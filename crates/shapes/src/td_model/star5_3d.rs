//! Extruded five-pointed star
//!
//! Clickable policy: front face only (see `ExtrudedPolygon`).

use geometry::{rotate_polygon_vertices, star_vertices};
use rand::{Rng, RngCore};

use crate::color::ColorSpec;
use crate::descriptor::{
    sample_primary, PlacedShape, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::{ShapeError, ShapeResult};
use crate::record::{optional_f64, require_f64, require_i32, require_positive, ParamMap};
use crate::td_model::ExtrudedPolygon;

const NUM_POINTS: usize = 5;

pub struct Star53dDescriptor;

const SIDE_BRIGHTNESS: f64 = 0.7;

impl ShapeDescriptor for Star53dDescriptor {
    fn kind(&self) -> &'static str {
        "star5_3d"
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::QuantizedTilt
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let outer = sample_primary(ctx, rng, NUM_POINTS as i32 * 3);
        let mut inner = ((f64::from(outer) * rng.gen_range(0.30..0.50)) as i32).max(1);
        if f64::from(inner) >= f64::from(outer) * 0.9 {
            inner = (outer / 2).max(1);
        }
        let depth_factor = rng.gen_range(0.15..0.3);
        let mut params = ParamMap::new();
        params.insert("outer_radius".to_string(), outer.into());
        params.insert("inner_radius".to_string(), inner.into());
        params.insert("depth_factor".to_string(), depth_factor.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx")?;
        let cy = require_i32(params, kind, "cy")?;
        let rotation = require_f64(params, kind, "rotation_angle_rad")?;
        let outer = require_positive(params, kind, "outer_radius")?;
        let inner = require_positive(params, kind, "inner_radius")?;
        if inner >= outer {
            return Err(ShapeError::InvalidParam {
                kind: kind.to_string(),
                param: "inner_radius".to_string(),
                reason: format!("inner radius {} must be below outer {}", inner, outer),
            });
        }
        let depth_factor = optional_f64(params, "depth_factor", 0.2);

        let centered = star_vertices(f64::from(outer), f64::from(inner), NUM_POINTS, 0.0);
        let front = rotate_polygon_vertices(cx, cy, &centered, rotation);
        let offset = f64::from(outer) * depth_factor;
        Ok(Box::new(ExtrudedPolygon::new(
            kind,
            color,
            params,
            front,
            offset,
            rotation,
            SIDE_BRIGHTNESS,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParamValue;

    #[test]
    fn test_star_front_face_containment() {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("outer_radius".to_string(), 50.into());
        params.insert("inner_radius".to_string(), 20.into());
        params.insert("depth_factor".to_string(), ParamValue::Number(0.2));
        let s = Star53dDescriptor
            .construct(ColorSpec::named("gold"), &params)
            .unwrap();
        assert!(s.contains(100, 100));
        assert!(s.contains(100, 55)); // top tip
        assert!(!s.contains(100, 145)); // concave gap between the lower tips
    }

    #[test]
    fn test_construct_rejects_inner_ge_outer() {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 0.into());
        params.insert("cy".to_string(), 0.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("outer_radius".to_string(), 20.into());
        params.insert("inner_radius".to_string(), 25.into());
        assert!(Star53dDescriptor
            .construct(ColorSpec::named("gold"), &params)
            .is_err());
    }
}
