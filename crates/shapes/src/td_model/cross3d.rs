//! Extruded cross
//!
//! The flat 12-vertex cross given visual depth via a short extrusion.
//! Clickable policy: front face only (see `ExtrudedPolygon`).

use geometry::rotate_polygon_vertices;
use rand::{Rng, RngCore};

use crate::base_model::cross::cross_vertices;
use crate::color::ColorSpec;
use crate::descriptor::{
    sample_primary, PlacedShape, RotationPolicy, ShapeDescriptor, SizeContext,
};
use crate::error::{ShapeError, ShapeResult};
use crate::record::{optional_f64, require_f64, require_i32, require_positive, ParamMap};
use crate::td_model::ExtrudedPolygon;

pub struct Cross3dDescriptor;

const SIDE_BRIGHTNESS: f64 = 0.75;

impl ShapeDescriptor for Cross3dDescriptor {
    fn kind(&self) -> &'static str {
        "cross_3d"
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::QuantizedTilt
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let arm_length = sample_primary(ctx, rng, 3);
        let mut arm_thickness = ((f64::from(arm_length) * rng.gen_range(0.25..0.4)) as i32).max(1);
        if arm_thickness * 2 >= arm_length {
            arm_thickness = (arm_length / 3).max(1);
        }
        let depth_factor = rng.gen_range(0.25..0.4);
        let mut params = ParamMap::new();
        params.insert("arm_length".to_string(), arm_length.into());
        params.insert("arm_thickness".to_string(), arm_thickness.into());
        params.insert("depth_factor".to_string(), depth_factor.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let cx = require_i32(params, kind, "cx")?;
        let cy = require_i32(params, kind, "cy")?;
        let rotation = require_f64(params, kind, "rotation_angle_rad")?;
        let arm_length = require_positive(params, kind, "arm_length")?;
        let arm_thickness = require_positive(params, kind, "arm_thickness")?;
        if arm_thickness >= arm_length {
            return Err(ShapeError::InvalidParam {
                kind: kind.to_string(),
                param: "arm_thickness".to_string(),
                reason: format!(
                    "thickness {} must be below arm length {}",
                    arm_thickness, arm_length
                ),
            });
        }
        let depth_factor = optional_f64(params, "depth_factor", 0.3);

        let centered = cross_vertices(f64::from(arm_length), f64::from(arm_thickness));
        let front = rotate_polygon_vertices(cx, cy, &centered, rotation);
        let offset = f64::from(arm_thickness) * depth_factor;
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
    fn test_front_face_only_clickable() {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("arm_length".to_string(), 60.into());
        params.insert("arm_thickness".to_string(), 20.into());
        params.insert("depth_factor".to_string(), ParamValue::Number(0.3));
        let c = Cross3dDescriptor
            .construct(ColorSpec::named("crimson"), &params)
            .unwrap();
        assert!(c.contains(100, 100));
        assert!(c.contains(100, 75));
        // Notch region: visually next to the extrusion but not on the front
        // face, so it does not count.
        assert!(!c.contains(120, 80));
        // Bounding box still covers the extruded back face.
        let bb = c.bounding_box();
        assert!(bb.max_x >= 130.0);
        assert!(bb.min_y <= -30.0 + 100.0);
    }
}
