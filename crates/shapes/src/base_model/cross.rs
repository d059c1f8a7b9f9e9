//! Greek cross (plus sign), a single 12-vertex polygon

use rand::{Rng, RngCore};

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::{ShapeError, ShapeResult};
use crate::record::{require_positive, ParamMap};

pub struct CrossDescriptor;

/// Origin-centered plus-sign ring, clockwise from the top-left notch.
/// `size` is the full span, `thickness` the arm width.
pub(crate) fn cross_vertices(size: f64, thickness: f64) -> Vec<(f64, f64)> {
    let s = size / 2.0;
    let t = thickness / 2.0;
    vec![
        (-t, -s),
        (t, -s),
        (t, -t),
        (s, -t),
        (s, t),
        (t, t),
        (t, s),
        (-t, s),
        (-t, t),
        (-s, t),
        (-s, -t),
        (-t, -t),
    ]
}

impl ShapeDescriptor for CrossDescriptor {
    fn kind(&self) -> &'static str {
        "cross"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let size = sample_primary(ctx, rng, 3);
        let mut thickness = ((f64::from(size) * rng.gen_range(0.2..0.4)) as i32).max(1);
        // Arms must leave a visible notch on each side.
        if thickness * 2 >= size {
            thickness = (size / 3).max(1);
        }
        let mut params = ParamMap::new();
        params.insert("size".to_string(), size.into());
        params.insert("thickness".to_string(), thickness.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let size = require_positive(params, kind, "size")?;
        let thickness = require_positive(params, kind, "thickness")?;
        if thickness >= size {
            return Err(ShapeError::InvalidParam {
                kind: kind.to_string(),
                param: "thickness".to_string(),
                reason: format!("thickness {} must be below size {}", thickness, size),
            });
        }
        let centered = cross_vertices(f64::from(size), f64::from(thickness));
        FlatPolygon::build(kind, color, params, &centered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_model::test_support::{make_ctx, make_rng};
    use crate::record::{require_f64, ParamValue};

    fn make_cross() -> Box<dyn PlacedShape> {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("size".to_string(), 60.into());
        params.insert("thickness".to_string(), 20.into());
        CrossDescriptor
            .construct(ColorSpec::named("red"), &params)
            .unwrap()
    }

    #[test]
    fn test_notches_are_outside() {
        let c = make_cross();
        assert!(c.contains(100, 100)); // center
        assert!(c.contains(100, 75)); // upper arm
        assert!(c.contains(125, 100)); // right arm
        assert!(!c.contains(120, 80)); // top-right notch
        assert!(!c.contains(80, 120)); // bottom-left notch
    }

    #[test]
    fn test_thickness_correction() {
        let ctx = make_ctx();
        let mut rng = make_rng();
        for _ in 0..50 {
            let p = CrossDescriptor.generate_size_params(&ctx, &mut rng);
            let size = require_f64(&p, "cross", "size").unwrap();
            let thickness = require_f64(&p, "cross", "thickness").unwrap();
            assert!(thickness * 2.0 < size);
        }
    }

    #[test]
    fn test_construct_rejects_fat_arms() {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 0.into());
        params.insert("cy".to_string(), 0.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("size".to_string(), 10.into());
        params.insert("thickness".to_string(), 12.into());
        assert!(CrossDescriptor
            .construct(ColorSpec::named("red"), &params)
            .is_err());
    }
}
