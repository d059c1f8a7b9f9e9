//! Isosceles trapezoid

use rand::{Rng, RngCore};

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::ShapeResult;
use crate::record::{require_positive, ParamMap};

pub struct TrapezoidDescriptor;

impl ShapeDescriptor for TrapezoidDescriptor {
    fn kind(&self) -> &'static str {
        "trapezoid"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let height = sample_primary(ctx, rng, 2);
        let bottom = ((f64::from(height) * rng.gen_range(0.6..1.2)) as i32).max(2);
        let mut top = ((f64::from(bottom) * rng.gen_range(0.2..0.9)) as i32).max(1);
        if top >= bottom {
            top = (bottom - 1).max(1);
        }
        let mut params = ParamMap::new();
        params.insert("height".to_string(), height.into());
        params.insert("bottom_width".to_string(), bottom.into());
        params.insert("top_width".to_string(), top.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let h = f64::from(require_positive(params, kind, "height")?);
        let bw = f64::from(require_positive(params, kind, "bottom_width")?);
        let tw = f64::from(require_positive(params, kind, "top_width")?);
        let centered = vec![
            (-tw / 2.0, -h / 2.0),
            (tw / 2.0, -h / 2.0),
            (bw / 2.0, h / 2.0),
            (-bw / 2.0, h / 2.0),
        ];
        FlatPolygon::build(kind, color, params, &centered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_model::test_support::{make_ctx, make_rng};
    use crate::record::{require_f64, ParamValue};

    #[test]
    fn test_top_always_narrower_than_bottom() {
        let ctx = make_ctx();
        let mut rng = make_rng();
        for _ in 0..50 {
            let p = TrapezoidDescriptor.generate_size_params(&ctx, &mut rng);
            let bottom = require_f64(&p, "trapezoid", "bottom_width").unwrap();
            let top = require_f64(&p, "trapezoid", "top_width").unwrap();
            assert!(top < bottom);
        }
    }

    #[test]
    fn test_slanted_sides() {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("height".to_string(), 40.into());
        params.insert("bottom_width".to_string(), 60.into());
        params.insert("top_width".to_string(), 20.into());
        let t = TrapezoidDescriptor
            .construct(ColorSpec::named("brown"), &params)
            .unwrap();
        assert!(t.contains(100, 100));
        assert!(t.contains(125, 118)); // inside near the wide base
        assert!(!t.contains(125, 85)); // same x near the narrow top is outside
    }
}
