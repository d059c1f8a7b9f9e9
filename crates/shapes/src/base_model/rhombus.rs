//! Rhombus (defined by its two diagonals)

use rand::{Rng, RngCore};

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::ShapeResult;
use crate::record::{require_positive, ParamMap};

pub struct RhombusDescriptor;

impl ShapeDescriptor for RhombusDescriptor {
    fn kind(&self) -> &'static str {
        "rhombus"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let d1 = sample_primary(ctx, rng, 2);
        let d2 = ((f64::from(d1) * rng.gen_range(0.5..1.2)) as i32).max(1);
        let mut params = ParamMap::new();
        params.insert("d1".to_string(), d1.into());
        params.insert("d2".to_string(), d2.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let d1 = f64::from(require_positive(params, kind, "d1")?);
        let d2 = f64::from(require_positive(params, kind, "d2")?);
        let centered = vec![
            (0.0, -d2 / 2.0),
            (d1 / 2.0, 0.0),
            (0.0, d2 / 2.0),
            (-d1 / 2.0, 0.0),
        ];
        FlatPolygon::build(kind, color, params, &centered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParamValue;

    #[test]
    fn test_rhombus_excludes_bbox_corners() {
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("d1".to_string(), 60.into());
        params.insert("d2".to_string(), 40.into());
        let r = RhombusDescriptor
            .construct(ColorSpec::named("purple"), &params)
            .unwrap();
        assert!(r.contains(100, 100));
        assert!(r.contains(125, 100));
        // bbox corner lies outside the diamond
        assert!(!r.contains(128, 81));
        assert_eq!(r.bounding_box().to_array(), [70.0, 80.0, 130.0, 120.0]);
    }
}
