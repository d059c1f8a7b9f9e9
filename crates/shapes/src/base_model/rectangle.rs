//! Rectangle

use rand::{Rng, RngCore};

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::ShapeResult;
use crate::record::{require_positive, ParamMap};

pub struct RectangleDescriptor;

impl ShapeDescriptor for RectangleDescriptor {
    fn kind(&self) -> &'static str {
        "rectangle"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let width = sample_primary(ctx, rng, 1);
        // Height stays visibly shorter than the width so the kind never
        // degenerates into a square.
        let height = ((f64::from(width) * rng.gen_range(0.4..0.7)) as i32).max(1);
        let mut params = ParamMap::new();
        params.insert("width".to_string(), width.into());
        params.insert("height".to_string(), height.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let w = f64::from(require_positive(params, kind, "width")?);
        let h = f64::from(require_positive(params, kind, "height")?);
        let centered = vec![
            (-w / 2.0, -h / 2.0),
            (w / 2.0, -h / 2.0),
            (w / 2.0, h / 2.0),
            (-w / 2.0, h / 2.0),
        ];
        FlatPolygon::build(kind, color, params, &centered)
    }
}
