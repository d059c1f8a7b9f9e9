//! Square

use rand::RngCore;

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::ShapeResult;
use crate::record::{require_positive, ParamMap};

pub struct SquareDescriptor;

pub(crate) fn square_vertices(side: f64) -> Vec<(f64, f64)> {
    let h = side / 2.0;
    vec![(-h, -h), (h, -h), (h, h), (-h, h)]
}

impl ShapeDescriptor for SquareDescriptor {
    fn kind(&self) -> &'static str {
        "square"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let side = sample_primary(ctx, rng, 1);
        let mut params = ParamMap::new();
        params.insert("side".to_string(), side.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let side = require_positive(params, self.kind(), "side")?;
        FlatPolygon::build(self.kind(), color, params, &square_vertices(f64::from(side)))
    }
}
