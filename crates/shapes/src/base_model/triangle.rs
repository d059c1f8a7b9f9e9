//! Equilateral triangle

use geometry::regular_polygon_vertices;
use rand::RngCore;

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::ShapeResult;
use crate::record::{require_positive, ParamMap};

pub struct EquilateralTriangleDescriptor;

impl ShapeDescriptor for EquilateralTriangleDescriptor {
    fn kind(&self) -> &'static str {
        "equilateral_triangle"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let side = sample_primary(ctx, rng, 3);
        let mut params = ParamMap::new();
        params.insert("side_length".to_string(), side.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let side = require_positive(params, self.kind(), "side_length")?;
        // Circumradius of an equilateral triangle is side / sqrt(3).
        let circumradius = f64::from(side) / 3f64.sqrt();
        let centered = regular_polygon_vertices(circumradius, 3, 0.0);
        FlatPolygon::build(self.kind(), color, params, &centered)
    }
}
