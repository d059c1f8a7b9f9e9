//! Regular hexagon

use geometry::regular_polygon_vertices;
use rand::RngCore;

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::ShapeResult;
use crate::record::{require_positive, ParamMap};

pub struct HexagonDescriptor;

impl ShapeDescriptor for HexagonDescriptor {
    fn kind(&self) -> &'static str {
        "hexagon"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        // A hexagon below ~9 px circumradius rasterizes to a blob.
        let radius = sample_primary(ctx, rng, 9);
        let mut params = ParamMap::new();
        params.insert("radius".to_string(), radius.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let radius = require_positive(params, self.kind(), "radius")?;
        let centered = regular_polygon_vertices(f64::from(radius), 6, 0.0);
        FlatPolygon::build(self.kind(), color, params, &centered)
    }
}
