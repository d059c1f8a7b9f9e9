//! Five-pointed star

use geometry::star_vertices;
use rand::{Rng, RngCore};

use crate::base_model::FlatPolygon;
use crate::color::ColorSpec;
use crate::descriptor::{sample_primary, PlacedShape, ShapeDescriptor, SizeContext};
use crate::error::{ShapeError, ShapeResult};
use crate::record::{require_positive, ParamMap};

const NUM_POINTS: usize = 5;

pub struct Star5Descriptor;

impl ShapeDescriptor for Star5Descriptor {
    fn kind(&self) -> &'static str {
        "star5"
    }

    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap {
        let outer = sample_primary(ctx, rng, NUM_POINTS as i32 * 3);
        let mut inner = ((f64::from(outer) * rng.gen_range(0.35..0.60)) as i32).max(1);
        // A near-outer inner radius flattens the star into a decagon.
        if f64::from(inner) >= f64::from(outer) * 0.9 {
            inner = (outer / 2).max(1);
        }
        let mut params = ParamMap::new();
        params.insert("outer_radius".to_string(), outer.into());
        params.insert("inner_radius".to_string(), inner.into());
        params
    }

    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>> {
        let kind = self.kind();
        let outer = require_positive(params, kind, "outer_radius")?;
        let inner = require_positive(params, kind, "inner_radius")?;
        if inner >= outer {
            return Err(ShapeError::InvalidParam {
                kind: kind.to_string(),
                param: "inner_radius".to_string(),
                reason: format!("inner radius {} must be below outer {}", inner, outer),
            });
        }
        let centered = star_vertices(f64::from(outer), f64::from(inner), NUM_POINTS, 0.0);
        FlatPolygon::build(kind, color, params, &centered)
    }
}
