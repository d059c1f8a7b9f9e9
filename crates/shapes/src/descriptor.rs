//! The shape descriptor contract
//!
//! A descriptor is the per-kind capability bundle: randomized dimension
//! generation, construction from a parameter map, and metadata the placement
//! engine needs (center key names, rotation policy). Constructed shapes are
//! returned behind the `PlacedShape` trait, which exposes exactly what the
//! generation and verification paths need: a bounding box, a serializable
//! record, rendering, and containment.
//!
//! Construction is deterministic. Every random decision happens in
//! `generate_size_params` or in the placement engine, so reconstructing a
//! shape from its stored record always reproduces the generation-time
//! hit-test geometry.

use geometry::BBox;
use rand::RngCore;
use raster::{Canvas, Rgb};

use crate::color::ColorSpec;
use crate::error::ShapeResult;
use crate::record::{DrawingRecord, ParamMap};

/// Canvas and size bounds handed to `generate_size_params`, all in upscaled
/// pixels.
#[derive(Debug, Clone, Copy)]
pub struct SizeContext {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Range for the kind's primary dimension (radius, side, width).
    pub min_primary: i32,
    pub max_primary: i32,
    /// Range for secondary dimensions (height of a rectangle, inner radius
    /// of a star).
    pub min_secondary: i32,
    pub max_secondary: i32,
}

/// How the placement engine samples a rotation angle for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPolicy {
    /// Rotation is always zero (rotationally symmetric or upright kinds).
    None,
    /// A small tilt of +/- PI divided by a quantized divisor, keeping
    /// extruded solids readable.
    QuantizedTilt,
    /// Uniform over the full circle.
    FullCircle,
}

/// Rendering inputs that are uniform across one generated image.
#[derive(Debug, Clone, Copy)]
pub struct RenderStyle {
    /// Outline stroke width in upscaled pixels.
    pub outline_width: u32,
    /// Canvas background, needed by kinds that punch holes (torus).
    pub background: Rgb<u8>,
}

/// Per-kind capability bundle. Implementations are stateless and shared
/// behind `Arc<dyn ShapeDescriptor>` in the registry.
pub trait ShapeDescriptor: Send + Sync {
    /// The kind name this descriptor registers under.
    fn kind(&self) -> &'static str;

    /// Parameter keys the stored center goes under. Most kinds anchor on
    /// their centroid; some solids anchor on a reference face center.
    fn center_keys(&self) -> (&'static str, &'static str) {
        ("cx", "cy")
    }

    fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::FullCircle
    }

    /// Generates randomized dimension parameters within the context bounds.
    /// Invalid combinations are corrected here, never left to fail in
    /// `construct`.
    fn generate_size_params(&self, ctx: &SizeContext, rng: &mut dyn RngCore) -> ParamMap;

    /// Builds a placed shape from a full parameter map (center, rotation and
    /// dimensions). Fails on missing or out-of-range parameters.
    fn construct(&self, color: ColorSpec, params: &ParamMap) -> ShapeResult<Box<dyn PlacedShape>>;
}

/// A constructed shape instance with derived geometry cached.
pub trait PlacedShape: Send + Sync {
    fn kind(&self) -> &'static str;

    /// Axis-aligned bounding box in upscaled canvas space.
    fn bounding_box(&self) -> BBox;

    /// The serializable snapshot this shape reconstructs from.
    fn record(&self) -> DrawingRecord;

    /// Draws the shape onto the canvas, farthest faces first for multi-face
    /// kinds.
    fn render(&self, canvas: &mut Canvas, style: &RenderStyle);

    /// True if the point lies in any clickable region of the shape.
    fn contains(&self, px: i32, py: i32) -> bool;
}

/// Samples the primary dimension from the context range. A collapsed or
/// inverted range falls back to the minimum, floored at `floor`.
pub(crate) fn sample_primary(ctx: &SizeContext, rng: &mut dyn RngCore, floor: i32) -> i32 {
    use rand::Rng;
    if ctx.max_primary <= ctx.min_primary {
        ctx.min_primary.max(floor)
    } else {
        rng.gen_range(ctx.min_primary..=ctx.max_primary)
    }
}
