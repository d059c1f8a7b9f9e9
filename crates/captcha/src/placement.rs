//! Non-overlapping shape placement
//!
//! For each assigned (kind, color) pair the engine retries random sizes,
//! rotations and centers until the candidate's bounding box, inflated by the
//! separation, is disjoint from everything already placed. The attempt
//! budget is split across shrink rounds that scale the size range down, so
//! a crowded canvas degrades to smaller shapes instead of failing. A kind
//! that still does not fit is skipped with a warning; an empty result is a
//! generation error.
//!
//! The returned order is both render order and z-order: verification scans
//! it in reverse so the topmost shape under a click decides.

use std::f64::consts::{PI, TAU};

use geometry::BBox;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use shapes::{ColorSpec, PlacedShape, RotationPolicy, ShapeRegistry};

use crate::config::CaptchaConfig;
use crate::error::{CaptchaError, CaptchaResult};

/// Total placement attempts per shape, across all shrink rounds.
pub(crate) const PLACEMENT_ATTEMPTS: usize = 300;
/// Number of size-reduction rounds the attempts are split across.
pub(crate) const SHRINK_ROUNDS: usize = 4;
/// Size multiplier applied per shrink round.
pub(crate) const SHRINK_RATIO: f64 = 0.9;

/// Divisors for the quantized tilt policy: a tilt of +/- PI/d.
const TILT_DIVISORS: [f64; 6] = [12.0, 16.0, 20.0, 24.0, 28.0, 32.0];

/// Samples a rotation angle under the kind's policy.
pub fn sample_rotation(policy: RotationPolicy, rng: &mut dyn RngCore) -> f64 {
    match policy {
        RotationPolicy::None => 0.0,
        RotationPolicy::QuantizedTilt => {
            let divisor = *TILT_DIVISORS.choose(rng).unwrap_or(&TILT_DIVISORS[0]);
            let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            sign * PI / divisor
        }
        RotationPolicy::FullCircle => rng.gen_range(0.0..TAU),
    }
}

/// Places one shape per (kind, color) assignment onto the upscaled canvas.
pub fn place_shapes(
    registry: &ShapeRegistry,
    config: &CaptchaConfig,
    assignments: &[(String, ColorSpec)],
    rng: &mut dyn RngCore,
) -> CaptchaResult<Vec<Box<dyn PlacedShape>>> {
    let attempts_per_round = (PLACEMENT_ATTEMPTS / SHRINK_ROUNDS).max(1);
    let separation = config.upscaled_separation();
    let width = f64::from(config.upscaled_width());
    let height = f64::from(config.upscaled_height());

    let mut placed: Vec<Box<dyn PlacedShape>> = Vec::with_capacity(assignments.len());
    let mut occupied: Vec<BBox> = Vec::with_capacity(assignments.len());

    'assignments: for (kind, color) in assignments {
        let descriptor = registry.descriptor(&config.namespace, kind)?;
        let (key_x, key_y) = descriptor.center_keys();
        let mut shrink = 1.0;

        for _ in 0..SHRINK_ROUNDS {
            let ctx = config.size_context(shrink);
            for _ in 0..attempts_per_round {
                let mut params = descriptor.generate_size_params(&ctx, rng);
                let rotation = sample_rotation(descriptor.rotation_policy(), rng);
                params.insert("rotation_angle_rad".to_string(), rotation.into());

                // Preview at the origin: its bbox gives the extent around
                // the anchor, which bounds the legal center range.
                params.insert(key_x.to_string(), 0.into());
                params.insert(key_y.to_string(), 0.into());
                let preview = descriptor.construct(color.clone(), &params)?;
                let extent = preview.bounding_box();

                let min_cx = (-extent.min_x + separation).ceil() as i32;
                let max_cx = (width - extent.max_x - separation).floor() as i32;
                let min_cy = (-extent.min_y + separation).ceil() as i32;
                let max_cy = (height - extent.max_y - separation).floor() as i32;
                if min_cx > max_cx || min_cy > max_cy {
                    // Too large for the canvas at this size; retry.
                    continue;
                }

                let cx = rng.gen_range(min_cx..=max_cx);
                let cy = rng.gen_range(min_cy..=max_cy);
                params.insert(key_x.to_string(), cx.into());
                params.insert(key_y.to_string(), cy.into());
                let candidate = descriptor.construct(color.clone(), &params)?;
                let bbox = candidate.bounding_box();

                if occupied
                    .iter()
                    .any(|other| bbox.overlaps_with_separation(other, separation))
                {
                    continue;
                }

                occupied.push(bbox);
                placed.push(candidate);
                continue 'assignments;
            }
            shrink *= SHRINK_RATIO;
        }

        tracing::warn!(
            "Could not place shape kind '{}' after {} attempts; skipping it",
            kind,
            PLACEMENT_ATTEMPTS
        );
    }

    if placed.is_empty() {
        return Err(CaptchaError::Generation(
            "no shape could be placed on the canvas".to_string(),
        ));
    }
    Ok(placed)
}
