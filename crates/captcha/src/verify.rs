//! Click verification against a stored challenge record
//!
//! Verification never errors outward: a missing record, malformed JSON or a
//! click outside every shape all resolve to `false`. The click arrives in
//! final-image coordinates and is mapped back onto the upscaled canvas the
//! hit-test geometry lives in.

use serde_json::Value;
use shapes::{ChallengeRecord, ShapeRegistry};

use crate::config::CaptchaConfig;

/// Decides a click against a raw stored payload.
pub(crate) fn decide_click(
    registry: &ShapeRegistry,
    config: &CaptchaConfig,
    payload: Value,
    x: i32,
    y: i32,
) -> bool {
    let record: ChallengeRecord = match serde_json::from_value(payload) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("Stored challenge record is malformed: {}", e);
            return false;
        }
    };

    let upscale = config.upscale as i32;
    let px = x.saturating_mul(upscale);
    let py = y.saturating_mul(upscale);

    // Reverse placement order: the shape drawn last sits on top, so it
    // decides for any point it covers.
    for drawing in record.all_drawn_shapes.iter().rev() {
        let shape = match registry.reconstruct(&config.namespace, drawing) {
            Ok(shape) => shape,
            Err(e) => {
                tracing::warn!(
                    "Skipping unreconstructable '{}' record during verification: {}",
                    drawing.shape_kind,
                    e
                );
                continue;
            }
        };
        if shape.contains(px, py) {
            return shape.kind() == record.target_shape_type;
        }
    }
    false
}
