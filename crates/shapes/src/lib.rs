//! Shapes Crate - the shape catalog behind the click-the-shape challenges
//!
//! This crate provides everything between raw geometry and a rendered,
//! verifiable challenge image:
//! - Color parsing and the fill/outline/edge contrast policy
//! - The serializable record model (DrawingRecord, ChallengeRecord)
//! - The shape descriptor contract (size generation, construction,
//!   rendering, containment)
//! - Two built-in catalogs: nine flat kinds (`base_model`) and ten
//!   pseudo-3D kinds (`td_model`)
//! - The immutable ShapeRegistry mapping namespaces and kind names to
//!   descriptors and palettes
//!
//! Construction is a pure function of the stored parameters, so a record
//! written at generation time reconstructs bit-identical hit-test geometry
//! at verification time, in any process.

pub mod base_model;
pub mod color;
pub mod descriptor;
pub mod error;
pub mod record;
pub mod registry;
pub mod td_model;

pub use color::{adjust_brightness, contrasting_edge_line, contrasting_outline, ColorSpec};
pub use descriptor::{PlacedShape, RenderStyle, RotationPolicy, ShapeDescriptor, SizeContext};
pub use error::{ShapeError, ShapeResult};
pub use record::{ChallengeRecord, DrawingRecord, ParamMap, ParamValue};
pub use registry::ShapeRegistry;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Every built-in kind must survive the construct -> record ->
    // reconstruct cycle with identical containment over a sample grid.
    #[test]
    fn test_every_kind_round_trips() {
        let registry = ShapeRegistry::with_builtin_models();
        let mut rng = StdRng::seed_from_u64(42);
        let ctx = SizeContext {
            canvas_width: 1200,
            canvas_height: 750,
            min_primary: 90,
            max_primary: 150,
            min_secondary: 45,
            max_secondary: 120,
        };

        for namespace in ["base_model", "td_model"] {
            for kind in registry.kind_names(namespace) {
                let desc = registry.descriptor(namespace, &kind).unwrap();
                let mut params = desc.generate_size_params(&ctx, &mut rng);
                let (kx, ky) = desc.center_keys();
                params.insert(kx.to_string(), 400.into());
                params.insert(ky.to_string(), 400.into());
                params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.35));

                let original = desc
                    .construct(ColorSpec::named("red"), &params)
                    .unwrap_or_else(|e| panic!("construct failed for {}: {}", kind, e));
                let record = original.record();
                assert_eq!(record.shape_kind, kind);

                let rebuilt = registry
                    .reconstruct(namespace, &record)
                    .unwrap_or_else(|e| panic!("reconstruct failed for {}: {}", kind, e));

                let mut hits = 0;
                for px in (200..=600).step_by(8) {
                    for py in (200..=600).step_by(8) {
                        let a = original.contains(px, py);
                        assert_eq!(a, rebuilt.contains(px, py), "{} at ({},{})", kind, px, py);
                        if a {
                            hits += 1;
                        }
                    }
                }
                assert!(hits > 0, "{} contained no grid points", kind);
            }
        }
    }

    // Rotation-free kinds must reconstruct identically regardless of any
    // rotation value stored alongside them.
    #[test]
    fn test_rotation_policy_none_kinds_ignore_angle() {
        let registry = ShapeRegistry::with_builtin_models();
        let desc = registry.descriptor("td_model", "sphere").unwrap();
        assert_eq!(desc.rotation_policy(), RotationPolicy::None);

        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 100.into());
        params.insert("cy".to_string(), 100.into());
        params.insert("radius".to_string(), 40.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        let a = desc.construct(ColorSpec::named("red"), &params).unwrap();
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(1.2));
        let b = desc.construct(ColorSpec::named("red"), &params).unwrap();
        assert_eq!(a.bounding_box().to_array(), b.bounding_box().to_array());
    }

    proptest! {
        // Containment must survive the record round trip for any center,
        // size and rotation, not just the sampled fixtures above.
        #[test]
        fn prop_record_round_trip_preserves_containment(
            cx in 100i32..500,
            cy in 100i32..500,
            side in 20i32..120,
            rotation in 0.0f64..std::f64::consts::TAU,
        ) {
            let registry = ShapeRegistry::with_builtin_models();
            let desc = registry.descriptor("base_model", "square").unwrap();
            let mut params = ParamMap::new();
            params.insert("cx".to_string(), cx.into());
            params.insert("cy".to_string(), cy.into());
            params.insert("rotation_angle_rad".to_string(), ParamValue::Number(rotation));
            params.insert("side".to_string(), side.into());

            let original = desc.construct(ColorSpec::named("red"), &params).unwrap();
            let record = original.record();
            let rebuilt = registry.reconstruct("base_model", &record).unwrap();

            prop_assert_eq!(record.bbox, rebuilt.bounding_box().to_array());
            for px in ((cx - side)..=(cx + side)).step_by(7) {
                for py in ((cy - side)..=(cy + side)).step_by(7) {
                    prop_assert_eq!(original.contains(px, py), rebuilt.contains(px, py));
                }
            }
        }
    }
}
