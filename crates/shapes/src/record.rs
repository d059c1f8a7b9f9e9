//! Serializable challenge and shape records
//!
//! A `DrawingRecord` is the compact snapshot a placed shape serializes to at
//! generation time and is reconstructed from at verification time. A
//! `ChallengeRecord` bundles the target kind with every record drawn onto one
//! image, in placement order. Field names are the wire encoding and must not
//! change.

use std::collections::BTreeMap;

use geometry::BBox;
use serde::{Deserialize, Serialize};

use crate::color::ColorSpec;
use crate::error::{ShapeError, ShapeResult};

/// A single stored parameter value: number, string, or list of numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
    Numbers(Vec<f64>),
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

/// Kind-specific parameter map of a drawing record.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Snapshot sufficient to reconstruct one placed shape's hit-test geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingRecord {
    pub shape_kind: String,
    pub color: ColorSpec,
    pub params: ParamMap,
    pub bbox: [f64; 4],
}

impl DrawingRecord {
    pub fn bounding_box(&self) -> BBox {
        BBox::from_array(self.bbox)
    }
}

/// Everything persisted for one generated challenge, consumed exactly once
/// at verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    pub target_shape_type: String,
    pub all_drawn_shapes: Vec<DrawingRecord>,
}

/// Reads a required numeric parameter.
pub fn require_f64(params: &ParamMap, kind: &str, key: &str) -> ShapeResult<f64> {
    match params.get(key) {
        Some(ParamValue::Number(v)) => Ok(*v),
        Some(_) => Err(ShapeError::InvalidParam {
            kind: kind.to_string(),
            param: key.to_string(),
            reason: "expected a number".to_string(),
        }),
        None => Err(ShapeError::MissingParam {
            kind: kind.to_string(),
            param: key.to_string(),
        }),
    }
}

/// Reads a required numeric parameter and rounds it to an integer pixel
/// coordinate or dimension.
pub fn require_i32(params: &ParamMap, kind: &str, key: &str) -> ShapeResult<i32> {
    Ok(require_f64(params, kind, key)?.round() as i32)
}

/// Reads a required positive dimension.
pub fn require_positive(params: &ParamMap, kind: &str, key: &str) -> ShapeResult<i32> {
    let v = require_i32(params, kind, key)?;
    if v <= 0 {
        return Err(ShapeError::InvalidParam {
            kind: kind.to_string(),
            param: key.to_string(),
            reason: format!("must be positive, got {}", v),
        });
    }
    Ok(v)
}

/// Reads an optional numeric parameter, falling back to `default`.
pub fn optional_f64(params: &ParamMap, key: &str, default: f64) -> f64 {
    match params.get(key) {
        Some(ParamValue::Number(v)) => *v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_params() -> ParamMap {
        let mut p = ParamMap::new();
        p.insert("radius".to_string(), 30.0.into());
        p.insert("label".to_string(), ParamValue::Text("top".to_string()));
        p
    }

    #[test]
    fn test_require_helpers() {
        let p = make_params();
        assert_eq!(require_f64(&p, "circle", "radius").unwrap(), 30.0);
        assert_eq!(require_i32(&p, "circle", "radius").unwrap(), 30);
        assert!(matches!(
            require_f64(&p, "circle", "missing"),
            Err(ShapeError::MissingParam { .. })
        ));
        assert!(matches!(
            require_f64(&p, "circle", "label"),
            Err(ShapeError::InvalidParam { .. })
        ));
    }

    #[test]
    fn test_require_positive_rejects_zero() {
        let mut p = ParamMap::new();
        p.insert("side".to_string(), 0.0.into());
        assert!(require_positive(&p, "square", "side").is_err());
    }

    #[test]
    fn test_optional_f64_default() {
        let p = make_params();
        assert_eq!(optional_f64(&p, "radius", 1.0), 30.0);
        assert_eq!(optional_f64(&p, "absent", 0.4), 0.4);
    }

    #[test]
    fn test_challenge_record_wire_format() {
        let record = ChallengeRecord {
            target_shape_type: "circle".to_string(),
            all_drawn_shapes: vec![DrawingRecord {
                shape_kind: "circle".to_string(),
                color: ColorSpec::named("red"),
                params: make_params(),
                bbox: [170.0, 120.0, 230.0, 180.0],
            }],
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"target_shape_type\":\"circle\""));
        assert!(json.contains("\"all_drawn_shapes\""));
        assert!(json.contains("\"shape_kind\":\"circle\""));
        assert!(json.contains("\"bbox\":[170.0,120.0,230.0,180.0]"));

        let back: ChallengeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_param_value_untagged_forms() {
        let json = r#"{"radius": 30, "name": "x", "pair": [1.0, 2.0]}"#;
        let p: ParamMap = serde_json::from_str(json).unwrap();
        assert_eq!(p.get("radius"), Some(&ParamValue::Number(30.0)));
        assert_eq!(p.get("name"), Some(&ParamValue::Text("x".to_string())));
        assert_eq!(p.get("pair"), Some(&ParamValue::Numbers(vec![1.0, 2.0])));
    }
}
