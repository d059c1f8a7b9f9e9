//! Shape registry
//!
//! An immutable catalog of model namespaces, each mapping kind names to
//! descriptors plus an optional palette. Built once at startup from the
//! static registration tables of the built-in catalogs and then shared
//! read-only across requests. There is no runtime discovery and no global
//! state: callers own the registry value and pass it by reference.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::base_model;
use crate::color::ColorSpec;
use crate::descriptor::{PlacedShape, ShapeDescriptor};
use crate::error::{ShapeError, ShapeResult};
use crate::record::DrawingRecord;
use crate::td_model;

/// One model namespace: ordered kind map plus its palette.
struct ModelCatalog {
    kinds: BTreeMap<String, Arc<dyn ShapeDescriptor>>,
    /// Registration order, which sampling follows for stable behavior.
    kind_order: Vec<String>,
    palette: Vec<ColorSpec>,
}

impl ModelCatalog {
    fn new() -> Self {
        Self {
            kinds: BTreeMap::new(),
            kind_order: Vec::new(),
            palette: Vec::new(),
        }
    }
}

/// Immutable kind-name to descriptor mapping per model namespace.
pub struct ShapeRegistry {
    models: BTreeMap<String, ModelCatalog>,
    general_palette: Vec<ColorSpec>,
}

impl ShapeRegistry {
    /// Empty registry with only the general fallback palette.
    pub fn new() -> Self {
        Self {
            models: BTreeMap::new(),
            general_palette: general_palette(),
        }
    }

    /// Registry preloaded with the built-in flat and pseudo-3D catalogs.
    pub fn with_builtin_models() -> Self {
        let mut registry = Self::new();
        for desc in base_model::descriptors() {
            registry.register(base_model::NAMESPACE, desc);
        }
        registry.set_palette(base_model::NAMESPACE, base_model::palette::colors());
        for desc in td_model::descriptors() {
            registry.register(td_model::NAMESPACE, desc);
        }
        registry.set_palette(td_model::NAMESPACE, td_model::palette::colors());
        registry
    }

    /// Registers a descriptor under its self-reported kind name. A collision
    /// within one namespace resolves last-registration-wins.
    pub fn register(&mut self, namespace: &str, descriptor: Arc<dyn ShapeDescriptor>) {
        let catalog = self
            .models
            .entry(namespace.to_string())
            .or_insert_with(ModelCatalog::new);
        let kind = descriptor.kind().to_string();
        if catalog.kinds.insert(kind.clone(), descriptor).is_some() {
            tracing::warn!(
                "Shape kind '{}' registered twice in namespace '{}'; keeping the later registration",
                kind,
                namespace
            );
        } else {
            catalog.kind_order.push(kind);
        }
    }

    pub fn set_palette(&mut self, namespace: &str, palette: Vec<ColorSpec>) {
        self.models
            .entry(namespace.to_string())
            .or_insert_with(ModelCatalog::new)
            .palette = palette;
    }

    pub fn namespaces(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    /// Kind names of a namespace in registration order. Unknown namespaces
    /// yield an empty list.
    pub fn kind_names(&self, namespace: &str) -> Vec<String> {
        self.models
            .get(namespace)
            .map(|c| c.kind_order.clone())
            .unwrap_or_default()
    }

    pub fn descriptor(
        &self,
        namespace: &str,
        kind: &str,
    ) -> ShapeResult<Arc<dyn ShapeDescriptor>> {
        self.models
            .get(namespace)
            .and_then(|c| c.kinds.get(kind))
            .cloned()
            .ok_or_else(|| ShapeError::UnknownKind {
                namespace: namespace.to_string(),
                kind: kind.to_string(),
            })
    }

    /// Palette of a namespace; empty or missing palettes fall back to the
    /// general palette.
    pub fn palette(&self, namespace: &str) -> &[ColorSpec] {
        match self.models.get(namespace) {
            Some(c) if !c.palette.is_empty() => &c.palette,
            _ => &self.general_palette,
        }
    }

    /// Rebuilds a transient placed shape from its stored record, purely for
    /// hit-testing.
    pub fn reconstruct(
        &self,
        namespace: &str,
        record: &DrawingRecord,
    ) -> ShapeResult<Box<dyn PlacedShape>> {
        let descriptor = self.descriptor(namespace, &record.shape_kind)?;
        descriptor.construct(record.color.clone(), &record.params)
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::with_builtin_models()
    }
}

/// Fallback palette used when a namespace registers no colors of its own.
fn general_palette() -> Vec<ColorSpec> {
    vec![
        ColorSpec::named("red"),
        ColorSpec::named("blue"),
        ColorSpec::named("green"),
        ColorSpec::named("#FFBF00"),
        ColorSpec::Rgb([128, 0, 128]),
        ColorSpec::named("orange"),
        ColorSpec::named("grey"),
        ColorSpec::named("deepskyblue"),
        ColorSpec::named("magenta"),
        ColorSpec::named("lime"),
        ColorSpec::Rgb([255, 105, 180]),
        ColorSpec::Rgb([0, 128, 128]),
        ColorSpec::Rgb([165, 42, 42]),
        ColorSpec::Rgb([210, 105, 30]),
        ColorSpec::Rgb([128, 128, 0]),
        ColorSpec::Rgb([70, 130, 180]),
        ColorSpec::Rgb([60, 179, 113]),
        ColorSpec::Rgb([255, 192, 203]),
        ColorSpec::Rgb([255, 160, 122]),
        ColorSpec::Rgb([173, 216, 230]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base_model::circle::CircleDescriptor;
    use crate::record::{ParamMap, ParamValue};

    #[test]
    fn test_builtin_models_present() {
        let registry = ShapeRegistry::with_builtin_models();
        assert_eq!(registry.namespaces(), vec!["base_model", "td_model"]);
        assert_eq!(registry.kind_names("base_model").len(), 9);
        assert_eq!(registry.kind_names("td_model").len(), 10);
        assert!(registry.descriptor("base_model", "circle").is_ok());
        assert!(registry.descriptor("td_model", "torus").is_ok());
        assert!(matches!(
            registry.descriptor("base_model", "torus"),
            Err(ShapeError::UnknownKind { .. })
        ));
    }

    #[test]
    fn test_unknown_namespace_has_no_kinds() {
        let registry = ShapeRegistry::with_builtin_models();
        assert!(registry.kind_names("no_such_model").is_empty());
    }

    #[test]
    fn test_palette_fallback() {
        let mut registry = ShapeRegistry::new();
        registry.register("sparse", Arc::new(CircleDescriptor));
        // No palette registered: the general palette applies.
        assert_eq!(registry.palette("sparse").len(), 20);
        registry.set_palette("sparse", vec![ColorSpec::named("red")]);
        assert_eq!(registry.palette("sparse").len(), 1);
    }

    #[test]
    fn test_duplicate_registration_last_wins() {
        let mut registry = ShapeRegistry::new();
        registry.register("ns", Arc::new(CircleDescriptor));
        registry.register("ns", Arc::new(CircleDescriptor));
        // Still one kind, not two.
        assert_eq!(registry.kind_names("ns"), vec!["circle".to_string()]);
    }

    #[test]
    fn test_reconstruct_round_trip() {
        let registry = ShapeRegistry::with_builtin_models();
        let mut params = ParamMap::new();
        params.insert("cx".to_string(), 200.into());
        params.insert("cy".to_string(), 150.into());
        params.insert("rotation_angle_rad".to_string(), ParamValue::Number(0.0));
        params.insert("radius".to_string(), 30.into());
        let record = crate::record::DrawingRecord {
            shape_kind: "circle".to_string(),
            color: ColorSpec::named("red"),
            params,
            bbox: [170.0, 120.0, 230.0, 180.0],
        };
        let shape = registry.reconstruct("base_model", &record).unwrap();
        assert!(shape.contains(200, 150));
        assert!(!shape.contains(400, 150));
    }
}
