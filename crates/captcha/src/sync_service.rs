//! Blocking challenge lifecycle service

use image::RgbImage;
use shapes::ShapeRegistry;
use store::CaptchaStore;
use uuid::Uuid;

use crate::config::CaptchaConfig;
use crate::error::{CaptchaError, CaptchaResult};
use crate::generator::generate_challenge;
use crate::verify::decide_click;

/// Owns a store and a registry and runs the generate/verify cycle for
/// blocking callers.
pub struct ChallengeService<S: CaptchaStore> {
    store: S,
    config: CaptchaConfig,
    registry: ShapeRegistry,
}

impl<S: CaptchaStore> ChallengeService<S> {
    /// Service over the built-in shape catalogs.
    pub fn new(store: S, config: CaptchaConfig) -> CaptchaResult<Self> {
        Self::with_registry(store, config, ShapeRegistry::with_builtin_models())
    }

    /// Service over a caller-provided registry. Fails fast if the configured
    /// namespace cannot produce challenges.
    pub fn with_registry(
        store: S,
        config: CaptchaConfig,
        registry: ShapeRegistry,
    ) -> CaptchaResult<Self> {
        config.validate()?;
        if registry.kind_names(&config.namespace).is_empty() {
            return Err(CaptchaError::Config(format!(
                "namespace '{}' has no registered shape kinds",
                config.namespace
            )));
        }
        if registry.palette(&config.namespace).is_empty() {
            return Err(CaptchaError::Config(format!(
                "namespace '{}' has no colors to draw with",
                config.namespace
            )));
        }
        Ok(Self {
            store,
            config,
            registry,
        })
    }

    pub fn config(&self) -> &CaptchaConfig {
        &self.config
    }

    /// Generates a challenge, persists its record and returns the id, the
    /// final image and the prompt.
    pub fn create_challenge(&self) -> CaptchaResult<(String, RgbImage, String)> {
        let mut rng = rand::thread_rng();
        let generated = generate_challenge(&self.registry, &self.config, &mut rng)?;

        let id = Uuid::new_v4().simple().to_string();
        let payload = serde_json::to_value(&generated.record)
            .map_err(|e| CaptchaError::Generation(e.to_string()))?;
        self.store.store_challenge(&id, &payload, self.config.ttl)?;

        tracing::debug!(
            "Created challenge {} targeting '{}'",
            id,
            generated.record.target_shape_type
        );
        Ok((id, generated.image, generated.prompt))
    }

    /// Checks a click in final-image coordinates against the stored record.
    /// The record is consumed whatever the outcome, so a challenge verifies
    /// at most once. Never errors outward: every failure reads as `false`.
    pub fn verify_solution(&self, id: &str, x: i32, y: i32) -> bool {
        let payload = match self.store.take_challenge(id) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!("Challenge {} not found or expired", id);
                return false;
            }
            Err(e) => {
                tracing::warn!("Failed to load challenge {}: {}", id, e);
                return false;
            }
        };
        decide_click(&self.registry, &self.config, payload, x, y)
    }

    pub fn close_store(&self) -> CaptchaResult<()> {
        self.store.close()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    #[test]
    fn test_rejects_empty_namespace() {
        let config = CaptchaConfig {
            namespace: "no_such_model".to_string(),
            ..CaptchaConfig::default()
        };
        assert!(matches!(
            ChallengeService::new(MemoryStore::new(), config),
            Err(CaptchaError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = CaptchaConfig {
            upscale: 0,
            ..CaptchaConfig::default()
        };
        assert!(ChallengeService::new(MemoryStore::new(), config).is_err());
    }

    #[test]
    fn test_create_returns_final_size_image() {
        let service =
            ChallengeService::new(MemoryStore::new(), CaptchaConfig::default()).unwrap();
        let (id, image, prompt) = service.create_challenge().unwrap();
        assert!(!id.is_empty());
        assert_eq!(image.width(), 400);
        assert_eq!(image.height(), 250);
        assert!(prompt.contains("click"));
    }

    #[test]
    fn test_unknown_id_verifies_false() {
        let service =
            ChallengeService::new(MemoryStore::new(), CaptchaConfig::default()).unwrap();
        assert!(!service.verify_solution("not-a-real-id", 10, 10));
    }

    #[test]
    fn test_verification_consumes_the_record() {
        let service =
            ChallengeService::new(MemoryStore::new(), CaptchaConfig::default()).unwrap();
        let (id, _, _) = service.create_challenge().unwrap();
        // Whatever the first answer, the second attempt must read false.
        service.verify_solution(&id, 10, 10);
        assert!(!service.verify_solution(&id, 10, 10));
    }
}
