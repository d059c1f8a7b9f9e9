//! Async challenge lifecycle service
//!
//! Semantics match `ChallengeService`; only the store calls await. Image
//! generation itself is CPU-bound and runs before the first await point.

use image::RgbImage;
use shapes::ShapeRegistry;
use store::AsyncCaptchaStore;
use uuid::Uuid;

use crate::config::CaptchaConfig;
use crate::error::{CaptchaError, CaptchaResult};
use crate::generator::{generate_challenge, GeneratedChallenge};
use crate::verify::decide_click;

pub struct AsyncChallengeService<S: AsyncCaptchaStore> {
    store: S,
    config: CaptchaConfig,
    registry: ShapeRegistry,
}

impl<S: AsyncCaptchaStore> AsyncChallengeService<S> {
    pub fn new(store: S, config: CaptchaConfig) -> CaptchaResult<Self> {
        Self::with_registry(store, config, ShapeRegistry::with_builtin_models())
    }

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

    pub async fn create_challenge(&self) -> CaptchaResult<(String, RgbImage, String)> {
        // The thread-local rng handle is not Send; keep it out of the
        // awaited section.
        let generated: GeneratedChallenge = {
            let mut rng = rand::thread_rng();
            generate_challenge(&self.registry, &self.config, &mut rng)?
        };

        let id = Uuid::new_v4().simple().to_string();
        let payload = serde_json::to_value(&generated.record)
            .map_err(|e| CaptchaError::Generation(e.to_string()))?;
        self.store
            .store_challenge(&id, &payload, self.config.ttl)
            .await?;

        tracing::debug!(
            "Created challenge {} targeting '{}'",
            id,
            generated.record.target_shape_type
        );
        Ok((id, generated.image, generated.prompt))
    }

    pub async fn verify_solution(&self, id: &str, x: i32, y: i32) -> bool {
        let payload = match self.store.take_challenge(id).await {
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

    pub async fn close_store(&self) -> CaptchaResult<()> {
        self.store.close().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::AsyncMemoryStore;

    #[tokio::test]
    async fn test_create_and_consume() {
        let service =
            AsyncChallengeService::new(AsyncMemoryStore::new(), CaptchaConfig::default())
                .unwrap();
        let (id, image, _prompt) = service.create_challenge().await.unwrap();
        assert_eq!((image.width(), image.height()), (400, 250));

        service.verify_solution(&id, 10, 10).await;
        assert!(!service.verify_solution(&id, 10, 10).await);
    }

    #[tokio::test]
    async fn test_unknown_id_verifies_false() {
        let service =
            AsyncChallengeService::new(AsyncMemoryStore::new(), CaptchaConfig::default())
                .unwrap();
        assert!(!service.verify_solution("missing", 5, 5).await);
    }

    #[tokio::test]
    async fn test_rejects_empty_namespace() {
        let config = CaptchaConfig {
            namespace: "no_such_model".to_string(),
            ..CaptchaConfig::default()
        };
        assert!(AsyncChallengeService::new(AsyncMemoryStore::new(), config).is_err());
    }
}
