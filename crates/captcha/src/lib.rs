//! Captcha Crate - the click-the-shape challenge lifecycle
//!
//! Ties the lower layers together into a usable service:
//! - Configuration (canvas size, upscale factor, shape count, TTL, prompt)
//! - Non-overlapping shape placement with shrink-and-retry rounds
//! - Challenge generation: render on an upscaled surface, downsample,
//!   persist the record under a fresh id
//! - Single-use click verification that reconstructs hit-test geometry
//!   from the stored record and fails closed on every error
//!
//! `ChallengeService` and `AsyncChallengeService` are duals over the sync
//! and async store contracts.

pub mod async_service;
pub mod config;
pub mod error;
pub mod generator;
pub mod placement;
pub mod sync_service;

mod verify;

pub use async_service::AsyncChallengeService;
pub use config::{light_backgrounds, CaptchaConfig};
pub use error::{CaptchaError, CaptchaResult};
pub use generator::{generate_challenge, GeneratedChallenge};
pub use placement::{place_shapes, sample_rotation};
pub use sync_service::ChallengeService;
