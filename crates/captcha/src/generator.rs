//! Challenge image generation
//!
//! One generation pass: sample a light background, pick distinct kinds and
//! colors, place everything without overlap, render onto the upscaled
//! surface and downsample to the final size. The returned record holds
//! everything verification needs; the image holds nothing it needs.

use image::RgbImage;
use rand::seq::SliceRandom;
use rand::RngCore;
use raster::{Canvas, Rgb};
use shapes::{ChallengeRecord, ColorSpec, RenderStyle, ShapeRegistry};

use crate::config::{light_backgrounds, CaptchaConfig};
use crate::error::{CaptchaError, CaptchaResult};
use crate::placement::place_shapes;

/// Output of one generation pass.
pub struct GeneratedChallenge {
    pub record: ChallengeRecord,
    pub image: RgbImage,
    pub prompt: String,
}

/// Generates a complete challenge: placed shapes, rendered image, target
/// kind and prompt.
pub fn generate_challenge(
    registry: &ShapeRegistry,
    config: &CaptchaConfig,
    rng: &mut dyn RngCore,
) -> CaptchaResult<GeneratedChallenge> {
    config.validate()?;

    let kinds = registry.kind_names(&config.namespace);
    if kinds.is_empty() {
        return Err(CaptchaError::Generation(format!(
            "namespace '{}' has no registered shape kinds",
            config.namespace
        )));
    }
    let palette = registry.palette(&config.namespace);
    if palette.is_empty() {
        return Err(CaptchaError::Generation(format!(
            "namespace '{}' has no colors to draw with",
            config.namespace
        )));
    }

    // Kinds and colors are sampled without replacement, so the shape count
    // is capped by whichever runs out first.
    let count = config.shape_count.min(kinds.len()).min(palette.len());
    let chosen_kinds: Vec<String> = kinds.choose_multiple(rng, count).cloned().collect();
    let chosen_colors: Vec<ColorSpec> = palette.choose_multiple(rng, count).cloned().collect();
    let assignments: Vec<(String, ColorSpec)> = chosen_kinds
        .into_iter()
        .zip(chosen_colors)
        .collect();

    let background = light_backgrounds()
        .choose(rng)
        .copied()
        .unwrap_or(Rgb([255, 255, 255]));

    let placed = place_shapes(registry, config, &assignments, rng)?;

    let target_shape_type = placed
        .choose(rng)
        .map(|shape| shape.kind().to_string())
        .ok_or_else(|| CaptchaError::Generation("no placed shape to target".to_string()))?;

    let style = RenderStyle {
        outline_width: config.outline_width(),
        background,
    };
    let mut canvas = Canvas::new(config.upscaled_width(), config.upscaled_height(), background);
    for shape in &placed {
        shape.render(&mut canvas, &style);
    }
    let image = canvas.into_final(config.width, config.height);

    let prompt = config.prompt_for(&target_shape_type);
    let record = ChallengeRecord {
        target_shape_type,
        all_drawn_shapes: placed.iter().map(|shape| shape.record()).collect(),
    };

    Ok(GeneratedChallenge {
        record,
        image,
        prompt,
    })
}
