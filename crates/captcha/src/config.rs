//! Challenge generation configuration
//!
//! All sizes in the config are in FINAL image pixels; the generator works on
//! an upscaled surface and downsamples at the end. `size_context` converts
//! the final-size range into the upscaled range the shape descriptors see.

use std::time::Duration;

use raster::Rgb;
use shapes::SizeContext;

use crate::error::{CaptchaError, CaptchaResult};

/// Secondary dimensions (rectangle height, star inner radius) span this
/// fraction range of the primary dimension.
const SECONDARY_MIN_RATIO: f64 = 0.5;
const SECONDARY_MAX_RATIO: f64 = 0.8;

/// Tunable knobs of one challenge service.
#[derive(Debug, Clone)]
pub struct CaptchaConfig {
    /// Shape catalog namespace to draw kinds and colors from.
    pub namespace: String,
    /// Final image width in pixels.
    pub width: u32,
    /// Final image height in pixels.
    pub height: u32,
    /// Supersampling factor for anti-aliased output.
    pub upscale: u32,
    /// Number of shapes to place, capped by available kinds and colors.
    pub shape_count: usize,
    /// Primary shape dimension range in final pixels.
    pub min_shape_size: i32,
    pub max_shape_size: i32,
    /// Minimum gap between placed shapes, in final pixels.
    pub min_separation: i32,
    /// How long a stored challenge stays verifiable.
    pub ttl: Duration,
    /// Prompt text; `{shape}` is replaced by the target kind name.
    pub prompt_template: String,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            namespace: "base_model".to_string(),
            width: 400,
            height: 250,
            upscale: 3,
            shape_count: 10,
            min_shape_size: 30,
            max_shape_size: 50,
            min_separation: 1,
            ttl: Duration::from_secs(300),
            prompt_template: "Please click on the {shape}.".to_string(),
        }
    }
}

impl CaptchaConfig {
    pub fn validate(&self) -> CaptchaResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptchaError::Config(
                "image dimensions must be positive".to_string(),
            ));
        }
        if self.upscale == 0 {
            return Err(CaptchaError::Config(
                "upscale factor must be at least 1".to_string(),
            ));
        }
        if self.shape_count == 0 {
            return Err(CaptchaError::Config(
                "shape count must be positive".to_string(),
            ));
        }
        if self.min_shape_size <= 0 || self.max_shape_size < self.min_shape_size {
            return Err(CaptchaError::Config(format!(
                "invalid shape size range {}..={}",
                self.min_shape_size, self.max_shape_size
            )));
        }
        if self.min_separation < 0 {
            return Err(CaptchaError::Config(
                "separation cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn upscaled_width(&self) -> u32 {
        self.width * self.upscale
    }

    pub fn upscaled_height(&self) -> u32 {
        self.height * self.upscale
    }

    /// Separation in upscaled pixels.
    pub fn upscaled_separation(&self) -> f64 {
        f64::from(self.min_separation) * f64::from(self.upscale)
    }

    /// Upscaled outline stroke width.
    pub fn outline_width(&self) -> u32 {
        self.upscale.max(1)
    }

    /// Size bounds handed to descriptors, scaled by `shrink` for the
    /// placement retry rounds.
    pub fn size_context(&self, shrink: f64) -> SizeContext {
        let scale = f64::from(self.upscale) * shrink;
        let min_primary = ((f64::from(self.min_shape_size) * scale).round() as i32).max(2);
        let max_primary = ((f64::from(self.max_shape_size) * scale).round() as i32).max(min_primary);
        SizeContext {
            canvas_width: self.upscaled_width(),
            canvas_height: self.upscaled_height(),
            min_primary,
            max_primary,
            min_secondary: ((f64::from(min_primary) * SECONDARY_MIN_RATIO).round() as i32).max(1),
            max_secondary: ((f64::from(max_primary) * SECONDARY_MAX_RATIO).round() as i32).max(1),
        }
    }

    /// Fills the prompt template for a target kind, with underscores in the
    /// kind name read as spaces.
    pub fn prompt_for(&self, kind: &str) -> String {
        self.prompt_template
            .replace("{shape}", &kind.replace('_', " "))
    }
}

/// Backgrounds the generator samples from. All light so every palette color
/// stays readable against them.
pub fn light_backgrounds() -> Vec<Rgb<u8>> {
    vec![
        Rgb([255, 255, 255]),
        Rgb([255, 255, 224]),
        Rgb([224, 255, 255]),
        Rgb([230, 230, 250]),
        Rgb([245, 245, 220]),
        Rgb([240, 255, 240]),
        Rgb([240, 248, 255]),
        Rgb([245, 255, 250]),
        Rgb([245, 245, 245]),
        Rgb([255, 245, 238]),
        Rgb([255, 255, 240]),
        Rgb([255, 250, 240]),
    ]
}
