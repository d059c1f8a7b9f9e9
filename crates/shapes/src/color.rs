//! Color resolution and contrast policy
//!
//! Fill colors arrive either as CSS-style names / hex strings or as raw RGB
//! triples. Outline and edge-line colors are derived from the fill by
//! adjusting lightness in HLS space so every shape keeps a visible contour
//! on any palette entry.

use serde::{Deserialize, Serialize};

/// A color as stored in drawing records: a name/hex string or an RGB triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Named(String),
    Rgb([u8; 3]),
}

impl ColorSpec {
    pub fn named(name: &str) -> Self {
        Self::Named(name.to_string())
    }

    /// Resolves to an RGB triple. Unknown names and malformed hex strings
    /// resolve to `None`.
    pub fn to_rgb(&self) -> Option<[u8; 3]> {
        match self {
            Self::Rgb(rgb) => Some(*rgb),
            Self::Named(name) => parse_color_name(name),
        }
    }
}

impl From<[u8; 3]> for ColorSpec {
    fn from(rgb: [u8; 3]) -> Self {
        Self::Rgb(rgb)
    }
}

/// Fallback fill used when a stored color fails to resolve. Mid grey keeps
/// the shape visible on light backgrounds.
pub const FALLBACK_GREY: [u8; 3] = [100, 100, 100];

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("blue", [0, 0, 255]),
    ("green", [0, 128, 0]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("lime", [0, 255, 0]),
    ("pink", [255, 192, 203]),
    ("teal", [0, 128, 128]),
    ("brown", [165, 42, 42]),
    ("grey", [128, 128, 128]),
    ("gray", [128, 128, 128]),
    ("gold", [255, 215, 0]),
    ("crimson", [220, 20, 60]),
    ("royalblue", [65, 105, 225]),
    ("forestgreen", [34, 139, 34]),
    ("darkorchid", [153, 50, 204]),
    ("orangered", [255, 69, 0]),
    ("deepskyblue", [0, 191, 255]),
    ("steelblue", [70, 130, 180]),
    ("mediumseagreen", [60, 179, 113]),
    ("mediumspringgreen", [0, 250, 154]),
    ("mediumvioletred", [199, 21, 133]),
    ("hotpink", [255, 105, 180]),
    ("chocolate", [210, 105, 30]),
    ("olive", [128, 128, 0]),
    ("lavender", [230, 230, 250]),
    ("lightsalmon", [255, 160, 122]),
    ("lightblue", [173, 216, 230]),
    ("lightgreen", [144, 238, 144]),
    ("salmon", [250, 128, 114]),
    ("skyblue", [135, 206, 235]),
    ("violet", [238, 130, 238]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("indigo", [75, 0, 130]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("khaki", [240, 230, 140]),
];

fn parse_color_name(name: &str) -> Option<[u8; 3]> {
    let name = name.trim();
    if let Some(hex) = name.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == lower)
        .map(|(_, rgb)| *rgb)
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some([r * 17, g * 17, b * 17])
        }
        _ => None,
    }
}

/// RGB (0..=255) to HLS, all components in 0..=1.
fn rgb_to_hls(rgb: [u8; 3]) -> (f64, f64, f64) {
    let r = f64::from(rgb[0]) / 255.0;
    let g = f64::from(rgb[1]) / 255.0;
    let b = f64::from(rgb[2]) / 255.0;
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    let l = (minc + maxc) / 2.0;
    if (maxc - minc).abs() < f64::EPSILON {
        return (0.0, l, 0.0);
    }
    let s = if l <= 0.5 {
        (maxc - minc) / (maxc + minc)
    } else {
        (maxc - minc) / (2.0 - maxc - minc)
    };
    let rc = (maxc - r) / (maxc - minc);
    let gc = (maxc - g) / (maxc - minc);
    let bc = (maxc - b) / (maxc - minc);
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), l, s)
}

fn hls_component(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> [u8; 3] {
    if s == 0.0 {
        let v = (l * 255.0).round() as u8;
        return [v, v, v];
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    [
        (hls_component(m1, m2, h + 1.0 / 3.0) * 255.0).round().clamp(0.0, 255.0) as u8,
        (hls_component(m1, m2, h) * 255.0).round().clamp(0.0, 255.0) as u8,
        (hls_component(m1, m2, h - 1.0 / 3.0) * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

fn adjust_with_clamps(
    rgb: [u8; 3],
    factor: f64,
    min_l_for_darken: f64,
    max_l_for_lighten: f64,
) -> [u8; 3] {
    let (h, l, s) = rgb_to_hls(rgb);
    let original_l = l;
    let original_s = s;

    let mut l_adjusted = l * factor;
    if factor < 1.0 {
        let floor = if original_l > 0.01 { min_l_for_darken } else { 0.0 };
        l_adjusted = l_adjusted.max(floor);
    } else if factor > 1.0 {
        let ceiling = if original_l < 0.99 { max_l_for_lighten } else { 1.0 };
        l_adjusted = l_adjusted.min(ceiling);
    }
    l_adjusted = l_adjusted.clamp(0.0, 1.0);

    // Saturated colors wash out when the lightness swing is large; boost
    // saturation to keep the shade recognizably the same hue.
    let mut s_final = original_s;
    if original_s > 0.2
        && ((original_l < 0.3 && factor > 1.1)
            || (original_l > 0.7 && factor < 0.9)
            || ((l_adjusted - original_l).abs() > 0.3 && original_s < 0.5))
    {
        s_final = (original_s + 0.2).min(1.0);
    }

    hls_to_rgb(h, l_adjusted, s_final)
}

/// Multiplies the HLS lightness of `rgb` by `factor`, clamped so pure black
/// and pure white never result from a non-extreme input.
pub fn adjust_brightness(rgb: [u8; 3], factor: f64) -> [u8; 3] {
    adjust_with_clamps(rgb, factor, 0.03, 0.97)
}

/// Outline color for flat shapes: darken light fills, lighten dark fills.
pub fn contrasting_outline(fill: [u8; 3]) -> [u8; 3] {
    let (_, l, _) = rgb_to_hls(fill);
    if l > 0.5 {
        adjust_with_clamps(fill, 0.4, 0.05, 0.97)
    } else {
        adjust_with_clamps(fill, 1.7, 0.03, 0.95)
    }
}

/// Edge-line color for polyhedral kinds. Near-white and near-black
/// low-saturation fills get fixed greys since lightness scaling has nowhere
/// to go.
pub fn contrasting_edge_line(fill: [u8; 3]) -> [u8; 3] {
    let (_, l, s) = rgb_to_hls(fill);
    if l > 0.9 && s < 0.15 {
        return [80, 80, 80];
    }
    if l < 0.1 && s < 0.15 {
        return [170, 170, 170];
    }
    if l > 0.45 {
        adjust_with_clamps(fill, 0.25, 0.02, 0.97)
    } else {
        adjust_with_clamps(fill, 2.0, 0.03, 0.98)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_and_hex_resolution() {
        assert_eq!(ColorSpec::named("red").to_rgb(), Some([255, 0, 0]));
        assert_eq!(ColorSpec::named("DeepSkyBlue").to_rgb(), Some([0, 191, 255]));
        assert_eq!(ColorSpec::named("#FFBF00").to_rgb(), Some([255, 191, 0]));
        assert_eq!(ColorSpec::named("#f0a").to_rgb(), Some([255, 0, 170]));
        assert_eq!(ColorSpec::named("not-a-color").to_rgb(), None);
        assert_eq!(ColorSpec::named("#12345").to_rgb(), None);
        assert_eq!(ColorSpec::Rgb([1, 2, 3]).to_rgb(), Some([1, 2, 3]));
    }

    #[test]
    fn test_serde_untagged_forms() {
        let named: ColorSpec = serde_json::from_str("\"red\"").unwrap();
        assert_eq!(named, ColorSpec::named("red"));
        let rgb: ColorSpec = serde_json::from_str("[10, 20, 30]").unwrap();
        assert_eq!(rgb, ColorSpec::Rgb([10, 20, 30]));
        assert_eq!(serde_json::to_string(&named).unwrap(), "\"red\"");
        assert_eq!(serde_json::to_string(&rgb).unwrap(), "[10,20,30]");
    }

    #[test]
    fn test_hls_round_trip() {
        for rgb in [[255, 0, 0], [12, 200, 99], [128, 128, 128], [0, 0, 0]] {
            let (h, l, s) = rgb_to_hls(rgb);
            let back = hls_to_rgb(h, l, s);
            for i in 0..3 {
                assert!(
                    (i32::from(back[i]) - i32::from(rgb[i])).abs() <= 1,
                    "{:?} -> {:?}",
                    rgb,
                    back
                );
            }
        }
    }

    #[test]
    fn test_adjust_brightness_direction() {
        let base = [200, 40, 40];
        let darker = adjust_brightness(base, 0.5);
        let lighter = adjust_brightness(base, 1.5);
        let (_, l_base, _) = rgb_to_hls(base);
        let (_, l_dark, _) = rgb_to_hls(darker);
        let (_, l_light, _) = rgb_to_hls(lighter);
        assert!(l_dark < l_base);
        assert!(l_light > l_base);
    }

    #[test]
    fn test_adjust_brightness_clamps() {
        // Darkening a mid color never reaches pure black.
        let dark = adjust_brightness([100, 100, 100], 0.0001);
        assert!(dark.iter().any(|&c| c > 0));
        // Lightening never reaches pure white.
        let light = adjust_brightness([100, 100, 100], 100.0);
        assert!(light.iter().any(|&c| c < 255));
    }

    #[test]
    fn test_contrasting_outline_flips_by_lightness() {
        let (_, l_on_light, _) = rgb_to_hls(contrasting_outline([230, 230, 120]));
        assert!(l_on_light < 0.5);
        let (_, l_on_dark, _) = rgb_to_hls(contrasting_outline([30, 30, 90]));
        assert!(l_on_dark > 0.2);
    }

    #[test]
    fn test_edge_line_grey_special_cases() {
        assert_eq!(contrasting_edge_line([250, 250, 250]), [80, 80, 80]);
        assert_eq!(contrasting_edge_line([10, 10, 10]), [170, 170, 170]);
    }
}
