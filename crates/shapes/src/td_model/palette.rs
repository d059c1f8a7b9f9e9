//! Fill palette for the pseudo-3D catalog
//!
//! Deeper saturated tones than the flat palette: face shading multiplies
//! lightness up and down, so entries need headroom in both directions.

use crate::color::ColorSpec;

pub fn colors() -> Vec<ColorSpec> {
    vec![
        ColorSpec::named("crimson"),
        ColorSpec::named("royalblue"),
        ColorSpec::named("forestgreen"),
        ColorSpec::named("darkorchid"),
        ColorSpec::named("gold"),
        ColorSpec::named("orangered"),
        ColorSpec::named("mediumspringgreen"),
        ColorSpec::named("mediumvioletred"),
        ColorSpec::named("steelblue"),
        ColorSpec::named("chocolate"),
        ColorSpec::named("teal"),
        ColorSpec::named("hotpink"),
        ColorSpec::Rgb([178, 34, 34]),
        ColorSpec::Rgb([0, 139, 139]),
    ]
}
