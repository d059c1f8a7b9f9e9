//! Fill palette for the flat catalog

use crate::color::ColorSpec;

/// Bright primaries plus a few pastels; flat shapes rely entirely on fill
/// color for identification, so every entry must stay distinguishable.
pub fn colors() -> Vec<ColorSpec> {
    vec![
        ColorSpec::named("red"),
        ColorSpec::named("blue"),
        ColorSpec::named("green"),
        ColorSpec::named("yellow"),
        ColorSpec::named("orange"),
        ColorSpec::named("purple"),
        ColorSpec::named("cyan"),
        ColorSpec::named("magenta"),
        ColorSpec::named("lime"),
        ColorSpec::named("pink"),
        ColorSpec::named("teal"),
        ColorSpec::named("brown"),
        ColorSpec::named("salmon"),
        ColorSpec::named("skyblue"),
        ColorSpec::named("violet"),
        ColorSpec::named("khaki"),
        ColorSpec::Rgb([70, 130, 180]),
        ColorSpec::Rgb([60, 179, 113]),
    ]
}
