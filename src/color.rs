use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::projection::correlation::CORRELATION_RANGE;

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.62);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging scale for the correlation heat map
// ---------------------------------------------------------------------------

/// Cell colour for NaN correlations.
pub const UNDEFINED_COLOR: Color32 = Color32::from_gray(200);

const COOL: (f32, f32, f32) = (0.230, 0.299, 0.754);
const NEUTRAL: (f32, f32, f32) = (0.865, 0.865, 0.865);
const WARM: (f32, f32, f32) = (0.706, 0.016, 0.150);

/// Map a correlation onto a cool–warm scale fixed to `[-1, 1]`.
pub fn correlation_color(value: f64) -> Color32 {
    if value.is_nan() {
        return UNDEFINED_COLOR;
    }
    let (lo, hi) = CORRELATION_RANGE;
    // 0 at the low end, 1 at the high end.
    let t = ((value.clamp(lo, hi) - lo) / (hi - lo)) as f32;

    let lin = |(r, g, b): (f32, f32, f32)| -> LinSrgb { Srgb::new(r, g, b).into_linear() };
    let mixed = if t < 0.5 {
        lin(COOL).mix(lin(NEUTRAL), t * 2.0)
    } else {
        lin(NEUTRAL).mix(lin(WARM), (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(mixed))
}

/// Dark text on light cells, light text on saturated ones.
pub fn text_color_on(value: f64) -> Color32 {
    if value.is_finite() && value.abs() > 0.6 {
        Color32::WHITE
    } else {
        Color32::BLACK
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn scale_ends_are_cool_and_warm() {
        let cold = correlation_color(-1.0);
        let hot = correlation_color(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
        // Out of range values saturate.
        assert_eq!(correlation_color(3.0), hot);
    }

    #[test]
    fn nan_is_grey() {
        assert_eq!(correlation_color(f64::NAN), UNDEFINED_COLOR);
    }
}
