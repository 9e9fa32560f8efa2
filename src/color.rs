use eframe::egui::Color32;
use palette::{IntoColor, LinSrgb, Mix, Srgb};

/// Marker colour for quakes at or above the strong-magnitude threshold.
pub const STRONG_COLOR: Color32 = Color32::from_rgb(220, 38, 38);
/// Marker colour for weaker quakes.
pub const WEAK_COLOR: Color32 = Color32::from_rgb(37, 99, 235);
/// Fill for points whose colour value is missing.
pub const MISSING_COLOR: Color32 = Color32::GRAY;

// ---------------------------------------------------------------------------
// Continuous colour scales
// ---------------------------------------------------------------------------

/// A colour gradient sampled at evenly spaced stops.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    stops: &'static [(u8, u8, u8)],
}

/// Approximation of Google's Turbo rainbow map.
pub const TURBO: ColorScale = ColorScale {
    stops: &[
        (48, 18, 59),
        (70, 107, 227),
        (41, 187, 236),
        (49, 241, 153),
        (164, 252, 60),
        (237, 208, 58),
        (251, 128, 34),
        (210, 49, 5),
        (122, 4, 3),
    ],
};

/// Approximation of matplotlib's Inferno map.
pub const INFERNO: ColorScale = ColorScale {
    stops: &[
        (0, 0, 4),
        (31, 12, 72),
        (85, 15, 109),
        (136, 34, 106),
        (186, 54, 85),
        (227, 89, 51),
        (249, 140, 10),
        (249, 201, 50),
        (252, 255, 164),
    ],
};

impl ColorScale {
    /// Colour at position `t` in `[0, 1]`. Out-of-range values are clamped.
    pub fn at(&self, t: f64) -> Color32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) } as f32;
        let segments = self.stops.len() - 1;
        let scaled = t * segments as f32;
        let i = (scaled.floor() as usize).min(segments - 1);
        let frac = scaled - i as f32;

        let a = to_linear(self.stops[i]);
        let b = to_linear(self.stops[i + 1]);
        let rgb: Srgb = a.mix(b, frac).into_color();
        Color32::from_rgb(
            (rgb.red * 255.0).round() as u8,
            (rgb.green * 255.0).round() as u8,
            (rgb.blue * 255.0).round() as u8,
        )
    }

    /// Colour for `value` normalised into `range`. A degenerate range maps to
    /// the middle of the scale.
    pub fn map(&self, value: f64, range: (f64, f64)) -> Color32 {
        let (lo, hi) = range;
        let span = hi - lo;
        if span.abs() < f64::EPSILON {
            return self.at(0.5);
        }
        self.at((value - lo) / span)
    }
}

fn to_linear((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Colour of a map marker.
pub fn marker_color(strong: bool) -> Color32 {
    if strong {
        STRONG_COLOR
    } else {
        WEAK_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_hit_first_and_last_stop() {
        assert_eq!(TURBO.at(0.0), Color32::from_rgb(48, 18, 59));
        assert_eq!(TURBO.at(1.0), Color32::from_rgb(122, 4, 3));
        assert_eq!(INFERNO.at(0.0), Color32::from_rgb(0, 0, 4));
        assert_eq!(INFERNO.at(1.0), Color32::from_rgb(252, 255, 164));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(TURBO.at(-3.0), TURBO.at(0.0));
        assert_eq!(TURBO.at(7.0), TURBO.at(1.0));
        assert_eq!(TURBO.at(f64::NAN), TURBO.at(0.0));
    }

    #[test]
    fn map_normalises_into_range() {
        assert_eq!(INFERNO.map(10.0, (10.0, 20.0)), INFERNO.at(0.0));
        assert_eq!(INFERNO.map(20.0, (10.0, 20.0)), INFERNO.at(1.0));
        assert_eq!(INFERNO.map(4.0, (4.0, 4.0)), INFERNO.at(0.5));
    }

    #[test]
    fn marker_colors_distinguish_strength() {
        assert_eq!(marker_color(true), STRONG_COLOR);
        assert_eq!(marker_color(false), WEAK_COLOR);
        assert_ne!(STRONG_COLOR, WEAK_COLOR);
    }
}
