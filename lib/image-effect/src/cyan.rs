//! Cyan proximity scoring.
//!
//! The score is continuous so that anti-aliased edges get a partial recolor
//! instead of a hard seam.

use crate::colour_space::rgb_to_hsv;

pub const CYAN_HUE: f64 = 0.5;
pub const MAX_HUE_DISTANCE: f64 = 0.08;
pub const MIN_SATURATION: f64 = 0.3;
pub const MIN_VALUE: f64 = 0.3;
pub const MIN_BRIGHTNESS: f64 = 50.0;
pub const MAX_BRIGHTNESS: f64 = 250.0;

const HUE_FALLOFF: f64 = 12.5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CyanMatch {
    pub is_cyan: bool,
    /// In `[0, 1]`, always 0 when `is_cyan` is false.
    pub strength: f64,
}

impl CyanMatch {
    const NONE: CyanMatch = CyanMatch {
        is_cyan: false,
        strength: 0.0,
    };
}

/// Shorter arc between `h` and pure cyan on the unit hue circle.
pub fn hue_distance(h: f64) -> f64 {
    let d = (h - CYAN_HUE).abs();
    d.min(1.0 - d)
}

pub fn classify(r: u8, g: u8, b: u8) -> CyanMatch {
    let brightness = (r as f64 + g as f64 + b as f64) / 3.0;
    if !(MIN_BRIGHTNESS..=MAX_BRIGHTNESS).contains(&brightness) {
        return CyanMatch::NONE;
    }

    let hsv = rgb_to_hsv(r, g, b);
    let distance = hue_distance(hsv.h);

    let is_cyan = distance < MAX_HUE_DISTANCE
        && hsv.s > MIN_SATURATION
        && hsv.v > MIN_VALUE
        && g > r
        && b > r;

    if !is_cyan {
        return CyanMatch::NONE;
    }

    let strength = ((1.0 - distance * HUE_FALLOFF) * hsv.s * hsv.v).clamp(0.0, 1.0);

    CyanMatch {
        is_cyan: true,
        strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_cyan_is_full_strength() {
        let m = classify(0, 255, 255);
        assert!(m.is_cyan);
        assert!((m.strength - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mid_brightness_cyan() {
        let m = classify(0, 128, 128);
        assert!(m.is_cyan);
        assert!((m.strength - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_cyan_colors() {
        for (r, g, b) in [(255, 0, 0), (255, 255, 255), (0, 0, 0), (0, 255, 0), (0, 0, 255)] {
            assert_eq!(classify(r, g, b), CyanMatch::default(), "({r}, {g}, {b})");
        }
    }

    #[test]
    fn test_red_must_not_dominate() {
        // Desaturated teal where red is not below green and blue.
        assert!(!classify(120, 120, 120).is_cyan);
        assert!(!classify(100, 200, 90).is_cyan);
    }

    #[test]
    fn test_low_saturation_rejected() {
        // s = 40 / 200 = 0.2
        assert!(!classify(160, 200, 200).is_cyan);
    }

    #[test]
    fn test_hue_wraparound_distance() {
        assert!((hue_distance(0.5) - 0.0).abs() < 1e-12);
        assert!((hue_distance(0.0) - 0.5).abs() < 1e-12);
        assert!((hue_distance(0.95) - 0.45).abs() < 1e-12);
        assert!((hue_distance(0.42) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_strength_falls_off_with_hue() {
        // Hue slightly towards blue from cyan.
        let near = classify(0, 230, 255);
        let centered = classify(0, 255, 255);
        assert!(near.is_cyan);
        assert!(near.strength < centered.strength);
        assert!(near.strength > 0.0);
    }
}
