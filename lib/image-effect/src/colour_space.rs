//! RGB <-> HSV conversion
//!
//! Hue, saturation and value are all normalized to `[0, 1]`. Converting back
//! truncates each channel after scaling by 255, so a round trip may be off by
//! one per channel.

/// A color in HSV space, every component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Linear interpolation towards `other` by `weight` (0 keeps `self`).
    pub fn lerp(&self, other: &Hsv, weight: f64) -> Hsv {
        Hsv {
            h: self.h * (1.0 - weight) + other.h * weight,
            s: self.s * (1.0 - weight) + other.s * weight,
            v: self.v * (1.0 - weight) + other.v * weight,
        }
    }
}

pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max == min {
        return Hsv::new(0.0, 0.0, max);
    }

    let delta = max - min;
    let s = delta / max;

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;

    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Hsv::new((h / 6.0).rem_euclid(1.0), s, max)
}

pub fn hsv_to_rgb(hsv: Hsv) -> [u8; 3] {
    let Hsv { h, s, v } = hsv;

    let (r, g, b) = if s == 0.0 {
        (v, v, v)
    } else {
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    };

    [to_channel(r), to_channel(g), to_channel(b)]
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [u8; 3], expected: [u8; 3]) {
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!(
                (*a as i16 - *e as i16).abs() <= 1,
                "{actual:?} differs from {expected:?} by more than 1"
            );
        }
    }

    #[test]
    fn test_primary_hues() {
        assert_eq!(rgb_to_hsv(255, 0, 0), Hsv::new(0.0, 1.0, 1.0));

        let cyan = rgb_to_hsv(0, 255, 255);
        assert!((cyan.h - 0.5).abs() < 1e-9);
        assert_eq!(cyan.s, 1.0);
        assert_eq!(cyan.v, 1.0);

        let blue = rgb_to_hsv(0, 0, 255);
        assert!((blue.h - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_gray_has_no_saturation() {
        let gray = rgb_to_hsv(128, 128, 128);
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
        assert!((gray.v - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(hsv_to_rgb(gray), [128, 128, 128]);
    }

    #[test]
    fn test_round_trip_within_one() {
        for r in (0..=255u8).step_by(17) {
            for g in (0..=255u8).step_by(51) {
                for b in (0..=255u8).step_by(15) {
                    let [nr, ng, nb] = hsv_to_rgb(rgb_to_hsv(r, g, b));
                    assert_close([nr, ng, nb], [r, g, b]);
                }
            }
        }

        assert_close(hsv_to_rgb(rgb_to_hsv(255, 107, 53)), [255, 107, 53]);
        assert_close(hsv_to_rgb(rgb_to_hsv(155, 89, 182)), [155, 89, 182]);
    }

    #[test]
    fn test_out_of_range_value_is_clamped() {
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 1.0, 1.2)), [255, 0, 0]);
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 0.0, 1.5)), [255, 255, 255]);
    }

    #[test]
    fn test_hue_of_one_wraps_to_red() {
        assert_eq!(hsv_to_rgb(Hsv::new(1.0, 1.0, 1.0)), [255, 0, 0]);
    }

    #[test]
    fn test_lerp() {
        let a = Hsv::new(0.2, 0.4, 0.6);
        let b = Hsv::new(0.6, 0.8, 1.0);
        assert_eq!(a.lerp(&b, 0.0), a);

        let mid = a.lerp(&b, 0.5);
        assert!((mid.h - 0.4).abs() < 1e-9);
        assert!((mid.s - 0.6).abs() < 1e-9);
        assert!((mid.v - 0.8).abs() < 1e-9);
    }
}
