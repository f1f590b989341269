//! Cyan background replacement.
//!
//! Strong cyan pixels take the target hue and saturation outright, weak ones
//! (usually anti-aliased edges) are blended towards it by their strength. In
//! both cases brightness follows the target, modulated by the original value
//! so shading in the artwork survives.

use crate::{
    Effect, ImageEffectError, ImageEffectResult,
    colour_space::{Hsv, hsv_to_rgb, rgb_to_hsv},
    cyan,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgb, Rgba, RgbaImage};
use rayon::prelude::*;

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct RecolorConfig {
    #[derivative(Default(value = "Rgb([0, 255, 255])"))]
    target: Rgb<u8>,

    /// Pixels with alpha below this are left untouched
    #[derivative(Default(value = "20"))]
    alpha_threshold: u8,

    #[derivative(Default(value = "0.1"))]
    min_strength: f64,

    /// Above this the pixel is replaced, at or below it is blended
    #[derivative(Default(value = "0.6"))]
    strong_strength: f64,
}

impl RecolorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::default().with_target(Rgb([r, g, b]))
    }

    pub fn target(&self) -> Rgb<u8> {
        self.target
    }

    fn validate(&self) -> ImageEffectResult<()> {
        let valid = (0.0..=1.0).contains(&self.min_strength)
            && (0.0..=1.0).contains(&self.strong_strength)
            && self.min_strength <= self.strong_strength;

        if !valid {
            return Err(ImageEffectError::InvalidParameter(format!(
                "strength thresholds must satisfy 0 <= min ({}) <= strong ({}) <= 1",
                self.min_strength, self.strong_strength
            )));
        }

        Ok(())
    }

    /// Recolor a single pixel. Returns `None` when the pixel is left as is.
    pub fn recolor_pixel(&self, pixel: Rgba<u8>, target: &Hsv) -> Option<Rgba<u8>> {
        let [r, g, b, a] = pixel.0;
        if a < self.alpha_threshold {
            return None;
        }

        let cyan = cyan::classify(r, g, b);
        if !cyan.is_cyan || cyan.strength <= self.min_strength {
            return None;
        }

        let orig = rgb_to_hsv(r, g, b);
        let brightness_factor = 0.8 + orig.v * 0.4;
        let adjusted = Hsv::new(target.h, target.s, target.v * brightness_factor);

        let new = if cyan.strength > self.strong_strength {
            adjusted
        } else {
            orig.lerp(&adjusted, cyan.strength)
        };

        let [nr, ng, nb] = hsv_to_rgb(new);
        Some(Rgba([nr, ng, nb, a]))
    }

    /// Build a recolored copy of `image`, leaving the input untouched.
    pub fn recolor(&self, image: &RgbaImage) -> ImageEffectResult<RgbaImage> {
        self.apply(image.clone())
    }
}

impl Effect for RecolorConfig {
    fn apply(&self, image: RgbaImage) -> ImageEffectResult<RgbaImage> {
        self.validate()?;

        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Ok(image);
        }

        let Rgb([tr, tg, tb]) = self.target;
        let target = rgb_to_hsv(tr, tg, tb);
        let row_stride = width as usize * 4;
        let mut pixels = image.into_raw();

        let changed: usize = pixels
            .par_chunks_mut(row_stride)
            .map(|row| {
                let mut count = 0;
                for chunk in row.chunks_exact_mut(4) {
                    let pixel = Rgba([chunk[0], chunk[1], chunk[2], chunk[3]]);
                    if let Some(new) = self.recolor_pixel(pixel, &target) {
                        chunk.copy_from_slice(&new.0);
                        count += 1;
                    }
                }
                count
            })
            .sum();

        log::debug!(
            "recolored {changed}/{} pixels of {width}x{height} image towards {:?}",
            width as usize * height as usize,
            self.target.0
        );

        RgbaImage::from_raw(width, height, pixels).ok_or_else(|| {
            ImageEffectError::InvalidParameter("pixel buffer does not match image size".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(1, 1, Rgba(pixel))
    }

    #[test]
    fn test_transparent_pixel_untouched() {
        let config = RecolorConfig::from_rgb(255, 107, 53);
        for alpha in [0, 5, 19] {
            let input = single([0, 255, 255, alpha]);
            let output = config.recolor(&input).unwrap();
            assert_eq!(output.as_raw(), input.as_raw());
        }
    }

    #[test]
    fn test_non_cyan_untouched_for_any_target() {
        // the last one has saturation 0.2, below the cyan floor
        let pixels = [
            [0, 0, 0, 255],
            [255, 0, 0, 255],
            [255, 255, 255, 255],
            [40, 200, 40, 255],
            [160, 200, 200, 255],
        ];
        for target in [(255, 107, 53), (155, 89, 182), (0, 0, 0), (255, 255, 255)] {
            let config = RecolorConfig::from_rgb(target.0, target.1, target.2);
            for pixel in pixels {
                let output = config.recolor(&single(pixel)).unwrap();
                assert_eq!(output.get_pixel(0, 0).0, pixel);
            }
        }
    }

    #[test]
    fn test_strong_cyan_takes_target_hue() {
        let config = RecolorConfig::from_rgb(0, 200, 200);
        let output = config.recolor(&single([0, 255, 255, 255])).unwrap();
        let [r, g, b, a] = output.get_pixel(0, 0).0;

        let hsv = rgb_to_hsv(r, g, b);
        assert!((hsv.h - 0.5).abs() < 0.01);
        assert_eq!(a, 255);
        // target value 200/255 scaled by 1.2
        assert_eq!([r, g, b], [0, 240, 240]);
    }

    #[test]
    fn test_strong_cyan_replaced_with_orange() {
        let config = RecolorConfig::from_rgb(255, 107, 53);
        let output = config.recolor(&single([0, 255, 255, 200])).unwrap();
        let [r, g, b, a] = output.get_pixel(0, 0).0;

        let target = rgb_to_hsv(255, 107, 53);
        // value overflows to 1.2 before clamping, which skews the hue slightly
        let hsv = rgb_to_hsv(r, g, b);
        assert!((hsv.h - target.h).abs() < 0.02);
        assert!(r > g && g > b);
        assert_eq!(a, 200);
    }

    #[test]
    fn test_strong_cyan_full_output() {
        // strength 0.70, value 220/255 gives brightness factor 1.145
        let cases = [
            ((255, 107, 53), [255, 122, 60]),
            ((155, 89, 182), [177, 101, 208]),
        ];
        for (target, expected) in cases {
            let config = RecolorConfig::from_rgb(target.0, target.1, target.2);
            let output = config.recolor(&single([0, 200, 220, 255])).unwrap();
            assert_eq!(output.get_pixel(0, 0).0, [expected[0], expected[1], expected[2], 255]);
        }
    }

    #[test]
    fn test_weak_cyan_is_blended() {
        let m = cyan::classify(60, 130, 130);
        assert!(m.is_cyan && m.strength > 0.1 && m.strength <= 0.6);
        assert!((m.strength - 0.2745).abs() < 1e-3);

        // h 0.3627, s 0.6652, v 0.6455 after blending towards red
        let config = RecolorConfig::from_rgb(255, 0, 0);
        let output = config.recolor(&single([60, 130, 130, 255])).unwrap();
        assert_eq!(output.get_pixel(0, 0).0, [55, 164, 74, 255]);

        let orig = rgb_to_hsv(60, 130, 130);
        let target = rgb_to_hsv(255, 0, 0);
        let w = m.strength;
        let blended = Hsv::new(
            orig.h * (1.0 - w) + target.h * w,
            orig.s * (1.0 - w) + target.s * w,
            orig.v * (1.0 - w) + target.v * (0.8 + 0.4 * orig.v) * w,
        );
        assert!((blended.h - 0.3627).abs() < 1e-3);
        assert!((blended.s - 0.6652).abs() < 1e-3);
        assert!((blended.v - 0.6455).abs() < 1e-3);
        assert_eq!(hsv_to_rgb(blended), [55, 164, 74]);
    }

    #[test]
    fn test_input_not_mutated() {
        let input = RgbaImage::from_fn(8, 4, |x, _| {
            if x < 4 {
                Rgba([0, 255, 255, 255])
            } else {
                Rgba([20, 20, 20, 255])
            }
        });
        let copy = input.clone();
        let output = RecolorConfig::from_rgb(155, 89, 182).recolor(&input).unwrap();

        assert_eq!(input, copy);
        assert_ne!(output.get_pixel(0, 0), input.get_pixel(0, 0));
        assert_eq!(output.get_pixel(7, 3), input.get_pixel(7, 3));
    }

    #[test]
    fn test_parallel_matches_per_pixel() {
        let input = RgbaImage::from_fn(37, 23, |x, y| {
            Rgba([(x * 3) as u8, (100 + y * 6) as u8, (120 + x * 3) as u8, 255])
        });
        let config = RecolorConfig::from_rgb(52, 152, 219);
        let target = rgb_to_hsv(52, 152, 219);
        let output = config.recolor(&input).unwrap();

        for (x, y, pixel) in input.enumerate_pixels() {
            let expected = config.recolor_pixel(*pixel, &target).unwrap_or(*pixel);
            assert_eq!(*output.get_pixel(x, y), expected);
        }
    }

    #[test]
    fn test_empty_image() {
        let output = RecolorConfig::new().recolor(&RgbaImage::new(0, 0)).unwrap();
        assert_eq!(output.dimensions(), (0, 0));
    }

    #[test]
    fn test_invalid_thresholds() {
        let config = RecolorConfig::new()
            .with_min_strength(0.7)
            .with_strong_strength(0.6);
        assert!(matches!(
            config.apply(RgbaImage::new(1, 1)),
            Err(ImageEffectError::InvalidParameter(_))
        ));
    }
}
