//! Font resolution for label rendering.
//!
//! A [`FontResolver`] turns a pixel size into something that can measure and
//! draw text. Resolution never fails: when no outline font can be loaded the
//! built-in bitmap font is returned instead.

use crate::{ImageEffectError, ImageEffectResult, bitmap_font::BitmapFont};
use ab_glyph::{Font, FontVec, PxScale};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::{
    fmt,
    path::{Path, PathBuf},
};

pub enum LabelFont {
    Outline { font: FontVec, scale: PxScale },
    Bitmap(BitmapFont),
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelFont::Outline { scale, .. } => f
                .debug_struct("Outline")
                .field("scale", &(scale.x, scale.y))
                .finish(),
            LabelFont::Bitmap(font) => f.debug_tuple("Bitmap").field(font).finish(),
        }
    }
}

impl LabelFont {
    /// Load an outline font from `path` so that its em square is `size` pixels.
    pub fn load(path: &Path, size: u32) -> ImageEffectResult<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec_and_index(data, 0)
            .map_err(|e| ImageEffectError::Font(format!("{}: {e}", path.display())))?;

        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        let px = size as f32 * font.height_unscaled() / units_per_em;

        Ok(LabelFont::Outline {
            font,
            scale: PxScale::from(px),
        })
    }

    pub fn bitmap(size: u32) -> Self {
        LabelFont::Bitmap(BitmapFont::for_size(size))
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, LabelFont::Bitmap(_))
    }

    /// Width and height of the rendered `text` in pixels.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            LabelFont::Outline { font, scale } => text_size(*scale, font, text),
            LabelFont::Bitmap(font) => font.measure(text),
        }
    }

    pub fn draw(&self, image: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, text: &str) {
        match self {
            LabelFont::Outline { font, scale } => {
                draw_text_mut(image, color, x, y, *scale, font, text)
            }
            LabelFont::Bitmap(font) => font.draw(image, x, y, color, text),
        }
    }
}

pub trait FontResolver {
    /// Return a font rendering at roughly `size` pixels. Must not fail.
    fn resolve(&self, size: u32) -> LabelFont;
}

impl<F> FontResolver for F
where
    F: Fn(u32) -> LabelFont,
{
    fn resolve(&self, size: u32) -> LabelFont {
        self(size)
    }
}

/// Always hands out the built-in bitmap font. Needs no filesystem access.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFontResolver;

impl FontResolver for BitmapFontResolver {
    fn resolve(&self, size: u32) -> LabelFont {
        LabelFont::bitmap(size)
    }
}

/// Probes well-known bold sans-serif font files across Linux, macOS and Windows.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SystemFontResolver {
    #[derivative(Default(value = "default_font_paths()"))]
    paths: Vec<PathBuf>,
}

fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "/Windows/Fonts/arial.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

impl SystemFontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl FontResolver for SystemFontResolver {
    fn resolve(&self, size: u32) -> LabelFont {
        for path in self.paths.iter().filter(|p| p.exists()) {
            match LabelFont::load(path, size) {
                Ok(font) => {
                    log::debug!("using font {} at {size}px", path.display());
                    return font;
                }
                Err(e) => log::warn!("skip font {}: {e}", path.display()),
            }
        }

        log::debug!("no system font found, using built-in bitmap font at {size}px");
        LabelFont::bitmap(size)
    }
}
