pub mod bitmap_font;
pub mod colour_space;
pub mod cyan;
pub mod font;
pub mod label_effect;
pub mod recolor_effect;

use image::RgbaImage;

pub use colour_space::{Hsv, hsv_to_rgb, rgb_to_hsv};
pub use cyan::CyanMatch;
pub use font::{BitmapFontResolver, FontResolver, LabelFont, SystemFontResolver};
pub use label_effect::{BadgeLayout, LabelConfig, LabelEffect, LabelGeometry};
pub use recolor_effect::RecolorConfig;

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug)]
pub enum ImageEffectError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Font error: {0}")]
    Font(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub trait Effect {
    fn apply(&self, image: RgbaImage) -> ImageEffectResult<RgbaImage>;
}

/// Run `effects` in order, feeding each output into the next one.
pub fn apply_all(image: RgbaImage, effects: &[&dyn Effect]) -> ImageEffectResult<RgbaImage> {
    effects
        .iter()
        .try_fold(image, |image, effect| effect.apply(image))
}
