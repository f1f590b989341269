//! Environment badge overlay
//!
//! Draws a shadowed, bordered white badge with black upper-case text in the
//! bottom-right corner. Every metric scales with the image width relative to
//! a 128px reference icon.

use crate::{
    Effect, ImageEffectError, ImageEffectResult,
    font::{FontResolver, LabelFont},
};
use derivative::Derivative;
use derive_setters::Setters;
use image::{Rgba, RgbaImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct LabelConfig {
    #[derivative(Default(value = "String::new()"))]
    text: String,

    /// Image width the base metrics are designed for
    #[derivative(Default(value = "128"))]
    base_width: u32,

    #[derivative(Default(value = "12"))]
    base_font: u32,

    #[derivative(Default(value = "3"))]
    base_padding: u32,

    #[derivative(Default(value = "2"))]
    base_border: u32,

    /// Extra large badge style
    #[derivative(Default(value = "1.6"))]
    multiplier: f64,

    #[derivative(Default(value = "2"))]
    shadow_offset: i32,

    #[derivative(Default(value = "Rgba([102, 102, 102, 255])"))]
    shadow_color: Rgba<u8>,

    #[derivative(Default(value = "Rgba([255, 255, 255, 255])"))]
    background_color: Rgba<u8>,

    #[derivative(Default(value = "Rgba([0, 0, 0, 255])"))]
    border_color: Rgba<u8>,

    #[derivative(Default(value = "Rgba([0, 0, 0, 255])"))]
    text_color: Rgba<u8>,
}

/// Size-dependent metrics of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelGeometry {
    pub font_size: u32,
    pub padding: u32,
    pub border_width: u32,
    pub margin: u32,
}

/// Where a badge and its text land on a concrete image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeLayout {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub text_x: i32,
    pub text_y: i32,
}

impl LabelGeometry {
    pub fn padding_left(&self) -> u32 {
        self.padding
    }

    pub fn padding_top(&self) -> u32 {
        self.padding
    }

    pub fn padding_right(&self) -> u32 {
        self.padding * 2
    }

    pub fn padding_bottom(&self) -> u32 {
        self.padding * 2
    }

    /// Anchor a badge around a `text_width` x `text_height` text block.
    pub fn layout(
        &self,
        image_width: u32,
        image_height: u32,
        text_width: u32,
        text_height: u32,
    ) -> BadgeLayout {
        let width = text_width + self.padding_left() + self.padding_right();
        let height = text_height + self.padding_top() + self.padding_bottom();

        let x = image_width as i32 - width as i32 - self.margin as i32;
        let y = image_height as i32 - height as i32 - self.margin as i32;

        BadgeLayout {
            x,
            y,
            width,
            height,
            text_x: x + self.padding_left() as i32,
            text_y: y + self.padding_top() as i32,
        }
    }
}

impl LabelConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self::default().with_text(text.into())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text as it is rendered on the badge.
    pub fn display_text(&self) -> String {
        self.text.to_uppercase()
    }

    pub fn geometry(&self, image_width: u32) -> LabelGeometry {
        let scale = image_width as f64 / self.base_width.max(1) as f64;
        let scaled = |base: u32| (base as f64 * scale * self.multiplier).round() as u32;

        LabelGeometry {
            font_size: scaled(self.base_font).max(6),
            padding: scaled(self.base_padding).max(2),
            border_width: ((self.base_border as f64 * self.multiplier).round() as u32).max(1),
            margin: (image_width / 20).max(4),
        }
    }

    fn validate(&self) -> ImageEffectResult<()> {
        if self.text.trim().is_empty() {
            return Err(ImageEffectError::InvalidParameter(
                "label text cannot be empty".to_string(),
            ));
        }

        if self.base_width == 0 || !(self.multiplier > 0.0) {
            return Err(ImageEffectError::InvalidParameter(format!(
                "invalid label scale: base width {}, multiplier {}",
                self.base_width, self.multiplier
            )));
        }

        Ok(())
    }

    /// Draw the badge onto `image` in place and return where it was placed.
    ///
    /// Text that is wider than the image is not wrapped or truncated; the
    /// badge simply extends past the left edge and is clipped.
    pub fn draw(
        &self,
        image: &mut RgbaImage,
        resolver: &dyn FontResolver,
    ) -> ImageEffectResult<BadgeLayout> {
        self.validate()?;

        let (width, height) = image.dimensions();
        let geometry = self.geometry(width);
        let font = resolver.resolve(geometry.font_size);
        let text = self.display_text();
        let (text_width, text_height) = font.measure(&text);
        let layout = geometry.layout(width, height, text_width, text_height);

        log::debug!(
            "label {text:?} on {width}x{height}: {geometry:?} {layout:?} font={font:?}"
        );

        self.draw_badge(image, &geometry, &layout);
        self.draw_text(image, &font, &layout, &text);

        Ok(layout)
    }

    fn draw_badge(&self, image: &mut RgbaImage, geometry: &LabelGeometry, layout: &BadgeLayout) {
        // Corners are inclusive, so the filled area is one pixel larger than the badge size.
        let (outer_w, outer_h) = (layout.width + 1, layout.height + 1);

        let shadow = Rect::at(layout.x + self.shadow_offset, layout.y + self.shadow_offset)
            .of_size(outer_w, outer_h);
        draw_filled_rect_mut(image, shadow, self.shadow_color);

        let border = Rect::at(layout.x, layout.y).of_size(outer_w, outer_h);
        draw_filled_rect_mut(image, border, self.border_color);

        let inset = geometry.border_width;
        if outer_w > inset * 2 && outer_h > inset * 2 {
            let inner = Rect::at(layout.x + inset as i32, layout.y + inset as i32)
                .of_size(outer_w - inset * 2, outer_h - inset * 2);
            draw_filled_rect_mut(image, inner, self.background_color);
        }
    }

    fn draw_text(&self, image: &mut RgbaImage, font: &LabelFont, layout: &BadgeLayout, text: &str) {
        font.draw(image, layout.text_x, layout.text_y, self.text_color, text);
    }
}

/// A [`LabelConfig`] bound to the resolver that supplies its font.
pub struct LabelEffect<R> {
    config: LabelConfig,
    resolver: R,
}

impl<R: FontResolver> LabelEffect<R> {
    pub fn new(config: LabelConfig, resolver: R) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }
}

impl<R: FontResolver> Effect for LabelEffect<R> {
    fn apply(&self, mut image: RgbaImage) -> ImageEffectResult<RgbaImage> {
        self.config.draw(&mut image, &self.resolver)?;
        Ok(image)
    }
}
