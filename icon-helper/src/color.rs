use anyhow::{Result, bail};
use image::Rgb;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fmt, str::FromStr};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap());

/// `#rrggbb`, with or without the leading `#`.
pub fn is_valid_hex_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

/// A validated `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(Rgb<u8>);

impl HexColor {
    pub fn parse(color: &str) -> Result<Self> {
        let Some(caps) = HEX_COLOR.captures(color) else {
            bail!("Invalid hex color '{color}'. Use format #rrggbb (e.g., #ff6b35)");
        };

        let channel = |i: usize| u8::from_str_radix(&caps[i], 16);
        Ok(Self(Rgb([channel(1)?, channel(2)?, channel(3)?])))
    }

    pub fn rgb(&self) -> Rgb<u8> {
        self.0
    }
}

impl FromStr for HexColor {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
