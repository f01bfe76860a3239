use crate::{ImageFilterError, ImageFilterResult};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::str::FromStr;

// BT.601 luma weights scaled by 2^14, summing to exactly 1 << 14.
const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// A per-pixel transform applied in place. Dimensions never change.
pub trait Effect {
    fn apply(&self, image: &mut RgbImage);
}

/// Invert the colors of an image
#[derive(Debug, Clone, Copy, Default)]
pub struct Invert;

impl Effect for Invert {
    fn apply(&self, image: &mut RgbImage) {
        for pixel in image.pixels_mut() {
            pixel[0] = 255 - pixel[0];
            pixel[1] = 255 - pixel[1];
            pixel[2] = 255 - pixel[2];
        }
    }
}

/// Grayscale effect configuration
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GrayscaleConfig {
    #[derivative(Default(value = "GrayscaleMode::Luminance"))]
    pub mode: GrayscaleMode,
}

impl GrayscaleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gray(&self, r: u8, g: u8, b: u8) -> u8 {
        match self.mode {
            GrayscaleMode::Luminance => {
                let weighted = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
                ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
            }
            GrayscaleMode::Average => ((r as u32 + g as u32 + b as u32) / 3) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayscaleMode {
    Luminance,
    Average,
}

impl Effect for GrayscaleConfig {
    fn apply(&self, image: &mut RgbImage) {
        for pixel in image.pixels_mut() {
            let gray = self.gray(pixel[0], pixel[1], pixel[2]);

            // Keep three channels so the output encodes as RGB.
            pixel[0] = gray;
            pixel[1] = gray;
            pixel[2] = gray;
        }
    }
}

#[derive(Debug, Clone)]
pub enum Filter {
    Grayscale(GrayscaleConfig),
    Invert,
}

impl Filter {
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Grayscale(_) => "Grayscale",
            Filter::Invert => "Invert",
        }
    }
}

impl Effect for Filter {
    fn apply(&self, image: &mut RgbImage) {
        match self {
            Filter::Grayscale(config) => config.apply(image),
            Filter::Invert => Invert.apply(image),
        }
    }
}

/// Numbered entries of the filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FilterChoice {
    Grayscale = 1,
    Invert = 2,
}

impl FilterChoice {
    pub const ALL: [FilterChoice; 2] = [FilterChoice::Grayscale, FilterChoice::Invert];

    pub fn label(&self) -> &'static str {
        match self {
            FilterChoice::Grayscale => "Escala de Grises",
            FilterChoice::Invert => "Inversión de Colores",
        }
    }

    pub fn into_filter(self, grayscale: GrayscaleConfig) -> Filter {
        match self {
            FilterChoice::Grayscale => Filter::Grayscale(grayscale),
            FilterChoice::Invert => Filter::Invert,
        }
    }
}

/// Parses one whole answer line. Surrounding whitespace is ignored but the
/// rest must be exactly `1` or `2`: blank lines and trailing text such as
/// `2abc` are rejected rather than skipped or truncated.
impl FromStr for FilterChoice {
    type Err = ImageFilterError;

    fn from_str(s: &str) -> ImageFilterResult<Self> {
        let input = s.trim();

        input
            .parse::<u8>()
            .ok()
            .and_then(|n| FilterChoice::try_from(n).ok())
            .ok_or_else(|| ImageFilterError::InvalidSelection(input.to_string()))
    }
}
