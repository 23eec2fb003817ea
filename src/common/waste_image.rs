use std::path::Path;

use anyhow::{Context, Result};
use image::{DynamicImage, GenericImageView, RgbImage};

/// A captured frame, always held as 8-bit RGB.
#[derive(Debug, Clone, Default)]
pub struct WasteImage {
    pub image: RgbImage,
    pub img_width: u32,
    pub img_height: u32,
}

impl WasteImage {
    pub fn new(image: RgbImage) -> Self {
        let (img_width, img_height) = image.dimensions();
        Self {
            image,
            img_width,
            img_height,
        }
    }

    /// Decodes the file at `path`, whatever its colour type, into RGB.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .with_context(|| format!("Failed to open image {}", path.display()))?;
        Ok(Self::from(image))
    }

    pub fn get_ratio(&self) -> f32 {
        self.img_width as f32 / self.img_height as f32
    }
}

impl std::ops::Deref for WasteImage {
    type Target = RgbImage;

    fn deref(&self) -> &Self::Target {
        &self.image
    }
}

impl From<DynamicImage> for WasteImage {
    fn from(image: DynamicImage) -> Self {
        let (w, h) = image.dimensions();
        Self {
            image: image.to_rgb8(),
            img_width: w,
            img_height: h,
        }
    }
}

impl From<RgbImage> for WasteImage {
    fn from(image: RgbImage) -> Self {
        Self::new(image)
    }
}
