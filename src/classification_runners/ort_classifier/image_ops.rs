//! Functions to turn a captured frame into a model input tensor.

use anyhow::{bail, Result};
use fast_image_resize::{
    images::Image as FirImage,
    pixels::PixelType,
    FilterType, ResizeAlg, ResizeOptions, Resizer,
};
use image::{imageops, RgbImage};
use ndarray::Array;

use crate::classification_runners::ort_classifier::input_wrapper::X;

/// Memory order the model expects for its image input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLayout {
    Nhwc,
    Nchw,
}

/// Frame level transformations, applied in order by [`ImageOps::apply`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageOps {
    /// Exact resize with a Lanczos3 convolution.
    Resize(u32, u32),
    /// Horizontal flip.
    Mirror,
}

impl ImageOps {
    pub fn apply(image: RgbImage, ops: &[ImageOps]) -> Result<RgbImage> {
        let mut image = image;
        for op in ops {
            image = match *op {
                ImageOps::Resize(w, h) => resize(image, w, h)?,
                ImageOps::Mirror => imageops::flip_horizontal(&image),
            };
        }
        Ok(image)
    }
}

pub fn to_fir_image<'a>(image: RgbImage) -> Result<FirImage<'a>> {
    let (width, height) = image.dimensions();
    Ok(FirImage::from_vec_u8(width, height, image.into_raw(), PixelType::U8x3)?)
}

fn resize(image: RgbImage, target_w: u32, target_h: u32) -> Result<RgbImage> {
    if target_w == 0 || target_h == 0 {
        bail!("Cannot resize to {}x{}", target_w, target_h);
    }
    if image.dimensions() == (target_w, target_h) {
        return Ok(image);
    }

    let src = to_fir_image(image)?;
    let mut dst = FirImage::new(target_w, target_h, PixelType::U8x3);
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    Resizer::new().resize(&src, &mut dst, &options)?;

    RgbImage::from_raw(target_w, target_h, dst.into_vec())
        .ok_or_else(|| anyhow::anyhow!("Resized buffer does not fit {}x{}", target_w, target_h))
}

/// Packs an RGB frame into a batch of one.
///
/// With `normalize` the 0..=255 channel values are scaled to 0..=1, as float
/// models expect; integer models take the raw values.
pub fn to_tensor(image: &RgbImage, layout: InputLayout, normalize: bool) -> Result<X> {
    let (w, h) = (image.width() as usize, image.height() as usize);
    let buf = image.as_raw();
    if buf.len() != w * h * 3 {
        bail!("Unexpected buffer size: got {}, expected {}", buf.len(), w * h * 3);
    }

    let scale = if normalize { 1.0 / 255.0 } else { 1.0 };
    let hwc: Vec<f32> = buf.iter().map(|&v| v as f32 * scale).collect();

    let x = match layout {
        InputLayout::Nhwc => Array::from_shape_vec((1, h, w, 3), hwc)?.into_dyn(),
        InputLayout::Nchw => Array::from_shape_vec((1, h, w, 3), hwc)?
            .permuted_axes([0, 3, 1, 2])
            .as_standard_layout()
            .into_owned()
            .into_dyn(),
    };
    Ok(X::from(x))
}
