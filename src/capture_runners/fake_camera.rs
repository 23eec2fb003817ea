use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::capture_runners::Camera;
use crate::data::CaptureConfig;

/// Camera stand-in that writes a synthetic, seeded frame as a real JPEG.
#[derive(Debug, Clone)]
pub struct FakeCamera {
    seed: u64,
    config: CaptureConfig,
    previewing: bool,
    fail_capture: bool,
    /// Calls received, in order.
    pub calls: Vec<&'static str>,
}

impl Default for FakeCamera {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FakeCamera {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            config: CaptureConfig::default(),
            previewing: false,
            fail_capture: false,
            calls: Vec::new(),
        }
    }

    /// Makes every capture fail as if the sensor had gone away.
    pub fn failing(mut self) -> Self {
        self.fail_capture = true;
        self
    }

    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    /// Vertical gradient with a bright square in the middle, plus noise.
    pub fn render(&self) -> RgbImage {
        let (w, h) = (self.config.width, self.config.height);
        let mut rng = StdRng::seed_from_u64(self.seed);
        RgbImage::from_fn(w, h, |x, y| {
            let noise: u8 = rng.gen_range(0..16);
            let in_object = x > w / 3 && x < 2 * w / 3 && y > h / 3 && y < 2 * h / 3;
            if in_object {
                Rgb([220 + noise / 2, 180 + noise, 40 + noise])
            } else {
                let shade = (y * 160 / h.max(1)) as u8;
                Rgb([shade + noise, shade + noise, shade + noise])
            }
        })
    }
}

impl Camera for FakeCamera {
    fn configure(&mut self, config: &CaptureConfig) -> Result<()> {
        self.calls.push("configure");
        if config.width == 0 || config.height == 0 {
            anyhow::bail!("Invalid resolution {}x{}", config.width, config.height);
        }
        self.config = config.clone();
        Ok(())
    }

    fn start_preview(&mut self) -> Result<()> {
        self.calls.push("start_preview");
        self.previewing = true;
        Ok(())
    }

    fn capture(&mut self, path: &Path) -> Result<()> {
        self.calls.push("capture");
        if !self.previewing {
            anyhow::bail!("Capture requested before the preview was started");
        }
        if self.fail_capture {
            anyhow::bail!("Camera is not responding");
        }
        self.render()
            .save_with_format(path, ImageFormat::Jpeg)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn stop_preview(&mut self) -> Result<()> {
        self.calls.push("stop_preview");
        self.previewing = false;
        Ok(())
    }
}
