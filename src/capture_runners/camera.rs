use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::CaptureConfig;

/// A still camera driven through preview and capture.
pub trait Camera {
    fn configure(&mut self, config: &CaptureConfig) -> Result<()>;

    fn start_preview(&mut self) -> Result<()>;

    /// Writes one JPEG frame to `path`, replacing whatever was there.
    fn capture(&mut self, path: &Path) -> Result<()>;

    fn stop_preview(&mut self) -> Result<()>;

    /// True when the camera waits out the settle delay itself during
    /// [`Camera::capture`], so the caller must not sleep for it again.
    fn settles_during_capture(&self) -> bool {
        false
    }
}

/// Stops the preview when dropped, so it is released on every exit path.
struct PreviewGuard<'a, C: Camera + ?Sized> {
    camera: &'a mut C,
    active: bool,
}

impl<'a, C: Camera + ?Sized> PreviewGuard<'a, C> {
    fn start(camera: &'a mut C) -> Result<Self> {
        camera.start_preview().context("Failed to start camera preview")?;
        Ok(Self { camera, active: true })
    }

    fn stop(mut self) -> Result<()> {
        self.active = false;
        self.camera.stop_preview().context("Failed to stop camera preview")
    }
}

impl<C: Camera + ?Sized> Drop for PreviewGuard<'_, C> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.camera.stop_preview() {
                log::error!("Failed to stop camera preview: {e:#}");
            }
        }
    }
}

/// Configures `camera`, previews for the settle delay and writes one frame to
/// `config.output_path`. Blocking; a failure at any step is returned as is.
pub fn capture_frame<C: Camera + ?Sized>(camera: &mut C, config: &CaptureConfig) -> Result<PathBuf> {
    camera.configure(config)?;
    log::info!(
        "Capturing {}x{} (exposure {}, awb {}) to {}",
        config.width, config.height, config.exposure_mode, config.awb_mode,
        config.output_path.display(),
    );

    let guard = PreviewGuard::start(camera)?;
    if !guard.camera.settles_during_capture() {
        std::thread::sleep(config.settle_delay);
    }
    guard
        .camera
        .capture(&config.output_path)
        .with_context(|| format!("Failed to capture frame to {}", config.output_path.display()))?;
    guard.stop()?;

    log::info!("Frame written to {}", config.output_path.display());
    Ok(config.output_path.clone())
}
