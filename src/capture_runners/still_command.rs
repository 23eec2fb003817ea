use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::capture_runners::Camera;
use crate::data::{CameraProgram, CaptureConfig};

/// Pi camera driven through its still-capture program (`raspistill` or
/// `libcamera-still`). The program owns the sensor for the duration of one
/// capture, so the settle delay is handed to it as the preview timeout.
#[derive(Debug, Clone)]
pub struct StillCommandCamera {
    program: CameraProgram,
    config: CaptureConfig,
    previewing: bool,
}

impl StillCommandCamera {
    pub fn new(program: CameraProgram) -> Result<Self> {
        if let CameraProgram::Fake = program {
            anyhow::bail!("The fake camera has no capture program");
        }
        Ok(Self {
            program,
            config: CaptureConfig::default(),
            previewing: false,
        })
    }

    pub fn command(&self, path: &Path) -> Command {
        let c = &self.config;
        let timeout_ms = c.settle_delay.as_millis().max(1).to_string();
        let width = c.width.to_string();
        let height = c.height.to_string();
        let shutter = c.shutter_speed_us.map(|us| us.to_string());

        let mut cmd = Command::new(self.program.as_str());
        cmd.arg("-o").arg(path).args(["-t", timeout_ms.as_str()]);

        match self.program {
            CameraProgram::LibcameraStill => {
                let exposure = match c.exposure_mode.as_str() {
                    "auto" => "normal",
                    other => other,
                };
                cmd.args(["--width", width.as_str(), "--height", height.as_str()])
                    .args(["--exposure", exposure, "--awb", c.awb_mode.as_str()]);
                if let Some(us) = &shutter {
                    cmd.args(["--shutter", us.as_str()]);
                }
            }
            _ => {
                cmd.args(["-w", width.as_str(), "-h", height.as_str()])
                    .args(["-ex", c.exposure_mode.as_str(), "-awb", c.awb_mode.as_str()]);
                if let Some(us) = &shutter {
                    cmd.args(["-ss", us.as_str()]);
                }
            }
        }
        cmd
    }
}

impl Camera for StillCommandCamera {
    fn configure(&mut self, config: &CaptureConfig) -> Result<()> {
        self.config = config.clone();
        Ok(())
    }

    fn start_preview(&mut self) -> Result<()> {
        log::debug!("{} preview armed", self.program.as_str());
        self.previewing = true;
        Ok(())
    }

    fn capture(&mut self, path: &Path) -> Result<()> {
        if !self.previewing {
            anyhow::bail!("Capture requested before the preview was started");
        }
        let mut cmd = self.command(path);
        log::debug!("Running {:?}", cmd);
        let output = cmd
            .output()
            .with_context(|| format!("Camera program `{}` is unavailable", self.program.as_str()))?;
        if !output.status.success() {
            anyhow::bail!(
                "`{}` exited with {}: {}",
                self.program.as_str(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim(),
            );
        }
        Ok(())
    }

    fn stop_preview(&mut self) -> Result<()> {
        self.previewing = false;
        Ok(())
    }

    fn settles_during_capture(&self) -> bool {
        true
    }
}
