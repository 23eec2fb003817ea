use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::paths;

/// Still-capture program driving the camera.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraProgram {
    #[default] Raspistill,
    LibcameraStill,
    Fake,
}

impl CameraProgram {
    pub fn from_str(program: &str) -> Option<Self> {
        match program.to_lowercase().as_str() {
            "raspistill" => Some(CameraProgram::Raspistill),
            "libcamera-still" | "libcamera_still" => Some(CameraProgram::LibcameraStill),
            "fake" => Some(CameraProgram::Fake),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraProgram::Raspistill => "raspistill",
            CameraProgram::LibcameraStill => "libcamera-still",
            CameraProgram::Fake => "fake",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub program: CameraProgram,
    pub width: u32,
    pub height: u32,
    pub exposure_mode: String,
    pub awb_mode: String,
    /// Manual shutter override in microseconds; `None` keeps auto exposure.
    pub shutter_speed_us: Option<u32>,
    #[serde(with = "duration_ms")]
    pub settle_delay: Duration,
    pub output_path: PathBuf,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            program: CameraProgram::default(),
            width: 800,
            height: 600,
            exposure_mode: "auto".to_string(),
            awb_mode: "auto".to_string(),
            shutter_speed_us: None,
            settle_delay: Duration::from_millis(100),
            output_path: PathBuf::from(paths::CAPTURED_IMAGE),
        }
    }
}

impl CaptureConfig {
    pub fn with_program(mut self, program: CameraProgram) -> Self {
        self.program = program;
        self
    }

    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn with_output_path<P: Into<PathBuf>>(mut self, output_path: P) -> Self {
        self.output_path = output_path.into();
        self
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_kiosk_camera() {
        let config = CaptureConfig::default();
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.exposure_mode, "auto");
        assert_eq!(config.awb_mode, "auto");
        assert_eq!(config.shutter_speed_us, None);
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.output_path, PathBuf::from(paths::CAPTURED_IMAGE));
    }

    #[test]
    fn settle_delay_in_milliseconds() {
        let config: CaptureConfig =
            serde_json::from_str(r#"{"settle_delay": 250, "program": "fake"}"#).unwrap();
        assert_eq!(config.settle_delay, Duration::from_millis(250));
        assert_eq!(config.program, CameraProgram::Fake);
        assert_eq!(config.width, 800);
    }

    #[test]
    fn program_names() {
        assert_eq!(CameraProgram::from_str("libcamera-still"), Some(CameraProgram::LibcameraStill));
        assert_eq!(CameraProgram::from_str("RASPISTILL"), Some(CameraProgram::Raspistill));
        assert_eq!(CameraProgram::from_str("webcam"), None);
    }
}
