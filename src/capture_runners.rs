mod camera;
mod fake_camera;
mod still_command;

pub use camera::*;
pub use fake_camera::FakeCamera;
pub use still_command::StillCommandCamera;

use crate::data::{CameraProgram, CaptureConfig};

/// Camera selected by `config.program`.
pub fn camera_for(config: &CaptureConfig) -> anyhow::Result<Box<dyn Camera>> {
    Ok(match config.program {
        CameraProgram::Fake => Box::new(FakeCamera::default()),
        program => Box::new(StillCommandCamera::new(program)?),
    })
}
