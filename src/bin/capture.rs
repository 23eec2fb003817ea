//! Stage one: write a single frame from the camera to the shared image path.

use waste_sort::capture_runners;
use waste_sort::data::Settings;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load()?;
    let mut camera = capture_runners::camera_for(&settings.capture)?;
    waste_sort::capture_frame(camera.as_mut(), &settings.capture)?;

    Ok(())
}
