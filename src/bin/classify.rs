//! Stage two: classify the captured frame and print its waste category.

use std::fs::OpenOptions;

use anyhow::Context;
use waste_sort::data::{sorter_frame, Settings};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load()?;
    let mut classifier = waste_sort::init_classifier(&settings.model)?;
    let verdict = waste_sort::classify_file(&mut classifier, &settings.capture.output_path)?;

    println!("{}", verdict.category.label(settings.locale));
    if verdict.category.is_failure() {
        log::warn!("Nothing recognised in {}", settings.capture.output_path.display());
    }
    if settings.model.profile {
        classifier.print_time();
    }

    if let Some(device) = &settings.dispatch.device_path {
        let mut port = OpenOptions::new()
            .write(true)
            .open(device)
            .with_context(|| format!("Failed to open sorter link {}", device.display()))?;
        sorter_frame::send_command(&mut port, verdict.category)?;
        log::info!("Sent {:?} to {}", verdict.category, device.display());
    }

    Ok(())
}
