mod utils;
pub mod capture_runners;
pub mod classification_runners;
pub mod common;
pub mod data;

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::capture_runners::Camera;
use crate::classification_runners::{InferenceEngine, OrtEngine, WasteClassifier};
use crate::common::{ModelConfig, WasteImage, WasteVerdict};
use crate::data::CaptureConfig;

/// Loads the model and readies a classifier. Any problem with the model file
/// or its input signature is fatal.
pub fn init_classifier(model_details: &ModelConfig) -> anyhow::Result<WasteClassifier<OrtEngine>> {
    log::info!("Initializing classifier\n{}", model_details);
    let engine = OrtEngine::new(model_details)?;
    WasteClassifier::new(engine, model_details)
}

pub fn run_classification<E: InferenceEngine>(classifier: &mut WasteClassifier<E>, image: &WasteImage) -> anyhow::Result<WasteVerdict> {
    let now = Instant::now();

    let verdict = classifier.classify(image)?;

    log::debug!("Processing time: {:?}", now.elapsed());

    Ok(verdict)
}

/// Reads the frame at `path` and classifies it.
pub fn classify_file<E: InferenceEngine, P: AsRef<Path>>(classifier: &mut WasteClassifier<E>, path: P) -> anyhow::Result<WasteVerdict> {
    let image = WasteImage::open(path)?;
    run_classification(classifier, &image)
}

pub fn capture_frame<C: Camera + ?Sized>(camera: &mut C, config: &CaptureConfig) -> anyhow::Result<PathBuf> {
    capture_runners::capture_frame(camera, config)
}
