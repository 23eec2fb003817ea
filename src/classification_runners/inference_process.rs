use std::time::{Duration, Instant};

use crate::classification_runners::ort_classifier::model_inspect::TensorInfo;
use crate::data::X;
use crate::utils;

/// Anything that can run a single-input, single-output model.
///
/// The returned tensor carries the raw output values widened to `f32`;
/// quantized outputs are NOT dequantized here.
pub trait InferenceEngine {
    fn input_info(&self) -> &TensorInfo;

    fn output_info(&self) -> &TensorInfo;

    fn engine_run(&mut self, x: X) -> anyhow::Result<X>;
}

pub trait InferenceProcess {
    type Input;
    type Output;

    /// Pre-process the input data.
    fn preprocess(&self, x: &Self::Input) -> anyhow::Result<X>;

    /// Executes the model on the preprocessed data.
    fn inference(&mut self, x: X) -> anyhow::Result<X>;

    /// Post-process the model's output.
    fn postprocess(&self, y: X) -> anyhow::Result<Self::Output>;

    /// Executes the full pipeline.
    fn run(&mut self, x: &Self::Input) -> anyhow::Result<Self::Output> {
        let ys = self.preprocess(x)?;
        let ys = self.inference(ys)?;
        self.postprocess(ys)
    }

    /// Executes the full pipeline, tracing the time spent in each stage.
    fn forward(&mut self, x: &Self::Input, profile: bool) -> anyhow::Result<Self::Output> {
        let start = Instant::now();

        let t_pre = Instant::now();
        let ys = self.preprocess(x)?;
        let t_pre = t_pre.elapsed();
        let mut elapsed = utils::trace("TIME", "Preprocessing input", start, Duration::ZERO);

        let t_exe = Instant::now();
        let ys = self.inference(ys)?;
        let t_exe = t_exe.elapsed();
        elapsed = utils::trace("TIME", "Inference run", start, elapsed);

        let t_post = Instant::now();
        let ys = self.postprocess(ys)?;
        let t_post = t_post.elapsed();
        utils::trace("TIME", "Postprocessing", start, elapsed);

        self.record_time(&[t_pre, t_exe, t_post]);
        if profile {
            log::info!("> Preprocess: {t_pre:?} | Inference: {t_exe:?} | Postprocess: {t_post:?}");
        }

        Ok(ys)
    }

    /// Called by [`InferenceProcess::forward`] with the per-stage durations.
    fn record_time(&mut self, _stages: &[Duration]) {}
}
