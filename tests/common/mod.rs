use ort::tensor::TensorElementType;
use waste_sort::classification_runners::model_inspect::TensorInfo;
use waste_sort::classification_runners::top_k::QuantParams;
use waste_sort::classification_runners::InferenceEngine;
use waste_sort::data::X;

/// Engine returning a canned output vector and remembering what it was fed.
#[derive(Debug)]
pub struct FixedEngine {
    pub input: TensorInfo,
    pub output: TensorInfo,
    pub scores: Vec<f32>,
    pub seen: Vec<X>,
}

#[allow(dead_code)]
impl FixedEngine {
    /// Float scores behind a uint8 NHWC 224x224 input.
    pub fn float(scores: &[f32]) -> Self {
        Self {
            input: TensorInfo::new("image", TensorElementType::Uint8, &[1, 224, 224, 3]),
            output: TensorInfo::new("scores", TensorElementType::Float32, &[1, scores.len()]),
            scores: scores.to_vec(),
            seen: Vec::new(),
        }
    }

    /// Quantized uint8 scores with the given dequantization.
    pub fn quantized(raw: &[u8], scale: f32, zero_point: i64) -> Self {
        let mut engine = Self::float(&raw.iter().map(|&r| r as f32).collect::<Vec<_>>());
        engine.output = TensorInfo::new("scores", TensorElementType::Uint8, &[1, raw.len()])
            .with_quantization(QuantParams::new(scale, zero_point));
        engine
    }

    pub fn with_input(mut self, dtype: TensorElementType, dims: &[usize]) -> Self {
        self.input = TensorInfo::new("image", dtype, dims);
        self
    }
}

impl InferenceEngine for FixedEngine {
    fn input_info(&self) -> &TensorInfo {
        &self.input
    }

    fn output_info(&self) -> &TensorInfo {
        &self.output
    }

    fn engine_run(&mut self, x: X) -> anyhow::Result<X> {
        self.seen.push(x);
        X::from_shape_vec(&[1, self.scores.len()], self.scores.clone())
    }
}

/// Score vector of `n` classes peaking at `best`.
#[allow(dead_code)]
pub fn peaked(n: usize, best: usize) -> Vec<f32> {
    (0..n).map(|i| if i == best { 0.8 } else { 0.2 / n as f32 }).collect()
}
