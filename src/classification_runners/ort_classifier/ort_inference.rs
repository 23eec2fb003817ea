use anyhow::Result;

use crate::classification_runners::inference_process::{InferenceEngine, InferenceProcess};
use crate::classification_runners::ort_classifier::image_ops::{self, InputLayout};
use crate::classification_runners::ort_classifier::model_inspect::TensorInfo;
use crate::classification_runners::ort_classifier::top_k::{self, QuantParams};
use crate::common::{CategoryTable, Classification, ModelConfig, WasteImage, WasteVerdict};
use crate::data::{ImageOps, LabelMap, TimeCalc, X};

/// Runs `engine` on an already laid out input and returns the `top_k` best
/// classes, dequantizing the output first when the model quantizes it.
pub fn classify_image<E: InferenceEngine>(engine: &mut E, input: X, top_k: usize) -> Result<Vec<Classification>> {
    let y = engine.engine_run(input)?;
    select_top_k(engine.output_info(), &y, top_k)
}

fn select_top_k(output: &TensorInfo, y: &X, k: usize) -> Result<Vec<Classification>> {
    let mut scores = y.squeeze()?;
    if output.is_quantized() {
        let q = output.quantization.unwrap_or(QuantParams::IDENTITY);
        top_k::dequantize(&mut scores, q);
    }
    top_k::top_k(&scores, k)
}

/// Image classifier mapping the winning class to a waste category.
#[derive(Debug)]
pub struct WasteClassifier<E: InferenceEngine> {
    engine: E,
    width: u32,
    height: u32,
    layout: InputLayout,
    normalize: bool,
    mirror: bool,
    top_k: usize,
    table: CategoryTable,
    labels: Option<LabelMap>,
    profile: bool,
    pub infer_time: TimeCalc,
}

impl<E: InferenceEngine> WasteClassifier<E> {
    pub fn new(engine: E, config: &ModelConfig) -> Result<Self> {
        if config.top_k == 0 {
            anyhow::bail!("top_k must be at least 1");
        }

        let input = engine.input_info();
        let layout = Self::check_input(input, config.width, config.height)?;

        if let Some(n) = engine.output_info().num_elements() {
            if config.top_k > n {
                anyhow::bail!("top_k = {} exceeds the model's {} classes", config.top_k, n);
            }
        }

        let labels = match &config.labels_path {
            Some(path) => {
                let labels = LabelMap::load(path)?;
                let missing = config.category_table.unlabelled_indices(&labels);
                if !missing.is_empty() {
                    log::warn!("Category table routes class indices {:?} that {} does not define", missing, path);
                }
                Some(labels)
            }
            None => None,
        };

        Ok(Self {
            width: config.width,
            height: config.height,
            layout,
            normalize: input.is_float(),
            mirror: config.mirror,
            top_k: config.top_k,
            table: config.category_table.clone(),
            labels,
            profile: config.profile,
            infer_time: TimeCalc::default(),
            engine,
        })
    }

    /// Checks a 4-D image input against the configured size and works out
    /// its channel order. Dynamic dimensions accept any size.
    fn check_input(input: &TensorInfo, width: u32, height: u32) -> Result<InputLayout> {
        let dims = &input.dims;
        if dims.len() != 4 {
            anyhow::bail!("Model input `{}` has shape {:?}, expected 4 dimensions", input.name, dims);
        }
        if dims[0] > 1 {
            anyhow::bail!("Model input `{}` expects a batch of {}, only single frames are supported", input.name, dims[0]);
        }
        let (layout, h, w) = match (dims[1], dims[3]) {
            (_, 3) => (InputLayout::Nhwc, dims[1], dims[2]),
            (3, _) => (InputLayout::Nchw, dims[2], dims[3]),
            _ => anyhow::bail!("Model input `{}` with shape {:?} is not a 3-channel image", input.name, dims),
        };
        let fits = |model: usize, wanted: u32| model == 0 || model == wanted as usize;
        if !fits(h, height) || !fits(w, width) {
            anyhow::bail!(
                "Model input `{}` is {}x{} but frames are resized to {}x{}",
                input.name, w, h, width, height,
            );
        }
        Ok(layout)
    }

    pub fn classify(&mut self, image: &WasteImage) -> Result<WasteVerdict> {
        let profile = self.profile;
        self.forward(image, profile)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn print_time(&self) {
        log::info!(
            "Avg: {:?} over {} runs | Preprocess: {:?} | Inference: {:?} | Postprocess: {:?}",
            self.infer_time.avg(),
            self.infer_time.runs(),
            self.infer_time.avg_i(0),
            self.infer_time.avg_i(1),
            self.infer_time.avg_i(2),
        );
    }
}

impl<E: InferenceEngine> InferenceProcess for WasteClassifier<E> {
    type Input = WasteImage;
    type Output = WasteVerdict;

    fn preprocess(&self, x: &WasteImage) -> Result<X> {
        let mut ops = vec![ImageOps::Resize(self.width, self.height)];
        if self.mirror {
            ops.push(ImageOps::Mirror);
        }
        let frame = ImageOps::apply(x.image.clone(), &ops)?;
        image_ops::to_tensor(&frame, self.layout, self.normalize)
    }

    fn inference(&mut self, x: X) -> Result<X> {
        self.engine.engine_run(x)
    }

    fn postprocess(&self, y: X) -> Result<WasteVerdict> {
        let results = select_top_k(self.engine.output_info(), &y, self.top_k)?;
        let best = results
            .first()
            .ok_or_else(|| anyhow::anyhow!("Model produced no classification"))?;

        let category = self.table.category_for(best.class_id as i64);
        let label = self
            .labels
            .as_ref()
            .and_then(|labels| labels.get(best.class_id))
            .map(str::to_string);

        log::info!(
            "Class {} ({}) score {:.4} -> {:?}",
            best.class_id,
            label.as_deref().unwrap_or("unlabelled"),
            best.score,
            category,
        );

        Ok(WasteVerdict { results, category, label })
    }

    fn record_time(&mut self, stages: &[std::time::Duration]) {
        for (i, d) in stages.iter().enumerate() {
            self.infer_time.add_or_push(i, *d);
        }
        self.infer_time.finish_run();
    }
}
