use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use half::{bf16, f16};
use ndarray::{Array, IxDyn};
use ort::{
    session::builder::GraphOptimizationLevel,
    session::{Session, SessionInputValue},
    tensor::TensorElementType,
    value::{DynValue, Value},
};
use prost::Message;

use crate::classification_runners::inference_process::InferenceEngine;
use crate::classification_runners::ort_classifier::model_inspect::{self, TensorInfo};
use crate::classification_runners::ort_classifier::onnx;
use crate::common::ModelConfig;
use crate::data::{CROSS_MARK, X};
use crate::utils::human_bytes;

/// ONNX Runtime session for a single-input, single-output classifier.
#[derive(Debug)]
pub struct OrtEngine {
    session: Session,
    input: TensorInfo,
    output: TensorInfo,
}

impl OrtEngine {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let model_proto = Self::load_onnx(&config.weights_path)?;

        let graph = match &model_proto.graph {
            Some(graph) => graph,
            None => anyhow::bail!("No graph found in {}. Failed to parse ONNX model.", config.weights_path),
        };

        let mut params: usize = 0;
        let mut initializer_names: HashSet<&str> = HashSet::new();
        for tensor_proto in graph.initializer.iter() {
            initializer_names.insert(&tensor_proto.name);
            params += tensor_proto.dims.iter().product::<i64>().max(0) as usize;
        }

        let mut inputs = model_inspect::io_from_onnx_value_info(&initializer_names, &graph.input)?;
        let mut outputs = model_inspect::io_from_onnx_value_info(&initializer_names, &graph.output)?;
        if inputs.len() != 1 || outputs.len() != 1 {
            anyhow::bail!(
                "{CROSS_MARK} Expected a model with one input and one output, found {} and {}",
                inputs.len(),
                outputs.len(),
            );
        }
        let input = inputs.remove(0);
        let mut output = outputs.remove(0);

        model_inspect::resolve_output_quantization(&model_proto, &mut output);

        if !config.ort_lib_path.is_empty() {
            if let Err(e) = ort::init_from(&config.ort_lib_path).commit() {
                anyhow::bail!("{CROSS_MARK} Failed to load ONNX Runtime from {}: {:?}", config.ort_lib_path, e);
            }
        }

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(config.intra_threads.max(1))?
            .commit_from_file(&config.weights_path)
            .with_context(|| format!("{CROSS_MARK} Failed to build session for {}", config.weights_path))?;

        let opset = model_proto.opset_import.first().map(|o| o.version).unwrap_or_default();
        log::info!(
            "Backend: ONNXRuntime | Producer: {} | Opset: {} | Input: {} {:?} {:?} | Output: {} {:?} {:?} | Params: {}",
            model_proto.producer_name,
            opset,
            input.name, input.dtype, input.dims,
            output.name, output.dtype, output.dims,
            human_bytes(params as f64),
        );

        Ok(Self { session, input, output })
    }

    pub(crate) fn load_onnx<P: AsRef<Path>>(p: P) -> Result<onnx::ModelProto> {
        let p = p.as_ref();
        let f = std::fs::read(p).with_context(|| format!("Failed to read model file {}", p.display()))?;
        onnx::ModelProto::decode(f.as_slice())
            .map_err(|e| anyhow::anyhow!("Failed to decode ONNX model {}: {}", p.display(), e))
    }

    fn tensor_preprocess(x: X, dtype: &TensorElementType) -> Result<DynValue> {
        let x = match dtype {
            TensorElementType::Float32 => Value::from_array(x.0)?.into_dyn(),
            TensorElementType::Float16 => Value::from_array(x.mapv(f16::from_f32))?.into_dyn(),
            TensorElementType::Bfloat16 => Value::from_array(x.mapv(bf16::from_f32))?.into_dyn(),
            TensorElementType::Float64 => Value::from_array(x.mapv(|x_| x_ as f64))?.into_dyn(),
            TensorElementType::Uint8 => Value::from_array(x.mapv(|x_| x_.clamp(0., 255.) as u8))?.into_dyn(),
            TensorElementType::Int8 => Value::from_array(x.mapv(|x_| (x_ - 128.).clamp(-128., 127.) as i8))?.into_dyn(),
            _ => anyhow::bail!("Unsupported model input type: {:?}", dtype),
        };
        Ok(x)
    }

    fn tensor_postprocess(x: &DynValue, dtype: &TensorElementType) -> Result<Array<f32, IxDyn>> {
        fn extract<T>(x: &DynValue, map_fn: impl Fn(T) -> f32) -> Result<Array<f32, IxDyn>>
        where
            T: Clone + 'static + ort::tensor::PrimitiveTensorElementType,
        {
            Ok(x.try_extract_array::<T>()?.mapv(map_fn))
        }
        match dtype {
            TensorElementType::Float32 => extract::<f32>(x, |x| x),
            TensorElementType::Float16 => extract::<f16>(x, f16::to_f32),
            TensorElementType::Bfloat16 => extract::<bf16>(x, bf16::to_f32),
            TensorElementType::Float64 => extract::<f64>(x, |x| x as f32),
            TensorElementType::Uint8 => extract::<u8>(x, |x| x as f32),
            TensorElementType::Int8 => extract::<i8>(x, |x| x as f32),
            TensorElementType::Int32 => extract::<i32>(x, |x| x as f32),
            TensorElementType::Int64 => extract::<i64>(x, |x| x as f32),
            _ => Err(anyhow::anyhow!("Unsupported ort tensor type: {:?}", dtype)),
        }
    }
}

impl InferenceEngine for OrtEngine {
    fn input_info(&self) -> &TensorInfo {
        &self.input
    }

    fn output_info(&self) -> &TensorInfo {
        &self.output
    }

    fn engine_run(&mut self, x: X) -> Result<X> {
        let xs_ = vec![SessionInputValue::from(Self::tensor_preprocess(x, &self.input.dtype)?)];
        let outputs = self.session.run(&xs_[..])?;
        let y = Self::tensor_postprocess(&outputs[self.output.name.as_str()], &self.output.dtype)?;
        Ok(X::from(y))
    }
}
