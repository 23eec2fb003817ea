//! Reading a model's signature straight from its ONNX graph.

use std::collections::HashSet;

use anyhow::Result;
use ort::tensor::TensorElementType;

use crate::classification_runners::ort_classifier::onnx;
use crate::classification_runners::ort_classifier::top_k::QuantParams;

/// Metadata keys a converter may use to carry the output dequantization.
pub const META_OUTPUT_SCALE: &str = "output_scale";
pub const META_OUTPUT_ZERO_POINT: &str = "output_zero_point";

/// Name, element type and dimensions of one model input or output.
/// A dimension of `0` is dynamic.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorInfo {
    pub name: String,
    pub dtype: TensorElementType,
    pub dims: Vec<usize>,
    pub quantization: Option<QuantParams>,
}

impl TensorInfo {
    pub fn new(name: &str, dtype: TensorElementType, dims: &[usize]) -> Self {
        Self {
            name: name.to_string(),
            dtype,
            dims: dims.to_vec(),
            quantization: None,
        }
    }

    pub fn with_quantization(mut self, q: QuantParams) -> Self {
        self.quantization = Some(q);
        self
    }

    pub fn is_quantized(&self) -> bool {
        matches!(self.dtype, TensorElementType::Uint8 | TensorElementType::Int8)
    }

    pub fn is_float(&self) -> bool {
        matches!(
            self.dtype,
            TensorElementType::Float32
                | TensorElementType::Float16
                | TensorElementType::Bfloat16
                | TensorElementType::Float64
        )
    }

    /// Product of the static dimensions, `None` if any is dynamic.
    pub fn num_elements(&self) -> Option<usize> {
        if self.dims.contains(&0) {
            None
        } else {
            Some(self.dims.iter().product())
        }
    }
}

pub fn ort_dtype_from_onnx_dtype_id(value: i32) -> Option<TensorElementType> {
    match value {
        1 => Some(TensorElementType::Float32),
        2 => Some(TensorElementType::Uint8),
        3 => Some(TensorElementType::Int8),
        4 => Some(TensorElementType::Uint16),
        5 => Some(TensorElementType::Int16),
        6 => Some(TensorElementType::Int32),
        7 => Some(TensorElementType::Int64),
        8 => Some(TensorElementType::String),
        9 => Some(TensorElementType::Bool),
        10 => Some(TensorElementType::Float16),
        11 => Some(TensorElementType::Float64),
        12 => Some(TensorElementType::Uint32),
        13 => Some(TensorElementType::Uint64),
        16 => Some(TensorElementType::Bfloat16),
        _ => None, // undefined, complex, float8
    }
}

/// Graph inputs/outputs that are real tensors, skipping initializers
/// some exporters also list as inputs.
pub(crate) fn io_from_onnx_value_info(
    initializer_names: &HashSet<&str>,
    value_info: &[onnx::ValueInfoProto],
) -> Result<Vec<TensorInfo>> {
    let mut infos = Vec::new();
    for v in value_info.iter() {
        if initializer_names.contains(v.name.as_str()) {
            continue;
        }
        let tensor = match v.r#type.as_ref().and_then(|t| t.value.as_ref()) {
            Some(onnx::type_proto::Value::TensorType(tensor)) => tensor,
            None => anyhow::bail!("Value `{}` is not a tensor", v.name),
        };
        let dtype = ort_dtype_from_onnx_dtype_id(tensor.elem_type).ok_or_else(|| {
            anyhow::anyhow!("Unsupported element type {} for `{}`", tensor.elem_type, v.name)
        })?;

        let dims = tensor
            .shape
            .as_ref()
            .map(|shape| {
                shape
                    .dim
                    .iter()
                    .map(|d| match d.value {
                        Some(onnx::tensor_shape_proto::dimension::Value::DimValue(x)) if x > 0 => x as usize,
                        _ => 0,
                    })
                    .collect()
            })
            .unwrap_or_default();

        infos.push(TensorInfo {
            name: v.name.to_string(),
            dtype,
            dims,
            quantization: None,
        });
    }
    Ok(infos)
}

/// Recovers `(scale, zero_point)` for a quantized graph output.
///
/// Looks first for a `QuantizeLinear` node producing the output and reads its
/// scale / zero-point initializers, then falls back to model metadata.
pub(crate) fn output_quantization(model: &onnx::ModelProto, output_name: &str) -> Option<QuantParams> {
    from_quantize_node(model, output_name).or_else(|| from_metadata(model))
}

/// Attaches the output's dequantization when it is 8-bit quantized. Without
/// recoverable parameters the output stays unset and scores are later read
/// with identity parameters.
pub(crate) fn resolve_output_quantization(model: &onnx::ModelProto, output: &mut TensorInfo) {
    if !output.is_quantized() {
        return;
    }
    match output_quantization(model, &output.name) {
        Some(q) => output.quantization = Some(q),
        None => log::warn!(
            "Output `{}` is {:?} but the model carries no (scale, zero_point); scores stay raw",
            output.name,
            output.dtype,
        ),
    }
}

fn from_quantize_node(model: &onnx::ModelProto, output_name: &str) -> Option<QuantParams> {
    let graph = model.graph.as_ref()?;
    let node = graph
        .node
        .iter()
        .find(|n| n.output.iter().any(|o| o == output_name))?;
    if node.op_type != "QuantizeLinear" {
        return None;
    }

    let initializer = |name: &str| graph.initializer.iter().find(|t| t.name == name);
    let scale = scalar_f32(initializer(node.input.get(1)?)?)?;
    // zero point is optional in QuantizeLinear and defaults to 0
    let zero_point = match node.input.get(2).filter(|n| !n.is_empty()) {
        Some(name) => scalar_i64(initializer(name)?)?,
        None => 0,
    };
    Some(QuantParams::new(scale, zero_point))
}

fn from_metadata(model: &onnx::ModelProto) -> Option<QuantParams> {
    let meta = |key: &str| {
        model
            .metadata_props
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.trim().to_string())
    };
    let scale = meta(META_OUTPUT_SCALE)?.parse::<f32>().ok()?;
    let zero_point = match meta(META_OUTPUT_ZERO_POINT) {
        Some(zp) => zp.parse::<i64>().ok()?,
        None => 0,
    };
    Some(QuantParams::new(scale, zero_point))
}

fn scalar_f32(t: &onnx::TensorProto) -> Option<f32> {
    if let Some(x) = t.float_data.first() {
        return Some(*x);
    }
    let bytes: [u8; 4] = t.raw_data.get(..4)?.try_into().ok()?;
    Some(f32::from_le_bytes(bytes))
}

fn scalar_i64(t: &onnx::TensorProto) -> Option<i64> {
    if let Some(x) = t.int32_data.first() {
        return Some(*x as i64);
    }
    let first = *t.raw_data.first()?;
    match ort_dtype_from_onnx_dtype_id(t.data_type)? {
        TensorElementType::Uint8 => Some(first as i64),
        TensorElementType::Int8 => Some(first as i8 as i64),
        _ => None,
    }
}
