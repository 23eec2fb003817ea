pub(crate) mod onnx;
mod ort_engine;
mod ort_inference;
pub mod image_ops;
pub mod input_wrapper;
pub mod model_inspect;
pub mod top_k;

pub use ort_engine::*;
pub use ort_inference::*;
