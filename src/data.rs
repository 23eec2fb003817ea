mod capture_config;
mod filesystem_access;
mod label_map;
mod settings;
mod time_calc;
pub mod paths;
pub mod sorter_frame;

pub use capture_config::{CameraProgram, CaptureConfig};
pub use filesystem_access::FsAccess;
pub use label_map::LabelMap;
pub use settings::{DispatchConfig, Settings};
pub use time_calc::TimeCalc;

pub use crate::classification_runners::ort_classifier::image_ops::ImageOps;
pub use crate::classification_runners::ort_classifier::input_wrapper::X;

pub(crate) const CROSS_MARK: &str = "❌";
