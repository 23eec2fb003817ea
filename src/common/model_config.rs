use serde::{Deserialize, Serialize};

use crate::common::CategoryTable;
use crate::data::paths;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub weights_path: String,
    /// Empty means ONNX Runtime is located through `ORT_DYLIB_PATH`.
    pub ort_lib_path: String,
    pub labels_path: Option<String>,
    pub width: u32,
    pub height: u32,
    pub top_k: usize,
    /// Flip the frame horizontally before inference. Off to match the kiosk,
    /// whose flip never reached the model.
    pub mirror: bool,
    pub intra_threads: usize,
    pub profile: bool,
    pub category_table: CategoryTable,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            weights_path: paths::MODEL.to_string(),
            ort_lib_path: String::new(),
            labels_path: None,
            width: 224,
            height: 224,
            top_k: 1,
            mirror: false,
            intra_threads: 1,
            profile: false,
            category_table: CategoryTable::default(),
        }
    }
}

impl ModelConfig {
    pub fn new(weights_path: &str) -> Self {
        Self {
            weights_path: weights_path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_ort_lib_path(mut self, ort_lib_path: &str) -> Self {
        self.ort_lib_path = ort_lib_path.to_string();
        self
    }

    pub fn with_labels(mut self, labels_path: &str) -> Self {
        self.labels_path = Some(labels_path.to_string());
        self
    }

    pub fn with_input_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_profile(mut self, profile: bool) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_category_table(mut self, table: CategoryTable) -> Self {
        self.category_table = table;
        self
    }
}

impl std::fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Weights File Path: {}\n\
        Labels Path: {}\n\
        OnnxRuntime Lib Path: {}\n\
        Model Input Resolution: {}x{}\n\
        Top K: {}\n\
        Mirror: {}",
               self.weights_path,
               self.labels_path.as_deref().unwrap_or("-"),
               if self.ort_lib_path.is_empty() { "$ORT_DYLIB_PATH" } else { &self.ort_lib_path },
               self.width, self.height, self.top_k, self.mirror)
    }
}
