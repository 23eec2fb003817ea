use serde::{Deserialize, Serialize};

use crate::common::WasteCategory;

/// One scored class out of the model's output vector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub class_id: usize,
    pub score: f32,
}

impl Classification {
    pub fn new(class_id: usize, score: f32) -> Self {
        Self { class_id, score }
    }
}

/// Outcome of one classification run: the top-k set and the category
/// derived from its first entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteVerdict {
    pub results: Vec<Classification>,
    pub category: WasteCategory,
    pub label: Option<String>,
}

impl WasteVerdict {
    pub fn best(&self) -> Option<&Classification> {
        self.results.first()
    }
}
