use serde::{Deserialize, Serialize};

/// The five outcomes a classification can end in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteCategory {
    RecognitionFailed,
    Hazardous,
    Recyclable,
    Kitchen,
    #[default] Other,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 5] = [
        WasteCategory::RecognitionFailed,
        WasteCategory::Hazardous,
        WasteCategory::Recyclable,
        WasteCategory::Kitchen,
        WasteCategory::Other,
    ];

    pub fn from_str(category: &str) -> Option<Self> {
        match category.to_lowercase().as_str() {
            "recognition_failed" | "failed" => Some(WasteCategory::RecognitionFailed),
            "hazardous" => Some(WasteCategory::Hazardous),
            "recyclable" => Some(WasteCategory::Recyclable),
            "kitchen" | "food" => Some(WasteCategory::Kitchen),
            "other" => Some(WasteCategory::Other),
            _ => None,
        }
    }

    /// Label printed by the sorting kiosk.
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::RecognitionFailed => "识别失败",
            WasteCategory::Hazardous => "有害垃圾",
            WasteCategory::Recyclable => "可回收垃圾",
            WasteCategory::Kitchen => "厨余垃圾",
            WasteCategory::Other => "其他垃圾",
        }
    }

    pub fn as_str_english(&self) -> &'static str {
        match self {
            WasteCategory::RecognitionFailed => "recognition failed",
            WasteCategory::Hazardous => "hazardous waste",
            WasteCategory::Recyclable => "recyclable waste",
            WasteCategory::Kitchen => "kitchen waste",
            WasteCategory::Other => "other waste",
        }
    }

    pub fn label(&self, locale: OutputLocale) -> &'static str {
        match locale {
            OutputLocale::Zh => self.as_str(),
            OutputLocale::En => self.as_str_english(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, WasteCategory::RecognitionFailed)
    }
}

impl std::fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str_english())
    }
}

/// Language of the verdict line written to stdout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLocale {
    #[default] Zh,
    En,
}
