//! Fixed locations shared by the capture and classify stages.

/// Frame written by `capture` and read back by `classify`.
pub const CAPTURED_IMAGE: &str = "/home/pi/WasteSorting/WasteSorting.jpg";

pub const MODEL: &str = "/home/pi/WasteSorting/tensorflow/model.onnx";

pub const SETTINGS_DIR: &str = "waste_sort";

pub const SETTINGS_FILE: &str = "settings.json";
