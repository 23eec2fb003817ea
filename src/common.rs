mod category_table;
mod classification;
mod model_config;
mod waste_category;
mod waste_image;

pub use category_table::*;
pub use classification::*;
pub use model_config::*;
pub use waste_category::*;
pub use waste_image::*;
