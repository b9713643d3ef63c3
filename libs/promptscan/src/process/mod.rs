mod types;
mod utils;

pub use types::{ProcessorConfig, ScanOutcome};
pub use utils::{
    append_to_previous, build_outcome, combine_texts, ocr_images, scan_base64_images,
    scan_image_paths,
};
