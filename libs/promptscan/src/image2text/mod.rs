mod ocr;
pub use ocr::{process_ocr, OcrConfig, OcrResult};
