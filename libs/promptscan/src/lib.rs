pub mod common;
pub mod image2text;
pub mod normalize;
pub mod process;
pub mod share;
pub mod store;
