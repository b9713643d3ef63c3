mod utils;
mod path_utils;

pub use utils::get_current_timestamp_millis;
pub use utils::decode_base64;
pub use path_utils::default_storage_path;
pub use path_utils::resolve_storage_path;
