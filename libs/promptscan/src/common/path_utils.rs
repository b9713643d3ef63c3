use anyhow::Result;
use std::fs;
use std::path::PathBuf;

const DATA_DIR: &str = ".promptscan";
const DATABASE_FILE: &str = "promptscan.db";

/// `~/.promptscan/promptscan.db`, creating the directory if needed.
pub fn default_storage_path() -> Result<PathBuf> {
    let mut path = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Unable to find home directory"))?;
    path.push(DATA_DIR);
    fs::create_dir_all(&path)
        .map_err(|e| anyhow::anyhow!("Unable to create {} directory: {}", path.display(), e))?;
    path.push(DATABASE_FILE);
    Ok(path)
}

/// Uses `path` when given, the default location otherwise.
pub fn resolve_storage_path(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some(p) if !p.trim().is_empty() => {
            let path_buf = PathBuf::from(p);
            if let Some(parent) = path_buf.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    anyhow::anyhow!("Unable to create {} directory: {}", parent.display(), e)
                })?;
            }
            Ok(path_buf)
        }
        _ => default_storage_path(),
    }
}
