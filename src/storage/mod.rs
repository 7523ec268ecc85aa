pub mod config;
pub mod tasks;

use std::io;
use std::path::{Path, PathBuf};

/// 获取 ~/.tasklist/ 目录路径（无 home 目录时返回 None）
pub fn tasklist_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tasklist"))
}

/// 确保父目录存在
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

/// 从 TOML 文件加载反序列化数据
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// 整体替换文件内容：先写同目录临时文件，再 rename 覆盖
pub fn replace_file(path: &Path, content: &[u8]) -> io::Result<()> {
    ensure_parent_dir(path)?;

    let mut tmp_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path).inspect_err(|_| {
        let _ = std::fs::remove_file(&tmp_path);
    })
}
