//! 应用配置加载

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::{load_toml, tasklist_dir};

/// 覆盖任务文档路径的环境变量
pub const TASKS_FILE_ENV: &str = "TASKS_FILE";

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Web 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// 静态前端目录（不配置则只提供 API）
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// 任务文档路径
    #[serde(default)]
    pub tasks_file: Option<PathBuf>,
}

/// 默认配置文件路径: ~/.tasklist/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    tasklist_dir().map(|dir| dir.join("config.toml"))
}

/// 加载配置（不存在或无法解析则返回默认值）
pub fn load_config(path: Option<&Path>) -> Config {
    let path = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => return Config::default(),
    };
    if !path.exists() {
        return Config::default();
    }
    match load_toml(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Config::default()
        }
    }
}

/// 解析任务文档路径
///
/// 优先级: 命令行参数 > TASKS_FILE 环境变量 > 配置文件 > ~/.tasklist/tasks.json
pub fn resolve_tasks_file(cli: Option<PathBuf>, config: &Config) -> PathBuf {
    let from_env = std::env::var_os(TASKS_FILE_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    pick_tasks_file(cli, from_env, config)
}

fn pick_tasks_file(cli: Option<PathBuf>, env: Option<PathBuf>, config: &Config) -> PathBuf {
    cli.or(env)
        .or_else(|| config.storage.tasks_file.clone())
        .or_else(|| tasklist_dir().map(|dir| dir.join("tasks.json")))
        .unwrap_or_else(|| PathBuf::from("data").join("tasks.json"))
}
