use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::AppConfig;

pub const DEFAULT_CONFIG_PATHS: &[&str] = &["ocr2-payees.yaml", "config/ocr2-payees.yaml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
}

/// 加载配置：显式路径必须存在，缺省时依次尝试默认路径，都不存在则使用默认配置。
pub fn load_config(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    if let Some(explicit) = path {
        return try_load_file(&explicit)?.ok_or(ConfigError::NotFound(explicit));
    }

    for candidate in DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from) {
        if let Some(config) = try_load_file(&candidate)? {
            return Ok(config);
        }
    }

    debug!(target: "config", "未找到配置文件，使用默认配置");
    Ok(AppConfig::default())
}

fn try_load_file(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: AppConfig =
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(target: "config", path = %path.display(), "配置文件已加载");
    Ok(Some(config))
}
