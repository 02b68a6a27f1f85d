use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub ocr2: Ocr2Config,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GlobalConfig {
    /// 环境变量 `OCR2_PAYEES_RPC_URL` 优先。
    #[serde(default, deserialize_with = "super::deserialize_rpc_url")]
    pub rpc_url: Option<String>,
    /// processed / confirmed / finalized
    #[serde(default = "super::default_commitment")]
    pub commitment: String,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            commitment: super::default_commitment(),
            wallet: WalletConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub private_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "super::default_logging_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    #[serde(default = "super::default_timezone_offset_hours")]
    pub timezone_offset_hours: i8,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: super::default_logging_level(),
            json: false,
            timezone_offset_hours: super::default_timezone_offset_hours(),
        }
    }
}

/// OCR2 程序相关配置。
#[derive(Debug, Clone, Deserialize)]
pub struct Ocr2Config {
    #[serde(default = "super::default_program_id")]
    pub program_id: String,
    /// 奖励代币 Mint，命令行 `--link` 与环境变量 `LINK` 优先。
    #[serde(default)]
    pub link_mint: Option<String>,
    /// 部署描述文件（RDD）路径。
    #[serde(default)]
    pub rdd_path: Option<PathBuf>,
}

impl Default for Ocr2Config {
    fn default() -> Self {
        Self {
            program_id: super::default_program_id(),
            link_mint: None,
            rdd_path: None,
        }
    }
}
