//! 部署描述文件（RDD）：聚合器合约与节点运营方的 JSON 记录。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("读取部署描述失败 {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("解析部署描述失败 {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("部署描述中不存在聚合器 {0}")]
    UnknownAggregator(String),
    #[error("聚合器 {aggregator} 引用了未知的运营方 {operator}")]
    UnknownOperator {
        aggregator: String,
        operator: String,
    },
    #[error("运营方 {0} 未配置 ocrNodeAddress")]
    MissingNodeAddress(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeploymentDescriptor {
    #[serde(default)]
    pub contracts: BTreeMap<String, ContractDescriptor>,
    #[serde(default)]
    pub operators: BTreeMap<String, OperatorDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContractDescriptor {
    #[serde(default)]
    pub oracles: Vec<OracleDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OracleDescriptor {
    pub operator: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDescriptor {
    #[serde(default)]
    pub ocr_node_address: Vec<String>,
    pub admin_address: String,
}

impl OperatorDescriptor {
    pub fn transmitter(&self, name: &str) -> Result<&str, DescriptorError> {
        self.ocr_node_address
            .first()
            .map(String::as_str)
            .ok_or_else(|| DescriptorError::MissingNodeAddress(name.to_string()))
    }
}

impl DeploymentDescriptor {
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let contents = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| DescriptorError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn aggregator(&self, state: &str) -> Result<&ContractDescriptor, DescriptorError> {
        self.contracts
            .get(state)
            .ok_or_else(|| DescriptorError::UnknownAggregator(state.to_string()))
    }

    pub fn operator(
        &self,
        aggregator: &str,
        name: &str,
    ) -> Result<&OperatorDescriptor, DescriptorError> {
        self.operators
            .get(name)
            .ok_or_else(|| DescriptorError::UnknownOperator {
                aggregator: aggregator.to_string(),
                operator: name.to_string(),
            })
    }
}
