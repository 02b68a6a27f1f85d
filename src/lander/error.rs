use std::fmt;

use solana_client::client_error::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LanderError {
    #[error("RPC 提交失败: {0}")]
    Rpc(#[from] ClientError),
    #[error("{0}")]
    Fatal(String),
}

impl LanderError {
    pub fn fatal(reason: impl fmt::Display) -> Self {
        Self::Fatal(reason.to_string())
    }
}
