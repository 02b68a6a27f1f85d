use std::fmt;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::descriptor::DescriptorError;
use crate::lander::LanderError;
use crate::ocr2::ProposalDecodeError;

#[derive(Debug, Error)]
pub enum ProposeError {
    #[error("配置缺失或非法: {0}")]
    Configuration(String),
    #[error("输入解析失败: {0}")]
    Resolution(#[from] DescriptorError),
    #[error("{reason}: {}", .failed.join(", "))]
    Validation {
        reason: &'static str,
        failed: Vec<String>,
    },
    #[error("提案中的 transmitter {0} 没有对应的 payee")]
    MissingPayee(Pubkey),
    #[error("地址 {address} 非法: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("提案账户 {proposal} 不存在")]
    ProposalNotFound { proposal: Pubkey },
    #[error("提案账户 {proposal} 的 owner {owner} 不是 OCR2 程序 {program}")]
    ProposalOwner {
        proposal: Pubkey,
        owner: Pubkey,
        program: Pubkey,
    },
    #[error("提案账户解析失败: {0}")]
    ProposalDecode(#[from] ProposalDecodeError),
    #[error("RPC 请求失败: {0}")]
    Rpc(anyhow::Error),
    #[error("指令编码失败: {0}")]
    Encode(#[from] std::io::Error),
    #[error("交易提交失败: {0}")]
    Submission(#[from] LanderError),
    #[error("用户取消提交")]
    Cancelled,
}

pub(crate) const UNFUNDED_PAYEES: &str = "每个 payee 都需要有效的代币接收地址";
pub(crate) const DUPLICATE_TRANSMITTERS: &str = "transmitter 在输入中重复出现";

impl ProposeError {
    pub fn configuration(reason: impl fmt::Display) -> Self {
        Self::Configuration(reason.to_string())
    }

    pub fn invalid_address(address: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ProposeResult<T> = Result<T, ProposeError>;
