use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use super::error::{ProposeError, ProposeResult};

/// 单个 oracle 的奖励接收方。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorAssignment {
    pub transmitter: String,
    pub payee: String,
}

impl OperatorAssignment {
    pub fn new(transmitter: impl Into<String>, payee: impl Into<String>) -> Self {
        Self {
            transmitter: transmitter.into(),
            payee: payee.into(),
        }
    }
}

/// 解析后的规范输入，构建器只消费这一份值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeInput {
    #[serde(default)]
    pub operators: Vec<OperatorAssignment>,
    /// 允许 payee 暂无代币账户，后续再补。
    #[serde(default, alias = "allowFundRecipient", alias = "allow_unfunded_payee")]
    pub allow_unfunded_payee: bool,
}

impl PayeeInput {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn payees(&self) -> Vec<String> {
        self.operators
            .iter()
            .map(|operator| operator.payee.clone())
            .collect()
    }
}

pub(crate) fn parse_pubkey(raw: &str) -> ProposeResult<Pubkey> {
    Pubkey::from_str(raw.trim()).map_err(|err| ProposeError::invalid_address(raw, err))
}
