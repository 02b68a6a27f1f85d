use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::Signature;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TxResponse {
    pub hash: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ContractResponse {
    pub tx: TxResponse,
    pub contract: String,
}

/// 提交成功后的结果：交易签名与目标聚合器地址。
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ProposePayeesResponse {
    pub responses: Vec<ContractResponse>,
}

impl ProposePayeesResponse {
    pub fn new(signature: &Signature, state: &str) -> Self {
        Self {
            responses: vec![ContractResponse {
                tx: TxResponse {
                    hash: signature.to_string(),
                    address: state.to_string(),
                },
                contract: state.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountReport {
    pub pubkey: String,
    pub is_signer: bool,
    pub is_writable: bool,
}

/// dry-run 输出的原始指令。
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionReport {
    pub program_id: String,
    pub accounts: Vec<AccountReport>,
    pub data: String,
}

impl From<&Instruction> for InstructionReport {
    fn from(ix: &Instruction) -> Self {
        Self {
            program_id: ix.program_id.to_string(),
            accounts: ix
                .accounts
                .iter()
                .map(|meta| AccountReport {
                    pubkey: meta.pubkey.to_string(),
                    is_signer: meta.is_signer,
                    is_writable: meta.is_writable,
                })
                .collect(),
            data: general_purpose::STANDARD.encode(&ix.data),
        }
    }
}
