//! OCR2 聚合器程序绑定：提案账户解码与 `propose_payees` 指令编码。

mod instruction;
mod proposal;

pub use instruction::{Ocr2Program, PayeesInstructionEncoder};
pub use proposal::{ProposalDecodeError, ProposalState};

#[cfg(test)]
pub(crate) use proposal::{MAX_ORACLES, ProposedOracle};

pub(crate) const PUBKEY_BYTES: usize = 32;
