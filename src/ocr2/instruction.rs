use borsh::BorshSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use super::PUBKEY_BYTES;

pub const PROPOSE_PAYEES_DISCRIMINATOR: [u8; 8] = [76, 228, 45, 220, 157, 7, 182, 228];

/// 聚合器程序的指令编码接口，构建器只通过它生成指令。
pub trait PayeesInstructionEncoder: Send + Sync {
    fn program_id(&self) -> Pubkey;

    fn propose_payees(
        &self,
        token_mint: &Pubkey,
        payees: &[Pubkey],
        proposal: &Pubkey,
        authority: &Pubkey,
    ) -> std::io::Result<Instruction>;
}

#[derive(BorshSerialize)]
struct ProposePayeesArgs {
    token_mint: [u8; PUBKEY_BYTES],
    payees: Vec<[u8; PUBKEY_BYTES]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ocr2Program {
    program_id: Pubkey,
}

impl Ocr2Program {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }
}

impl PayeesInstructionEncoder for Ocr2Program {
    fn program_id(&self) -> Pubkey {
        self.program_id
    }

    fn propose_payees(
        &self,
        token_mint: &Pubkey,
        payees: &[Pubkey],
        proposal: &Pubkey,
        authority: &Pubkey,
    ) -> std::io::Result<Instruction> {
        let args = ProposePayeesArgs {
            token_mint: token_mint.to_bytes(),
            payees: payees.iter().map(|payee| payee.to_bytes()).collect(),
        };
        let encoded = borsh::to_vec(&args)?;

        let mut data = Vec::with_capacity(PROPOSE_PAYEES_DISCRIMINATOR.len() + encoded.len());
        data.extend_from_slice(&PROPOSE_PAYEES_DISCRIMINATOR);
        data.extend_from_slice(&encoded);

        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(*proposal, false),
                AccountMeta::new_readonly(*authority, true),
            ],
            data,
        })
    }
}
