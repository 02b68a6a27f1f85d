use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use super::PUBKEY_BYTES;

pub const MAX_ORACLES: usize = 19;

pub const PROPOSAL_ACCOUNT_DISCRIMINATOR: [u8; 8] = [26, 94, 189, 187, 116, 136, 53, 33];

const SIGNER_BYTES: usize = 20;

// zero-copy `Proposal` 布局（含 8 字节 discriminator）
const VERSION_OFFSET: usize = 8;
const OWNER_OFFSET: usize = VERSION_OFFSET + 1;
const STATE_OFFSET: usize = OWNER_OFFSET + PUBKEY_BYTES;
const F_OFFSET: usize = STATE_OFFSET + 1;
const TOKEN_MINT_OFFSET: usize = F_OFFSET + 1 + 1 + 4;
const ORACLES_OFFSET: usize = TOKEN_MINT_OFFSET + PUBKEY_BYTES;
pub(crate) const ORACLE_SLOT_SIZE: usize = PUBKEY_BYTES + SIGNER_BYTES + 4 + PUBKEY_BYTES;
const ORACLES_LEN_OFFSET: usize = ORACLES_OFFSET + MAX_ORACLES * ORACLE_SLOT_SIZE;
pub(crate) const PROPOSAL_MIN_LEN: usize = ORACLES_LEN_OFFSET + 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProposalDecodeError {
    #[error("提案账户数据过短: {actual} 字节，至少需要 {expected} 字节")]
    TooShort { expected: usize, actual: usize },
    #[error("提案账户 discriminator 不匹配")]
    Discriminator,
    #[error("提案 oracle 数量 {len} 超过上限 {}", MAX_ORACLES)]
    LenOutOfRange { len: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposedOracle {
    pub transmitter: Pubkey,
    pub signer: [u8; SIGNER_BYTES],
    pub payee: Pubkey,
}

/// 链上提案快照。`oracles` 保留全部槽位，仅前 `len` 个有效。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalState {
    pub version: u8,
    pub owner: Pubkey,
    pub state: u8,
    pub f: u8,
    pub token_mint: Pubkey,
    pub oracles: Vec<ProposedOracle>,
    pub len: u64,
}

impl ProposalState {
    pub fn decode(data: &[u8]) -> Result<Self, ProposalDecodeError> {
        if data.len() < PROPOSAL_MIN_LEN {
            return Err(ProposalDecodeError::TooShort {
                expected: PROPOSAL_MIN_LEN,
                actual: data.len(),
            });
        }
        if data[..8] != PROPOSAL_ACCOUNT_DISCRIMINATOR {
            return Err(ProposalDecodeError::Discriminator);
        }

        let len = read_u64(data, ORACLES_LEN_OFFSET);
        if len > MAX_ORACLES as u64 {
            return Err(ProposalDecodeError::LenOutOfRange { len });
        }

        let oracles = (0..MAX_ORACLES)
            .map(|slot| decode_oracle(data, ORACLES_OFFSET + slot * ORACLE_SLOT_SIZE))
            .collect();

        Ok(Self {
            version: data[VERSION_OFFSET],
            owner: read_pubkey(data, OWNER_OFFSET),
            state: data[STATE_OFFSET],
            f: data[F_OFFSET],
            token_mint: read_pubkey(data, TOKEN_MINT_OFFSET),
            oracles,
            len,
        })
    }

    /// 截断到逻辑长度后的 oracle 序列，即 payee 列表的权威顺序。
    pub fn active_oracles(&self) -> &[ProposedOracle] {
        let len = (self.len as usize).min(self.oracles.len());
        &self.oracles[..len]
    }

    pub fn transmitters(&self) -> Vec<Pubkey> {
        self.active_oracles()
            .iter()
            .map(|oracle| oracle.transmitter)
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn encode(&self) -> Vec<u8> {
        let mut data = vec![0u8; PROPOSAL_MIN_LEN];
        data[..8].copy_from_slice(&PROPOSAL_ACCOUNT_DISCRIMINATOR);
        data[VERSION_OFFSET] = self.version;
        data[OWNER_OFFSET..OWNER_OFFSET + PUBKEY_BYTES].copy_from_slice(self.owner.as_ref());
        data[STATE_OFFSET] = self.state;
        data[F_OFFSET] = self.f;
        data[TOKEN_MINT_OFFSET..TOKEN_MINT_OFFSET + PUBKEY_BYTES]
            .copy_from_slice(self.token_mint.as_ref());
        for (slot, oracle) in self.oracles.iter().take(MAX_ORACLES).enumerate() {
            let base = ORACLES_OFFSET + slot * ORACLE_SLOT_SIZE;
            data[base..base + PUBKEY_BYTES].copy_from_slice(oracle.transmitter.as_ref());
            let signer = base + PUBKEY_BYTES;
            data[signer..signer + SIGNER_BYTES].copy_from_slice(&oracle.signer);
            let payee = signer + SIGNER_BYTES + 4;
            data[payee..payee + PUBKEY_BYTES].copy_from_slice(oracle.payee.as_ref());
        }
        data[ORACLES_LEN_OFFSET..ORACLES_LEN_OFFSET + 8].copy_from_slice(&self.len.to_le_bytes());
        data
    }
}

fn decode_oracle(data: &[u8], base: usize) -> ProposedOracle {
    let mut signer = [0u8; SIGNER_BYTES];
    signer.copy_from_slice(&data[base + PUBKEY_BYTES..base + PUBKEY_BYTES + SIGNER_BYTES]);
    ProposedOracle {
        transmitter: read_pubkey(data, base),
        signer,
        payee: read_pubkey(data, base + PUBKEY_BYTES + SIGNER_BYTES + 4),
    }
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; PUBKEY_BYTES];
    bytes.copy_from_slice(&data[offset..offset + PUBKEY_BYTES]);
    Pubkey::new_from_array(bytes)
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}
