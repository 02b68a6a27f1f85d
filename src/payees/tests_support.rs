use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use async_trait::async_trait;
use solana_sdk::account::Account;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::{Account as TokenAccount, AccountState};

use super::source::AccountSource;
use crate::ocr2::{Ocr2Program, PayeesInstructionEncoder};

#[derive(Default)]
pub(crate) struct FakeAccounts {
    accounts: HashMap<Pubkey, Account>,
    failing: HashSet<Pubkey>,
    panicking: HashSet<Pubkey>,
    fetches: Arc<AtomicUsize>,
}

impl FakeAccounts {
    pub(crate) fn with(mut self, address: Pubkey, account: Account) -> Self {
        self.accounts.insert(address, account);
        self
    }

    pub(crate) fn failing(mut self, address: Pubkey) -> Self {
        self.failing.insert(address);
        self
    }

    pub(crate) fn panicking(mut self, address: Pubkey) -> Self {
        self.panicking.insert(address);
        self
    }

    /// 与实例共享的读取计数，实例移交给构建器后仍可观察。
    pub(crate) fn fetch_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.fetches)
    }
}

#[async_trait]
impl AccountSource for FakeAccounts {
    async fn fetch_account(&self, address: &Pubkey) -> anyhow::Result<Option<Account>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.panicking.contains(address) {
            panic!("account source crashed on {address}");
        }
        if self.failing.contains(address) {
            return Err(anyhow!("rpc unavailable for {address}"));
        }
        Ok(self.accounts.get(address).cloned())
    }
}

pub(crate) fn token_account(mint: &Pubkey) -> Account {
    let state = TokenAccount {
        mint: *mint,
        owner: Pubkey::new_unique(),
        amount: 0,
        state: AccountState::Initialized,
        ..TokenAccount::default()
    };
    let mut data = vec![0u8; TokenAccount::LEN];
    TokenAccount::pack(state, &mut data).expect("pack token account");
    Account {
        lamports: 2_039_280,
        data,
        owner: spl_token::ID,
        executable: false,
        rent_epoch: 0,
    }
}

pub(crate) fn wallet_account() -> Account {
    Account {
        lamports: 1_000_000_000,
        data: Vec::new(),
        owner: solana_sdk::pubkey!("11111111111111111111111111111111"),
        executable: false,
        rent_epoch: 0,
    }
}

/// 记录调用次数的编码器，其余行为与真实程序绑定一致。
#[derive(Clone)]
pub(crate) struct CountingEncoder {
    inner: Ocr2Program,
    calls: Arc<AtomicUsize>,
}

impl CountingEncoder {
    pub(crate) fn new(program_id: Pubkey) -> Self {
        Self {
            inner: Ocr2Program::new(program_id),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PayeesInstructionEncoder for CountingEncoder {
    fn program_id(&self) -> Pubkey {
        self.inner.program_id()
    }

    fn propose_payees(
        &self,
        token_mint: &Pubkey,
        payees: &[Pubkey],
        proposal: &Pubkey,
        authority: &Pubkey,
    ) -> std::io::Result<Instruction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner
            .propose_payees(token_mint, payees, proposal, authority)
    }
}
