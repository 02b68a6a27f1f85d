use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use spl_token::solana_program::program_pack::Pack;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::cache::cached_associated_token_address;

use super::source::AccountSource;

const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("11111111111111111111111111111111");

/// payee 未通过校验的原因；均不致命，只折算为 `false`。
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Ineligibility {
    #[error("地址非法: {0}")]
    InvalidAddress(String),
    #[error("账户不存在")]
    NotFound,
    #[error("账户 owner {owner} 不是 SPL Token Program")]
    NotTokenAccount { owner: Pubkey },
    #[error("代币账户解析失败: {0}")]
    Unpack(String),
    #[error("代币账户 mint {actual} 与期望的 {expected} 不一致")]
    MintMismatch { expected: Pubkey, actual: Pubkey },
    #[error("查询失败: {0}")]
    Lookup(String),
    #[error("校验任务异常退出: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeeCheck {
    pub payee: String,
    pub verdict: Result<(), Ineligibility>,
}

impl PayeeCheck {
    pub fn is_eligible(&self) -> bool {
        self.verdict.is_ok()
    }
}

/// 按输入顺序排列的校验结果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityReport {
    pub checks: Vec<PayeeCheck>,
}

impl EligibilityReport {
    pub fn all_eligible(&self) -> bool {
        self.checks.iter().all(PayeeCheck::is_eligible)
    }

    pub fn failed_payees(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|check| !check.is_eligible())
            .map(|check| check.payee.clone())
            .collect()
    }
}

/// 并发校验所有 payee：每个地址一个任务，全部结束后汇总。
/// 单个任务失败（含 panic）只记为不合格，不影响其余任务。
pub async fn check_payees<S>(source: Arc<S>, mint: Pubkey, payees: Vec<String>) -> EligibilityReport
where
    S: AccountSource + ?Sized,
{
    let mut join_set = JoinSet::new();
    let mut slots = HashMap::with_capacity(payees.len());
    for (index, payee) in payees.iter().cloned().enumerate() {
        let source = Arc::clone(&source);
        let handle = join_set.spawn(async move {
            let verdict = check_payee(source.as_ref(), &mint, &payee).await;
            (index, verdict)
        });
        slots.insert(handle.id(), index);
    }

    let mut verdicts: Vec<Option<Result<(), Ineligibility>>> = vec![None; payees.len()];
    while let Some(joined) = join_set.join_next().await {
        let (index, verdict) = match joined {
            Ok(done) => done,
            Err(err) => match slots.get(&err.id()) {
                Some(&index) => (index, Err(Ineligibility::Aborted(err.to_string()))),
                None => continue,
            },
        };

        let payee = &payees[index];
        match &verdict {
            Ok(()) => debug!(target: "payees::eligibility", payee = %payee, "payee 代币账户有效"),
            Err(reason) => match funding_hint(payee, &mint, reason) {
                Some(ata) => warn!(
                    target: "payees::eligibility",
                    payee = %payee,
                    reason = %reason,
                    associated_token_account = %ata,
                    "payee 没有有效的代币接收地址，该地址是钱包，可改用其关联代币账户"
                ),
                None => warn!(
                    target: "payees::eligibility",
                    payee = %payee,
                    reason = %reason,
                    "payee 没有有效的代币接收地址"
                ),
            },
        }
        verdicts[index] = Some(verdict);
    }

    let checks = payees
        .into_iter()
        .zip(verdicts)
        .map(|(payee, verdict)| PayeeCheck {
            payee,
            verdict: verdict
                .unwrap_or_else(|| Err(Ineligibility::Aborted("未返回结果".to_string()))),
        })
        .collect();

    EligibilityReport { checks }
}

async fn check_payee<S>(source: &S, mint: &Pubkey, payee: &str) -> Result<(), Ineligibility>
where
    S: AccountSource + ?Sized,
{
    let address = Pubkey::from_str(payee.trim())
        .map_err(|err| Ineligibility::InvalidAddress(err.to_string()))?;
    let account = source
        .fetch_account(&address)
        .await
        .map_err(|err| Ineligibility::Lookup(err.to_string()))?
        .ok_or(Ineligibility::NotFound)?;

    if account.owner != spl_token::ID {
        return Err(Ineligibility::NotTokenAccount {
            owner: account.owner,
        });
    }

    let token_account = spl_token::state::Account::unpack(&account.data)
        .map_err(|err| Ineligibility::Unpack(err.to_string()))?;
    if token_account.mint != *mint {
        return Err(Ineligibility::MintMismatch {
            expected: *mint,
            actual: token_account.mint,
        });
    }

    Ok(())
}

fn funding_hint(payee: &str, mint: &Pubkey, reason: &Ineligibility) -> Option<Pubkey> {
    match reason {
        Ineligibility::NotTokenAccount { owner } if *owner == SYSTEM_PROGRAM_ID => {
            let wallet = Pubkey::from_str(payee.trim()).ok()?;
            Some(cached_associated_token_address(
                &wallet,
                mint,
                &spl_token::ID,
            ))
        }
        _ => None,
    }
}
