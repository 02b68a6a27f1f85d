use std::collections::HashMap;
use std::sync::Arc;

use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use tracing::{debug, info, warn};

use crate::ocr2::{PayeesInstructionEncoder, ProposalState};

use super::eligibility::check_payees;
use super::error::{DUPLICATE_TRANSMITTERS, ProposeError, ProposeResult, UNFUNDED_PAYEES};
use super::source::AccountSource;
use super::types::{PayeeInput, parse_pubkey};

/// 单次提案构建所需的参数，均由命令行边界一次性解析。
#[derive(Debug, Clone)]
pub struct ProposePayeesRequest {
    pub input: PayeeInput,
    pub proposal: Pubkey,
    pub token_mint: Pubkey,
}

pub struct ProposePayeesBuilder<S, E>
where
    S: AccountSource + ?Sized,
    E: PayeesInstructionEncoder,
{
    source: Arc<S>,
    encoder: E,
    request: ProposePayeesRequest,
}

impl<S, E> ProposePayeesBuilder<S, E>
where
    S: AccountSource + ?Sized,
    E: PayeesInstructionEncoder,
{
    pub fn new(source: Arc<S>, encoder: E, request: ProposePayeesRequest) -> Self {
        Self {
            source,
            encoder,
            request,
        }
    }

    pub fn request(&self) -> &ProposePayeesRequest {
        &self.request
    }

    /// 解析输入 → 校验 payee → 读取提案 → 按提案顺序重排 → 编码，返回单条指令。
    pub async fn build_propose_payees_transaction(
        &self,
        signer: &Pubkey,
    ) -> ProposeResult<Vec<Instruction>> {
        let ProposePayeesRequest {
            input,
            proposal,
            token_mint,
        } = &self.request;

        let lookup = payee_lookup(input)?;

        let report =
            check_payees(Arc::clone(&self.source), *token_mint, input.payees()).await;
        if !report.all_eligible() {
            let failed = report.failed_payees();
            if !input.allow_unfunded_payee {
                return Err(ProposeError::Validation {
                    reason: UNFUNDED_PAYEES,
                    failed,
                });
            }
            warn!(
                target: "payees::builder",
                unfunded = failed.len(),
                "部分 payee 尚无代币账户，按 allow_unfunded_payee 继续"
            );
        }

        let state = self.fetch_proposal(proposal).await?;
        let transmitters = state.transmitters();
        let payees = order_payees(&lookup, &transmitters)?;

        info!(
            target: "payees::builder",
            proposal = %proposal,
            operators = ?input.operators,
            "payee 输入信息"
        );
        info!(
            target: "payees::builder",
            proposal = %proposal,
            payees = ?payees.iter().map(Pubkey::to_string).collect::<Vec<_>>(),
            "即将设置的 payee 列表"
        );

        let instruction = self
            .encoder
            .propose_payees(token_mint, &payees, proposal, signer)?;
        Ok(vec![instruction])
    }

    async fn fetch_proposal(&self, proposal: &Pubkey) -> ProposeResult<ProposalState> {
        let account = self
            .source
            .fetch_account(proposal)
            .await
            .map_err(ProposeError::Rpc)?
            .ok_or(ProposeError::ProposalNotFound {
                proposal: *proposal,
            })?;

        let program = self.encoder.program_id();
        if account.owner != program {
            return Err(ProposeError::ProposalOwner {
                proposal: *proposal,
                owner: account.owner,
                program,
            });
        }

        let state = ProposalState::decode(&account.data)?;
        debug!(
            target: "payees::builder",
            proposal = %proposal,
            version = state.version,
            owner = %state.owner,
            state = state.state,
            f = state.f,
            token_mint = %state.token_mint,
            len = state.len,
            "提案账户已解码"
        );
        for (slot, oracle) in state.active_oracles().iter().enumerate() {
            debug!(
                target: "payees::builder",
                slot,
                transmitter = %oracle.transmitter,
                signer = ?oracle.signer,
                current_payee = %oracle.payee,
                "提案 oracle"
            );
        }
        Ok(state)
    }
}

/// transmitter → payee 映射，在任何链上读取之前完成解析。
/// 重复的 transmitter 全部列出后按校验失败处理。
pub fn payee_lookup(input: &PayeeInput) -> ProposeResult<HashMap<Pubkey, Pubkey>> {
    let mut lookup = HashMap::with_capacity(input.operators.len());
    let mut duplicates = Vec::new();
    for operator in &input.operators {
        let transmitter = parse_pubkey(&operator.transmitter)?;
        let payee = parse_pubkey(&operator.payee)?;
        if lookup.insert(transmitter, payee).is_some() {
            let transmitter = transmitter.to_string();
            if !duplicates.contains(&transmitter) {
                duplicates.push(transmitter);
            }
        }
    }

    if !duplicates.is_empty() {
        return Err(ProposeError::Validation {
            reason: DUPLICATE_TRANSMITTERS,
            failed: duplicates,
        });
    }
    Ok(lookup)
}

/// 以提案中的 transmitter 顺序为准生成 payee 列表。
/// 提案中存在未分配 payee 的 transmitter 时直接失败。
pub fn order_payees(
    lookup: &HashMap<Pubkey, Pubkey>,
    transmitters: &[Pubkey],
) -> ProposeResult<Vec<Pubkey>> {
    transmitters
        .iter()
        .map(|transmitter| {
            lookup
                .get(transmitter)
                .copied()
                .ok_or(ProposeError::MissingPayee(*transmitter))
        })
        .collect()
}
