use std::env;

use anyhow::{Result, anyhow};
use solana_sdk::instruction::Instruction;
use tracing::{info, warn};

use crate::cli::args::{Cli, Command, ProposePayeesArgs};
use crate::cli::context::{
    LINK_ENV, load_payee_input, resolve_params, resolve_rpc_client,
};
use crate::cli::prompt::confirm;
use crate::config::AppConfig;
use crate::lander::{LanderReceipt, RpcLander};
use crate::ocr2::Ocr2Program;
use crate::payees::{
    InstructionReport, ProposeError, ProposePayeesBuilder, ProposePayeesRequest,
    ProposePayeesResponse, ProposeResult,
};
use crate::wallet::WalletIdentity;

pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    match cli.command {
        Command::ProposePayees(args) => propose_payees(args, &config).await,
    }
}

async fn propose_payees(args: ProposePayeesArgs, config: &AppConfig) -> Result<()> {
    let link_env = env::var(LINK_ENV).ok();
    let params = resolve_params(&args, config, link_env)?;
    let input = load_payee_input(&args, config, &params.state)?;
    let identity = WalletIdentity::from_wallet(&config.global.wallet)?;
    let rpc = resolve_rpc_client(&config.global)?;

    info!(
        target: "payees::submit",
        state = %params.state,
        proposal = %params.proposal,
        token_mint = %params.token_mint,
        program = %params.program_id,
        authority = %identity.pubkey,
        operators = input.operators.len(),
        allow_unfunded_payee = input.allow_unfunded_payee,
        "准备构建 propose_payees"
    );

    let builder = ProposePayeesBuilder::new(
        rpc.clone(),
        Ocr2Program::new(params.program_id),
        ProposePayeesRequest {
            input,
            proposal: params.proposal,
            token_mint: params.token_mint,
        },
    );
    let instructions = builder
        .build_propose_payees_transaction(&identity.pubkey)
        .await?;

    if args.dry_run {
        let reports: Vec<InstructionReport> =
            instructions.iter().map(InstructionReport::from).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        info!(
            target: "payees::submit",
            proposal = %builder.request().proposal,
            "dry-run 模式，未提交交易"
        );
        return Ok(());
    }

    if !args.yes {
        let approved = confirm(&format!(
            "将为提案 {} 提交 propose_payees 交易，是否继续?",
            params.proposal
        ))
        .map_err(|err| anyhow!("读取确认输入失败: {err}"))?;
        ensure_confirmed(approved)?;
    }

    let lander = RpcLander::new(rpc);
    let response = submit_proposal(&lander, &identity, &instructions, &params.state).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn ensure_confirmed(approved: bool) -> ProposeResult<()> {
    if approved {
        return Ok(());
    }
    warn!(target: "payees::submit", "用户取消提交");
    Err(ProposeError::Cancelled)
}

async fn submit_proposal(
    lander: &RpcLander,
    identity: &WalletIdentity,
    instructions: &[Instruction],
    state: &str,
) -> ProposeResult<ProposePayeesResponse> {
    let receipt: LanderReceipt = lander.submit(identity, instructions).await?;
    info!(
        target: "payees::submit",
        signature = %receipt.signature,
        state = %state,
        endpoint = %receipt.endpoint,
        "Payees proposed"
    );
    Ok(ProposePayeesResponse::new(&receipt.signature, state))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use solana_client::nonblocking::rpc_client::RpcClient;
    use solana_sdk::signature::Keypair;

    use super::*;
    use crate::lander::LanderError;

    #[test]
    fn declined_confirmation_is_an_error() {
        assert!(ensure_confirmed(true).is_ok());
        assert!(matches!(
            ensure_confirmed(false),
            Err(ProposeError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn lander_failures_surface_as_submission_errors() {
        let lander = RpcLander::new(Arc::new(RpcClient::new("http://127.0.0.1:1".to_string())));
        let identity = WalletIdentity::from_keypair(Keypair::new());

        let err = submit_proposal(&lander, &identity, &[], "STATE")
            .await
            .expect_err("empty instructions");
        assert!(matches!(
            err,
            ProposeError::Submission(LanderError::Fatal(_))
        ));
    }
}
