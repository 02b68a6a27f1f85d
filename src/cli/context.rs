use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use time::{UtcOffset, macros::format_description};
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::args::ProposePayeesArgs;
use crate::config::{AppConfig, ConfigError, GlobalConfig, LoggingConfig, load_config};
use crate::descriptor::DeploymentDescriptor;
use crate::payees::{
    InputSource, PayeeInput, ProposeError, ProposeResult, parse_pubkey, resolve_input,
};

pub const RPC_URL_ENV: &str = "OCR2_PAYEES_RPC_URL";
pub const LINK_ENV: &str = "LINK";
const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

/// 初始化 tracing，兼顾 JSON 与文本输出模式。
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let mut filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    const QUIET_TARGETS: &[(&str, &str)] = &[
        ("hyper", "warn"),
        ("hyper_util::client::legacy", "warn"),
        ("reqwest", "info"),
        ("solana_rpc_client", "info"),
    ];
    for (module, level) in QUIET_TARGETS {
        if !config.level.contains(module) {
            if let Ok(directive) = format!("{module}={level}").parse() {
                filter = filter.add_directive(directive);
            }
        }
    }

    let time_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");
    let offset = UtcOffset::from_hms(config.timezone_offset_hours, 0, 0).map_err(|err| {
        anyhow!(
            "invalid logging timezone offset {}: {err}",
            config.timezone_offset_hours
        )
    })?;
    let offset_timer = OffsetTime::new(offset, time_format);

    let base = fmt()
        .with_timer(offset_timer)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if config.json {
        base.json()
            .with_current_span(false)
            .with_span_list(false)
            .with_env_filter(filter)
            .try_init()
            .map_err(|err| anyhow!(err.to_string()))?;
    } else {
        base.with_env_filter(filter)
            .event_format(fmt::format().compact())
            .try_init()
            .map_err(|err| anyhow!(err.to_string()))?;
    }
    Ok(())
}

/// 加载主配置；用于 `ocr2-payees --config` 的入口。
pub fn load_configuration(path: Option<PathBuf>) -> Result<AppConfig, ConfigError> {
    load_config(path)
}

pub fn resolve_rpc_client(global: &GlobalConfig) -> Result<Arc<RpcClient>> {
    let url = env::var(RPC_URL_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| global.rpc_url.clone())
        .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
    let commitment = parse_commitment(&global.commitment)?;

    Ok(Arc::new(RpcClient::new_with_commitment(
        url.trim().to_string(),
        commitment,
    )))
}

pub fn parse_commitment(raw: &str) -> Result<CommitmentConfig> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" | "" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(anyhow!(
            "global.commitment 期望 processed / confirmed / finalized，实际为 {other}"
        )),
    }
}

/// 命令行边界一次性解析出的地址参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposePayeesParams {
    pub state: String,
    pub proposal: Pubkey,
    pub token_mint: Pubkey,
    pub program_id: Pubkey,
}

/// 解析必填地址与代币 Mint：`--link` 优先，其次环境变量 `LINK`，最后是配置。
pub fn resolve_params(
    args: &ProposePayeesArgs,
    config: &AppConfig,
    link_env: Option<String>,
) -> ProposeResult<ProposePayeesParams> {
    let state = required(args.state.as_deref(), "请提供有效的 state 地址 (--state)")?;
    let proposal = required(
        args.proposal.as_deref(),
        "请提供有效的提案地址 (--proposal)",
    )?;

    let mint = args
        .link
        .clone()
        .or(link_env)
        .or_else(|| config.ocr2.link_mint.clone())
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            ProposeError::configuration(format!(
                "缺少奖励代币 Mint，请提供 --link、环境变量 {LINK_ENV} 或配置 ocr2.link_mint"
            ))
        })?;

    Ok(ProposePayeesParams {
        state: state.clone(),
        proposal: parse_pubkey(&proposal)?,
        token_mint: parse_pubkey(&mint)?,
        program_id: parse_pubkey(&config.ocr2.program_id)?,
    })
}

fn required(value: Option<&str>, message: &str) -> ProposeResult<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProposeError::configuration(message))
}

/// 读取显式输入或部署描述，并应用 `--allow-unfunded-payee`。
pub fn load_payee_input(
    args: &ProposePayeesArgs,
    config: &AppConfig,
    state: &str,
) -> ProposeResult<PayeeInput> {
    let mut input = match args.input.as_deref() {
        Some(raw) => resolve_input(InputSource::Explicit(parse_input_arg(raw)?))?,
        None => {
            let path = args
                .rdd
                .clone()
                .or_else(|| config.ocr2.rdd_path.clone())
                .ok_or_else(|| {
                    ProposeError::configuration("未提供 --input，且未配置 --rdd 或 ocr2.rdd_path")
                })?;
            let descriptor = DeploymentDescriptor::load(&path)?;
            resolve_input(InputSource::Descriptor {
                descriptor: &descriptor,
                state,
            })?
        }
    };

    if args.allow_unfunded_payee {
        input.allow_unfunded_payee = true;
    }
    Ok(input)
}

fn parse_input_arg(raw: &str) -> ProposeResult<PayeeInput> {
    let trimmed = raw.trim();
    let contents = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        fs::read_to_string(trimmed).map_err(|err| {
            ProposeError::configuration(format!("读取输入文件 {trimmed} 失败: {err}"))
        })?
    };
    PayeeInput::from_json(&contents)
        .map_err(|err| ProposeError::configuration(format!("解析 --input 失败: {err}")))
}
