use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ocr2-payees", version, about = "OCR2 聚合器 payee 提案工具")]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径（默认查找 ocr2-payees.yaml 或 config/ocr2-payees.yaml）"
    )]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 为提案中的每个 oracle transmitter 设置 payee
    #[command(name = "propose-payees", alias = "ocr2:propose_payees")]
    ProposePayees(ProposePayeesArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProposePayeesArgs {
    #[arg(long, value_name = "ADDRESS", help = "聚合器 state 账户地址")]
    pub state: Option<String>,
    #[arg(
        long = "proposal",
        visible_alias = "proposal-id",
        alias = "proposalId",
        value_name = "ADDRESS",
        help = "提案账户地址"
    )]
    pub proposal: Option<String>,
    #[arg(
        long,
        value_name = "JSON|FILE",
        help = "显式的 operator 列表：内联 JSON 或 JSON 文件路径；缺省时从 RDD 推导"
    )]
    pub input: Option<String>,
    #[arg(long, value_name = "FILE", help = "部署描述（RDD）文件路径")]
    pub rdd: Option<PathBuf>,
    #[arg(
        long,
        value_name = "MINT",
        help = "奖励代币 Mint 地址（缺省读取环境变量 LINK 或配置 ocr2.link_mint）"
    )]
    pub link: Option<String>,
    #[arg(long, help = "允许 payee 暂无代币账户")]
    pub allow_unfunded_payee: bool,
    #[arg(short = 'y', long, help = "跳过提交前的确认")]
    pub yes: bool,
    #[arg(long, help = "只输出编码后的指令，不提交交易")]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gauntlet_style_flags() {
        let cli = Cli::try_parse_from([
            "ocr2-payees",
            "ocr2:propose_payees",
            "--state",
            "STATE",
            "--proposalId",
            "PROPOSAL",
            "--allow-unfunded-payee",
            "-y",
        ])
        .expect("parse cli");
        let Command::ProposePayees(args) = cli.command;
        assert_eq!(args.state.as_deref(), Some("STATE"));
        assert_eq!(args.proposal.as_deref(), Some("PROPOSAL"));
        assert!(args.allow_unfunded_payee);
        assert!(args.yes);
        assert!(!args.dry_run);
    }

    #[test]
    fn required_addresses_are_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["ocr2-payees", "propose-payees", "--dry-run"])
            .expect("parse cli");
        let Command::ProposePayees(args) = cli.command;
        assert!(args.state.is_none());
        assert!(args.proposal.is_none());
        assert!(args.dry_run);
    }
}
