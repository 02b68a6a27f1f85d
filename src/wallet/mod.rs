use std::env;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

use crate::config::WalletConfig;
use crate::payees::{ProposeError, ProposeResult};

pub const PRIVATE_KEY_ENV: &str = "OCR2_PAYEES_PRIVATE_KEY";

/// 提案签名者：公钥即 `propose_payees` 的 authority。
#[derive(Clone)]
pub struct WalletIdentity {
    pub pubkey: Pubkey,
    pub signer: Arc<Keypair>,
}

impl WalletIdentity {
    pub fn from_wallet(wallet: &WalletConfig) -> ProposeResult<Self> {
        let env_value = env::var(PRIVATE_KEY_ENV).ok();
        let signer = load_keypair(env_value.as_deref(), wallet)?;
        Ok(Self::from_keypair(signer))
    }

    pub fn from_keypair(signer: Keypair) -> Self {
        Self {
            pubkey: signer.pubkey(),
            signer: Arc::new(signer),
        }
    }
}

fn load_keypair(env_value: Option<&str>, wallet: &WalletConfig) -> ProposeResult<Keypair> {
    if let Some(value) = env_value.filter(|value| !value.trim().is_empty()) {
        return parse_keypair_string(value).map_err(|err| {
            ProposeError::configuration(format!("环境变量 {PRIVATE_KEY_ENV} 非法: {err}"))
        });
    }

    if !wallet.private_key.trim().is_empty() {
        return parse_keypair_string(&wallet.private_key).map_err(|err| {
            ProposeError::configuration(format!("配置 global.wallet.private_key 非法: {err}"))
        });
    }

    Err(ProposeError::configuration(format!(
        "缺少私钥配置，请提供 global.wallet.private_key 或环境变量 {PRIVATE_KEY_ENV}"
    )))
}

/// 支持 JSON 字节数组、逗号分隔字节与 base58 三种格式。
pub fn parse_keypair_string(raw: &str) -> Result<Keypair, anyhow::Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("keypair string empty");
    }

    if trimmed.starts_with('[') {
        let bytes: Vec<u8> = serde_json::from_str(trimmed)?;
        Ok(Keypair::try_from(bytes.as_slice())?)
    } else if trimmed.contains(',') {
        let bytes = trimmed
            .split(',')
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<u8>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Keypair::try_from(bytes.as_slice())?)
    } else {
        let data = bs58::decode(trimmed).into_vec()?;
        Ok(Keypair::try_from(data.as_slice())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_supported_encodings() {
        let keypair = Keypair::new();
        let bytes = keypair.to_bytes().to_vec();

        let json = serde_json::to_string(&bytes).expect("serialize keypair");
        let csv = bytes
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let base58 = bs58::encode(&bytes).into_string();

        for raw in [json, csv, base58] {
            let parsed = parse_keypair_string(&raw).expect("parse keypair");
            assert_eq!(parsed.pubkey(), keypair.pubkey());
        }
    }

    #[test]
    fn env_value_takes_precedence_over_config() {
        let from_env = Keypair::new();
        let from_config = Keypair::new();
        let wallet = WalletConfig {
            private_key: bs58::encode(from_config.to_bytes()).into_string(),
        };
        let env_value = bs58::encode(from_env.to_bytes()).into_string();

        let loaded = load_keypair(Some(&env_value), &wallet).expect("load keypair");
        assert_eq!(loaded.pubkey(), from_env.pubkey());

        let loaded = load_keypair(Some("  "), &wallet).expect("load keypair");
        assert_eq!(loaded.pubkey(), from_config.pubkey());
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let err = load_keypair(None, &WalletConfig::default()).expect_err("missing key");
        assert!(matches!(err, ProposeError::Configuration(_)));
    }
}
