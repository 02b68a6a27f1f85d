use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::instruction::Instruction;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use tracing::info;

use crate::wallet::WalletIdentity;

use super::error::LanderError;

#[derive(Debug, Clone)]
pub struct LanderReceipt {
    pub endpoint: String,
    pub signature: Signature,
}

/// 通过 RPC 签名、发送并等待确认；失败原样返回，不做重试。
#[derive(Clone)]
pub struct RpcLander {
    client: Arc<RpcClient>,
}

impl RpcLander {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }

    pub async fn submit(
        &self,
        identity: &WalletIdentity,
        instructions: &[Instruction],
    ) -> Result<LanderReceipt, LanderError> {
        if instructions.is_empty() {
            return Err(LanderError::fatal("交易指令不能为空"));
        }

        let blockhash = self.client.get_latest_blockhash().await?;
        let tx = Transaction::new_signed_with_payer(
            instructions,
            Some(&identity.pubkey),
            &[identity.signer.as_ref()],
            blockhash,
        );
        let signature = self.client.send_and_confirm_transaction(&tx).await?;
        let endpoint = self.client.url().to_string();
        info!(
            target: "lander::rpc",
            signature = %signature,
            blockhash = %blockhash,
            endpoint = %endpoint,
            "transaction submitted via rpc client"
        );

        Ok(LanderReceipt {
            endpoint,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::signature::Keypair;

    use super::*;

    #[tokio::test]
    async fn empty_instruction_list_is_rejected_before_rpc() {
        let lander = RpcLander::new(Arc::new(RpcClient::new("http://127.0.0.1:1".to_string())));
        let identity = WalletIdentity::from_keypair(Keypair::new());
        let err = lander
            .submit(&identity, &[])
            .await
            .expect_err("empty instructions");
        assert!(matches!(err, LanderError::Fatal(_)));
    }
}
