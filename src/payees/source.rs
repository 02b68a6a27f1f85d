use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;

/// 只读链上账户来源：代币账户校验与提案读取共用。
#[async_trait]
pub trait AccountSource: Send + Sync + 'static {
    async fn fetch_account(&self, address: &Pubkey) -> anyhow::Result<Option<Account>>;
}

#[async_trait]
impl AccountSource for RpcClient {
    async fn fetch_account(&self, address: &Pubkey) -> anyhow::Result<Option<Account>> {
        let response = self
            .get_account_with_commitment(address, self.commitment())
            .await?;
        Ok(response.value)
    }
}
