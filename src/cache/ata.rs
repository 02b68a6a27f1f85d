use dashmap::DashMap;
use once_cell::sync::Lazy;
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct AtaKey {
    wallet: Pubkey,
    mint: Pubkey,
    token_program: Pubkey,
}

static ATA_CACHE: Lazy<DashMap<AtaKey, Pubkey>> = Lazy::new(DashMap::new);

/// 钱包在指定 mint 下的关联代币账户地址，结果按 (wallet, mint, program) 缓存。
pub fn cached_associated_token_address(
    wallet: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Pubkey {
    let key = AtaKey {
        wallet: *wallet,
        mint: *mint,
        token_program: *token_program,
    };
    *ATA_CACHE.entry(key).or_insert_with(|| {
        Pubkey::find_program_address(
            &[wallet.as_ref(), token_program.as_ref(), mint.as_ref()],
            &spl_associated_token_account::id(),
        )
        .0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_spl_derivation() {
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let derived = cached_associated_token_address(&wallet, &mint, &spl_token::ID);
        assert_eq!(
            derived,
            spl_associated_token_account::get_associated_token_address(&wallet, &mint)
        );
        assert_eq!(
            cached_associated_token_address(&wallet, &mint, &spl_token::ID),
            derived
        );
    }
}
