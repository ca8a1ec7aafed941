use anchor_lang::prelude::Pubkey;
use anchor_lang::AccountDeserialize;
use anchor_spl::associated_token::get_associated_token_address_with_program_id;
use anchor_spl::token_interface::TokenAccount;
use tracing::debug;

use crate::error::*;
use crate::ledger::{AccountSource, LedgerAccount};
use crate::state::RecordKind;

/// Associated Token-2022 account holding `wallet`'s property tokens
pub fn find_investor_token_address(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address_with_program_id(wallet, mint, &anchor_spl::token_2022::ID)
}

/// Universal token balance decoder for both SPL Token and Token 2022 accounts
pub fn decode_token_balance(
    account: &LedgerAccount,
    mint: &Pubkey,
    wallet: &Pubkey,
) -> Result<u64> {
    if account.owner != anchor_spl::token_2022::ID && account.owner != anchor_spl::token::ID {
        return Err(HubReaderError::OwnerMismatch {
            kind: RecordKind::TokenAccount,
            expected: anchor_spl::token_2022::ID,
            actual: account.owner,
        });
    }

    let token_account = TokenAccount::try_deserialize(&mut account.data.as_slice()).map_err(|e| {
        HubReaderError::Malformed {
            kind: RecordKind::TokenAccount,
            reason: e.to_string(),
        }
    })?;

    if token_account.mint != *mint {
        return Err(HubReaderError::FieldMismatch {
            kind: RecordKind::TokenAccount,
            field: "mint",
            expected: *mint,
            actual: token_account.mint,
        });
    }
    if token_account.owner != *wallet {
        return Err(HubReaderError::FieldMismatch {
            kind: RecordKind::TokenAccount,
            field: "owner",
            expected: *wallet,
            actual: token_account.owner,
        });
    }

    Ok(token_account.amount)
}

/// Current balance of `wallet` for `mint`; a missing token account holds nothing
pub fn fetch_token_balance<S: AccountSource + ?Sized>(
    source: &S,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Result<u64> {
    let address = find_investor_token_address(wallet, mint);
    match source.get_account(&address)? {
        Some(account) => decode_token_balance(&account, mint, wallet),
        None => {
            debug!(target: "hub_reader", "No token account {} for wallet {}", address, wallet);
            Ok(0)
        }
    }
}
