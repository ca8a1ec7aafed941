use anchor_lang::prelude::Pubkey;

use crate::constants::*;
use crate::error::*;
use crate::ledger::LedgerAccount;
use crate::utils::AccountCursor;

use super::{ensure_owner, RecordKind};

/**
 * Revenue epoch account
 *
 * One rental income deposit for one property. Epoch numbers start at 1 and
 * increase by one per deposit; the account is never mutated after creation.
 *
 * Derivation: ["revenue_epoch", property_state, epoch_number (u64 LE)]
 *
 * Layout:
 * - discriminator (8)
 * - property_state (32, offset 8)
 * - epoch_number u64 (offset 40)
 * - total_revenue u64 (offset 48)
 * - eligible_supply u64 (offset 56)
 * - deposit tail, present on full-size accounts:
 *   deposited_at i64 (64), deposited_by (72), is_finalized (104), bump (105)
 */
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RevenueEpoch {
    /// PropertyState this deposit belongs to
    pub property_state: Pubkey,

    /// Sequential epoch number, starting at 1
    pub epoch_number: u64,

    /// Deposited revenue in lamports
    pub total_revenue: u64,

    /// Circulating supply snapshotted at deposit time
    /// - Denominator of every proportional payout for this epoch
    pub eligible_supply: u64,

    /// Deposit metadata, absent on truncated accounts
    pub deposit: Option<EpochDeposit>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct EpochDeposit {
    pub deposited_at: i64,
    pub deposited_by: Pubkey,
    pub is_finalized: bool,
    pub bump: u8,
}

impl RevenueEpoch {
    pub const MIN_LEN: usize = REVENUE_EPOCH_MIN_LEN;
    pub const LEN: usize = REVENUE_EPOCH_MIN_LEN + REVENUE_EPOCH_DEPOSIT_LEN;

    pub fn decode(account: &LedgerAccount, program_id: &Pubkey) -> Result<Self> {
        ensure_owner(RecordKind::RevenueEpoch, account, program_id)?;

        let mut cursor = AccountCursor::new(RecordKind::RevenueEpoch, &account.data);
        cursor.require_len(Self::MIN_LEN)?;
        cursor.skip(DISCRIMINATOR_LEN)?;

        let property_state = cursor.read_pubkey()?;
        let epoch_number = cursor.read_u64()?;
        let total_revenue = cursor.read_u64()?;
        let eligible_supply = cursor.read_u64()?;

        let deposit = if cursor.remaining() >= REVENUE_EPOCH_DEPOSIT_LEN {
            Some(EpochDeposit {
                deposited_at: cursor.read_i64()?,
                deposited_by: cursor.read_pubkey()?,
                is_finalized: cursor.read_bool("is_finalized")?,
                bump: cursor.read_u8()?,
            })
        } else {
            None
        };

        Ok(Self {
            property_state,
            epoch_number,
            total_revenue,
            eligible_supply,
            deposit,
        })
    }
}
