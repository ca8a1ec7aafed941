use anchor_lang::prelude::Pubkey;

use crate::constants::*;
use crate::error::*;
use crate::ledger::LedgerAccount;
use crate::utils::AccountCursor;

use super::{ensure_owner, RecordKind};

/**
 * Individual claim record account
 *
 * Marks that one investor has been paid for one revenue epoch. The record
 * does not exist until the investor's first claim succeeds on the ledger, and
 * once `claimed` is set it is never reset.
 *
 * Derivation: ["claim_record", revenue_epoch, investor]
 *
 * Layout:
 * - discriminator (8)
 * - epoch (32, offset 8)
 * - investor (32, offset 40)
 * - claimed (1, offset 72)
 * - amount_claimed u64 (offset 73)
 * - claimed_at i64 (offset 81)
 */
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    /// Revenue epoch this claim settles
    pub epoch: Pubkey,

    /// Wallet that claimed
    pub investor: Pubkey,

    /// Terminal flag; a claimed epoch pays nothing further
    /// - Only a stored 1 counts as claimed
    pub claimed: bool,

    /// Lamports paid out by the claim
    pub amount_claimed: u64,

    /// Unix timestamp of the claim, zero if never
    pub claimed_at: i64,
}

impl ClaimRecord {
    pub const LEN: usize = CLAIM_RECORD_LEN;

    pub fn decode(account: &LedgerAccount, program_id: &Pubkey) -> Result<Self> {
        ensure_owner(RecordKind::ClaimRecord, account, program_id)?;

        let mut cursor = AccountCursor::new(RecordKind::ClaimRecord, &account.data);
        cursor.require_len(Self::LEN)?;
        cursor.skip(DISCRIMINATOR_LEN)?;

        Ok(Self {
            epoch: cursor.read_pubkey()?,
            investor: cursor.read_pubkey()?,
            claimed: cursor.read_u8()? == 1,
            amount_claimed: cursor.read_u64()?,
            claimed_at: cursor.read_i64()?,
        })
    }

    /// Claim time, if one was ever recorded
    pub fn claim_time(&self) -> Option<i64> {
        (self.claimed_at > 0).then_some(self.claimed_at)
    }
}
