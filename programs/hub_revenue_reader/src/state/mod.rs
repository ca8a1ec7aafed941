pub mod claim_record;
pub mod gateway_token;
pub mod property_state;
pub mod revenue_epoch;

pub use claim_record::*;
pub use gateway_token::*;
pub use property_state::*;
pub use revenue_epoch::*;

use std::fmt;

use anchor_lang::prelude::Pubkey;

use crate::error::*;
use crate::ledger::LedgerAccount;

/// Account families this crate knows how to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Property,
    RevenueEpoch,
    ClaimRecord,
    Credential,
    TokenAccount,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Property => "property state",
            RecordKind::RevenueEpoch => "revenue epoch",
            RecordKind::ClaimRecord => "claim record",
            RecordKind::Credential => "gateway token",
            RecordKind::TokenAccount => "token account",
        };
        f.write_str(name)
    }
}

/// Ownership is checked before a single field is interpreted
pub(crate) fn ensure_owner(
    kind: RecordKind,
    account: &LedgerAccount,
    expected: &Pubkey,
) -> Result<()> {
    if account.owner != *expected {
        return Err(HubReaderError::OwnerMismatch {
            kind,
            expected: *expected,
            actual: account.owner,
        });
    }
    Ok(())
}
