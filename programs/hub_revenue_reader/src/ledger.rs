//! Ledger client seam
//!
//! The reader never talks to an RPC node. Callers hand it raw accounts,
//! either directly or through an [`AccountSource`] that fetches by address.

use std::collections::HashMap;

use anchor_lang::prelude::Pubkey;

use crate::error::*;
use crate::state::*;

/// Raw account as returned by the ledger: owning program plus data bytes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerAccount {
    pub owner: Pubkey,
    pub data: Vec<u8>,
}

impl LedgerAccount {
    pub fn new(owner: Pubkey, data: Vec<u8>) -> Self {
        Self { owner, data }
    }
}

/// Synchronous account lookup provided by the ledger client.
///
/// `Ok(None)` means no account exists at the address. Transport failures
/// should be reported as [`HubReaderError::Ledger`] with a readable cause.
pub trait AccountSource {
    fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>>;
}

impl<T: AccountSource + ?Sized> AccountSource for &T {
    fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>> {
        (**self).get_account(address)
    }
}

/// In-memory account store, for snapshots and testing
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccounts {
    accounts: HashMap<Pubkey, LedgerAccount>,
}

impl InMemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: Pubkey, account: LedgerAccount) -> Option<LedgerAccount> {
        self.accounts.insert(address, account)
    }

    pub fn remove(&mut self, address: &Pubkey) -> Option<LedgerAccount> {
        self.accounts.remove(address)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountSource for InMemoryAccounts {
    fn get_account(&self, address: &Pubkey) -> Result<Option<LedgerAccount>> {
        Ok(self.accounts.get(address).cloned())
    }
}

/// What the caller expects an account to be, with the values it must match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeContext {
    Property,
    RevenueEpoch,
    ClaimRecord,
    Credential { wallet: Pubkey, network: Pubkey },
}

impl DecodeContext {
    pub fn kind(&self) -> RecordKind {
        match self {
            DecodeContext::Property => RecordKind::Property,
            DecodeContext::RevenueEpoch => RecordKind::RevenueEpoch,
            DecodeContext::ClaimRecord => RecordKind::ClaimRecord,
            DecodeContext::Credential { .. } => RecordKind::Credential,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRecord {
    Property(PropertyState),
    RevenueEpoch(RevenueEpoch),
    ClaimRecord(ClaimRecord),
    Credential(GatewayToken),
}

/// Decodes `account` as the record described by `context`.
///
/// The owning program is checked against `expected_owner` and the length
/// against the record's minimum before any field is read.
pub fn decode(
    account: &LedgerAccount,
    expected_owner: &Pubkey,
    context: &DecodeContext,
) -> Result<DecodedRecord> {
    let record = match context {
        DecodeContext::Property => {
            DecodedRecord::Property(PropertyState::decode(account, expected_owner)?)
        }
        DecodeContext::RevenueEpoch => {
            DecodedRecord::RevenueEpoch(RevenueEpoch::decode(account, expected_owner)?)
        }
        DecodeContext::ClaimRecord => {
            DecodedRecord::ClaimRecord(ClaimRecord::decode(account, expected_owner)?)
        }
        DecodeContext::Credential { wallet, network } => DecodedRecord::Credential(
            GatewayToken::decode(account, expected_owner, wallet, network)?,
        ),
    };
    Ok(record)
}

/// Fetches `address` and fails with `NotFound` when nothing is there
pub fn fetch_required<S: AccountSource + ?Sized>(
    source: &S,
    kind: RecordKind,
    address: &Pubkey,
) -> Result<LedgerAccount> {
    source
        .get_account(address)?
        .ok_or(HubReaderError::NotFound { kind, address: *address })
}
