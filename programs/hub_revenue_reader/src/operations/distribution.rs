use std::fmt;

use anchor_lang::prelude::Pubkey;
use tracing::debug;

use crate::config::ReaderConfig;
use crate::error::*;
use crate::ledger::AccountSource;
use crate::pda::find_property_state_address;
use crate::state::*;

use super::{EpochScanner, ScannedEpoch};

/// An epoch with the amount its claim records have paid out so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochTotals {
    pub address: Pubkey,
    pub epoch_number: u64,
    pub total_revenue: u64,
    pub total_claimed: u64,
}

impl EpochTotals {
    pub fn new(address: Pubkey, epoch: &RevenueEpoch, total_claimed: u64) -> Self {
        Self {
            address,
            epoch_number: epoch.epoch_number,
            total_revenue: epoch.total_revenue,
            total_claimed,
        }
    }

    /// Sums settled claims that reference this epoch; others are ignored
    pub fn from_claims(scanned: &ScannedEpoch, claims: &[ClaimRecord]) -> Result<Self> {
        let total_claimed = claims
            .iter()
            .filter(|claim| claim.epoch == scanned.address && claim.claimed)
            .try_fold(0u64, |total, claim| {
                total
                    .checked_add(claim.amount_claimed)
                    .ok_or(HubReaderError::ArithmeticOverflow)
            })?;
        Ok(Self::new(scanned.address, &scanned.epoch, total_claimed))
    }

    /// Revenue not yet claimed; never negative
    pub fn unclaimed(&self) -> u64 {
        self.total_revenue.saturating_sub(self.total_claimed)
    }
}

/// Revenue actually paid out across `epochs`
pub fn total_distributed(epochs: &[EpochTotals]) -> Result<u64> {
    epochs.iter().try_fold(0u64, |total, epoch| {
        total
            .checked_add(epoch.total_claimed)
            .ok_or(HubReaderError::ArithmeticOverflow)
    })
}

/// Deposited revenue still waiting to be claimed across `epochs`
pub fn unclaimed_amount(epochs: &[EpochTotals]) -> Result<u64> {
    epochs.iter().try_fold(0u64, |total, epoch| {
        total
            .checked_add(epoch.unclaimed())
            .ok_or(HubReaderError::ArithmeticOverflow)
    })
}

/// Deposit lifecycle as recorded on the epoch account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpochStatus {
    /// Deposited but not finalized, or no deposit metadata on the account
    Active,
    Finalized,
}

impl EpochStatus {
    pub fn of(epoch: &RevenueEpoch) -> Self {
        match &epoch.deposit {
            Some(deposit) if deposit.is_finalized => EpochStatus::Finalized,
            _ => EpochStatus::Active,
        }
    }
}

impl fmt::Display for EpochStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpochStatus::Active => f.write_str("active"),
            EpochStatus::Finalized => f.write_str("finalized"),
        }
    }
}

/// One epoch in a property's revenue history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochHistory {
    pub totals: EpochTotals,
    pub status: EpochStatus,
    /// Unix timestamp of the deposit, if the account records one
    pub deposited_at: Option<i64>,
}

impl EpochHistory {
    pub fn from_claims(scanned: &ScannedEpoch, claims: &[ClaimRecord]) -> Result<Self> {
        Ok(Self {
            totals: EpochTotals::from_claims(scanned, claims)?,
            status: EpochStatus::of(&scanned.epoch),
            deposited_at: scanned.epoch.deposit.as_ref().map(|d| d.deposited_at),
        })
    }

    /// Revenue of this epoch still waiting to be claimed
    pub fn remaining(&self) -> u64 {
        self.totals.unclaimed()
    }
}

/**
 * Revenue history of one property
 *
 * Every epoch found by a scan, oldest first, with what has been claimed from
 * it. Claim records cannot be looked up without knowing the investor, so the
 * caller passes the records it has listed for the property; records of other
 * epochs are ignored.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevenueHistory {
    pub mint: Pubkey,
    pub property_state: Pubkey,
    pub epochs: Vec<EpochHistory>,
    pub total_distributed: u64,
    pub total_unclaimed: u64,
}

impl RevenueHistory {
    pub fn from_scanned(
        mint: Pubkey,
        property_state: Pubkey,
        scanned: &[ScannedEpoch],
        claims: &[ClaimRecord],
    ) -> Result<Self> {
        let epochs = scanned
            .iter()
            .map(|epoch| EpochHistory::from_claims(epoch, claims))
            .collect::<Result<Vec<_>>>()?;
        let totals: Vec<EpochTotals> = epochs.iter().map(|e| e.totals.clone()).collect();

        Ok(Self {
            mint,
            property_state,
            total_distributed: total_distributed(&totals)?,
            total_unclaimed: unclaimed_amount(&totals)?,
            epochs,
        })
    }

    /// Scans the epochs of the property tokenized under `mint`
    pub fn for_property<S: AccountSource + ?Sized>(
        source: &S,
        config: &ReaderConfig,
        mint: &Pubkey,
        claims: &[ClaimRecord],
    ) -> Result<Self> {
        let (property_state, _) = find_property_state_address(mint, &config.hub_program_id);
        let scanned = EpochScanner::from_config(config).scan(source, &property_state)?;
        debug!(
            target: "hub_reader",
            "Revenue history of {}: {} epochs, {} claim records", mint, scanned.len(), claims.len()
        );
        Self::from_scanned(*mint, property_state, &scanned, claims)
    }
}
