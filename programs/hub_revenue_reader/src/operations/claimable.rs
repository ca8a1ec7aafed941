use anchor_lang::prelude::Pubkey;
use tracing::debug;

use crate::config::ReaderConfig;
use crate::error::*;
use crate::ledger::{fetch_required, AccountSource, LedgerAccount};
use crate::pda::find_claim_record_address;
use crate::state::*;
use crate::utils::fetch_token_balance;

use super::EpochScanner;

/**
 * Claimable revenue preview
 *
 * Computes floor(balance * total_revenue / eligible_supply) in u128, so the
 * intermediate product of two u64 values cannot overflow.
 *
 * Rules:
 * - A claim record with `claimed` set is terminal: the result is 0 whatever
 *   the balance
 * - An eligible supply of 0 yields 0
 * - A result that does not fit in u64 is `ArithmeticOverflow`
 *
 * `balance` is the investor's current balance while `eligible_supply` was
 * snapshotted at deposit time. Tokens bought after the deposit therefore
 * count toward this epoch, and tokens sold after it stop counting. This
 * matches what the ledger program pays out and is kept as is.
 *
 * The figure is only a preview. The payout is fixed when a claim executes
 * on the ledger and writes the claim record, so a preview can go stale
 * between computation and settlement.
 */
pub fn claimable_amount(
    epoch: &RevenueEpoch,
    claim: Option<&ClaimRecord>,
    balance: u64,
) -> Result<u64> {
    if claim.is_some_and(|c| c.claimed) {
        return Ok(0);
    }
    if epoch.eligible_supply == 0 {
        return Ok(0);
    }

    let share =
        u128::from(balance) * u128::from(epoch.total_revenue) / u128::from(epoch.eligible_supply);
    u64::try_from(share).map_err(|_| HubReaderError::ArithmeticOverflow)
}

/// [`claimable_amount`] over raw epoch and claim record accounts
pub fn claimable_from_accounts(
    program_id: &Pubkey,
    epoch_account: &LedgerAccount,
    claim_account: Option<&LedgerAccount>,
    balance: u64,
) -> Result<u64> {
    let claim = claim_account
        .map(|account| ClaimRecord::decode(account, program_id))
        .transpose()?;
    if claim.as_ref().is_some_and(|c| c.claimed) {
        return Ok(0);
    }

    let epoch = RevenueEpoch::decode(epoch_account, program_id)?;
    claimable_amount(&epoch, claim.as_ref(), balance)
}

/// Reads the claim record of `wallet` for the epoch at `epoch_address`, if any
pub fn fetch_claim_record<S: AccountSource + ?Sized>(
    source: &S,
    program_id: &Pubkey,
    epoch_address: &Pubkey,
    wallet: &Pubkey,
) -> Result<Option<ClaimRecord>> {
    let (address, _) = find_claim_record_address(epoch_address, wallet, program_id);
    source
        .get_account(&address)?
        .map(|account| ClaimRecord::decode(&account, program_id))
        .transpose()
}

/// Preview for one epoch account: resolves the claim record, the epoch's
/// property mint and the wallet's balance through `source`
pub fn preview_claimable<S: AccountSource + ?Sized>(
    source: &S,
    config: &ReaderConfig,
    epoch_address: &Pubkey,
    wallet: &Pubkey,
) -> Result<u64> {
    let program_id = &config.hub_program_id;
    let claim = fetch_claim_record(source, program_id, epoch_address, wallet)?;
    if claim.as_ref().is_some_and(|c| c.claimed) {
        return Ok(0);
    }

    let epoch_account = fetch_required(source, RecordKind::RevenueEpoch, epoch_address)?;
    let epoch = RevenueEpoch::decode(&epoch_account, program_id)?;
    if epoch.eligible_supply == 0 {
        return Ok(0);
    }

    let property = EpochScanner::from_config(config).property_of(source, &epoch)?;
    let balance = fetch_token_balance(source, wallet, &property.mint)?;
    claimable_amount(&epoch, claim.as_ref(), balance)
}

/// One epoch of a wallet's revenue position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimablePosition {
    pub epoch: Pubkey,
    pub epoch_number: u64,
    pub claimable: u64,
    pub claimed: bool,
    pub claimed_at: Option<i64>,
}

/// A wallet's claimable revenue for one property
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimableRevenue {
    pub wallet: Pubkey,
    pub mint: Pubkey,
    /// Sum of `claimable` over epochs not yet claimed
    pub total_claimable: u64,
    pub positions: Vec<ClaimablePosition>,
}

impl ClaimableRevenue {
    /// Walks every epoch of the property tokenized under `mint`.
    ///
    /// Epochs with nothing claimable and no claim record are left out.
    pub fn for_wallet<S: AccountSource + ?Sized>(
        source: &S,
        config: &ReaderConfig,
        mint: &Pubkey,
        wallet: &Pubkey,
    ) -> Result<Self> {
        let program_id = &config.hub_program_id;
        let epochs = EpochScanner::from_config(config).scan_mint(source, mint)?;

        let mut revenue = Self {
            wallet: *wallet,
            mint: *mint,
            ..Self::default()
        };
        if epochs.is_empty() {
            return Ok(revenue);
        }

        let balance = fetch_token_balance(source, wallet, mint)?;
        debug!(
            target: "hub_reader",
            "Wallet {} holds {} of {} across {} epochs", wallet, balance, mint, epochs.len()
        );

        for scanned in &epochs {
            let claim = fetch_claim_record(source, program_id, &scanned.address, wallet)?;
            let claimable = claimable_amount(&scanned.epoch, claim.as_ref(), balance)?;
            if claimable == 0 && claim.is_none() {
                continue;
            }

            let claimed = claim.as_ref().is_some_and(|c| c.claimed);
            if !claimed {
                revenue.total_claimable = revenue
                    .total_claimable
                    .checked_add(claimable)
                    .ok_or(HubReaderError::ArithmeticOverflow)?;
            }

            revenue.positions.push(ClaimablePosition {
                epoch: scanned.address,
                epoch_number: scanned.epoch.epoch_number,
                claimable,
                claimed,
                claimed_at: claim.as_ref().and_then(ClaimRecord::claim_time),
            });
        }

        Ok(revenue)
    }
}
