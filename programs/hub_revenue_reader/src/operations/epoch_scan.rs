use anchor_lang::prelude::Pubkey;
use tracing::{debug, warn};

use crate::config::ReaderConfig;
use crate::constants::DEFAULT_MAX_EPOCH_PROBE;
use crate::error::*;
use crate::ledger::{fetch_required, AccountSource};
use crate::pda::{find_property_state_address, find_revenue_epoch_address};
use crate::state::*;

/// Bound on how far an epoch scan probes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePolicy {
    pub max_epochs: u64,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            max_epochs: DEFAULT_MAX_EPOCH_PROBE,
        }
    }
}

/// A decoded epoch together with the address it was read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedEpoch {
    pub address: Pubkey,
    pub epoch: RevenueEpoch,
}

/**
 * Sequential revenue epoch enumeration
 *
 * Probes epoch numbers 1, 2, 3, ... under a property state and stops at the
 * first number with no decodable, matching account, or at the policy bound.
 *
 * Precondition: epoch numbers are never skipped. The deposit path only
 * accepts the next unused epoch PDA, so the first gap marks the end. If that
 * ever stops holding, epochs after a gap are silently missed.
 *
 * Each probe is independent; a caller that abandons a scan midway can keep
 * the epochs returned so far.
 */
#[derive(Debug, Clone)]
pub struct EpochScanner {
    pub program_id: Pubkey,
    pub policy: ProbePolicy,
}

impl EpochScanner {
    pub fn new(program_id: Pubkey, policy: ProbePolicy) -> Self {
        Self { program_id, policy }
    }

    pub fn from_config(config: &ReaderConfig) -> Self {
        Self::new(
            config.hub_program_id,
            ProbePolicy {
                max_epochs: config.max_epoch_probe,
            },
        )
    }

    /// Reads one epoch; `Ok(None)` when it is absent, does not decode, or
    /// names a different property or epoch number than the one probed
    pub fn find_epoch<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        property_state: &Pubkey,
        epoch_number: u64,
    ) -> Result<Option<ScannedEpoch>> {
        let (address, _) =
            find_revenue_epoch_address(property_state, epoch_number, &self.program_id);
        let Some(account) = source.get_account(&address)? else {
            return Ok(None);
        };

        match RevenueEpoch::decode(&account, &self.program_id) {
            Ok(epoch)
                if epoch.epoch_number != epoch_number
                    || epoch.property_state != *property_state =>
            {
                warn!(
                    target: "hub_reader",
                    "Epoch {} of {} at {} references epoch {} of {}",
                    epoch_number, property_state, address, epoch.epoch_number, epoch.property_state
                );
                Ok(None)
            }
            Ok(epoch) => Ok(Some(ScannedEpoch { address, epoch })),
            Err(err) => {
                warn!(
                    target: "hub_reader",
                    "Epoch {} of {} at {} does not decode: {}",
                    epoch_number, property_state, address, err
                );
                Ok(None)
            }
        }
    }

    /// All epochs of the property state, in epoch-number order
    pub fn scan<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        property_state: &Pubkey,
    ) -> Result<Vec<ScannedEpoch>> {
        let mut epochs = Vec::new();

        for epoch_number in 1..=self.policy.max_epochs {
            match self.find_epoch(source, property_state, epoch_number)? {
                Some(scanned) => epochs.push(scanned),
                None => {
                    debug!(
                        target: "hub_reader",
                        "Epoch scan of {} stopped at gap {}", property_state, epoch_number
                    );
                    return Ok(epochs);
                }
            }
        }

        warn!(
            target: "hub_reader",
            "Epoch scan of {} reached the probe bound of {}", property_state, self.policy.max_epochs
        );
        Ok(epochs)
    }

    /// Epochs of the property tokenized under `mint`
    pub fn scan_mint<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        mint: &Pubkey,
    ) -> Result<Vec<ScannedEpoch>> {
        let (property_state, _) = find_property_state_address(mint, &self.program_id);
        self.scan(source, &property_state)
    }

    /// Highest epoch found by a scan
    pub fn current_epoch<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        property_state: &Pubkey,
    ) -> Result<Option<ScannedEpoch>> {
        Ok(self.scan(source, property_state)?.pop())
    }

    /// Resolves the property behind an epoch, for its mint
    pub fn property_of<S: AccountSource + ?Sized>(
        &self,
        source: &S,
        epoch: &RevenueEpoch,
    ) -> Result<PropertyState> {
        let account = fetch_required(source, RecordKind::Property, &epoch.property_state)?;
        PropertyState::decode(&account, &self.program_id)
    }
}
