use anchor_lang::prelude::Pubkey;

use crate::constants::*;

/**
 * Program derived addresses
 *
 * Pure functions over seed tuples: the same seeds and program id always give
 * the same (address, bump) pair. The HUB token program owns every kind except
 * `GatewayToken`, which lives under the gateway program.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// ["property", mint]
    PropertyState { mint: Pubkey },
    /// ["extra-account-metas", mint]
    ExtraAccountMetas { mint: Pubkey },
    /// ["revenue_epoch", property_state, epoch_number]
    RevenueEpoch { property_state: Pubkey, epoch_number: u64 },
    /// ["claim_record", revenue_epoch, investor]
    ClaimRecord { revenue_epoch: Pubkey, investor: Pubkey },
    /// ["revenue_vault", revenue_epoch]
    RevenueVault { revenue_epoch: Pubkey },
    /// [wallet, "gateway", [0; 8], network]
    GatewayToken { wallet: Pubkey, network: Pubkey },
}

impl AddressKind {
    pub fn seeds(&self) -> Vec<Vec<u8>> {
        match self {
            AddressKind::PropertyState { mint } => {
                vec![PROPERTY_SEED.to_vec(), mint.to_bytes().to_vec()]
            }
            AddressKind::ExtraAccountMetas { mint } => {
                vec![EXTRA_ACCOUNT_METAS_SEED.to_vec(), mint.to_bytes().to_vec()]
            }
            AddressKind::RevenueEpoch {
                property_state,
                epoch_number,
            } => vec![
                REVENUE_EPOCH_SEED.to_vec(),
                property_state.to_bytes().to_vec(),
                epoch_number.to_le_bytes().to_vec(),
            ],
            AddressKind::ClaimRecord { revenue_epoch, investor } => vec![
                CLAIM_RECORD_SEED.to_vec(),
                revenue_epoch.to_bytes().to_vec(),
                investor.to_bytes().to_vec(),
            ],
            AddressKind::RevenueVault { revenue_epoch } => {
                vec![REVENUE_VAULT_SEED.to_vec(), revenue_epoch.to_bytes().to_vec()]
            }
            AddressKind::GatewayToken { wallet, network } => vec![
                wallet.to_bytes().to_vec(),
                GATEWAY_SEED.to_vec(),
                GATEWAY_SEED_OFFSET.to_vec(),
                network.to_bytes().to_vec(),
            ],
        }
    }

    pub fn is_gateway(&self) -> bool {
        matches!(self, AddressKind::GatewayToken { .. })
    }
}

pub fn derive_address(kind: &AddressKind, program_id: &Pubkey) -> (Pubkey, u8) {
    let seeds = kind.seeds();
    let seed_refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
    Pubkey::find_program_address(&seed_refs, program_id)
}

pub fn find_property_state_address(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[PROPERTY_SEED, mint.as_ref()], program_id)
}

pub fn find_extra_account_metas_address(mint: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[EXTRA_ACCOUNT_METAS_SEED, mint.as_ref()], program_id)
}

pub fn find_revenue_epoch_address(
    property_state: &Pubkey,
    epoch_number: u64,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            REVENUE_EPOCH_SEED,
            property_state.as_ref(),
            epoch_number.to_le_bytes().as_ref(),
        ],
        program_id,
    )
}

pub fn find_claim_record_address(
    revenue_epoch: &Pubkey,
    investor: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[CLAIM_RECORD_SEED, revenue_epoch.as_ref(), investor.as_ref()],
        program_id,
    )
}

pub fn find_revenue_vault_address(revenue_epoch: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REVENUE_VAULT_SEED, revenue_epoch.as_ref()], program_id)
}

pub fn find_gateway_token_address(
    wallet: &Pubkey,
    network: &Pubkey,
    gateway_program: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            wallet.as_ref(),
            GATEWAY_SEED,
            GATEWAY_SEED_OFFSET.as_ref(),
            network.as_ref(),
        ],
        gateway_program,
    )
}
