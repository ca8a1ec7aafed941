use anchor_lang::prelude::Pubkey;
use solana_pubkey::pubkey;

/**
 * Reader Constants
 *
 * Seeds, account layouts and well-known addresses shared by the decoders,
 * the address deriver and the accounting operations. Every layout value here
 * mirrors what the HUB token program and the Civic gateway program write.
 */

/// ===== PDA SEED CONSTANTS =====

/// Seed for property state PDA derivation
/// - Used in: ["property", mint]
pub const PROPERTY_SEED: &[u8] = b"property";

/// Seed for the transfer-hook extra account metas PDA
/// - Used in: ["extra-account-metas", mint]
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

/// Seed for revenue epoch PDA derivation
/// - Used in: ["revenue_epoch", property_state, epoch_number (u64 LE)]
/// - One account per deposit, epoch numbers start at 1
pub const REVENUE_EPOCH_SEED: &[u8] = b"revenue_epoch";

/// Seed for claim record PDA derivation
/// - Used in: ["claim_record", revenue_epoch, investor]
/// - Uniqueness of this address is what prevents double payouts
pub const CLAIM_RECORD_SEED: &[u8] = b"claim_record";

/// Seed for the SOL vault holding an epoch's revenue
/// - Used in: ["revenue_vault", revenue_epoch]
pub const REVENUE_VAULT_SEED: &[u8] = b"revenue_vault";

/// Literal seed of a gateway token PDA
/// - Used in: [wallet, "gateway", [0u8; 8], gatekeeper_network]
pub const GATEWAY_SEED: &[u8] = b"gateway";

/// Seed offset slot of a gateway token PDA, always zero for primary tokens
pub const GATEWAY_SEED_OFFSET: [u8; 8] = [0u8; 8];

/// ===== ACCOUNT LAYOUT CONSTANTS =====

/// Anchor account discriminator prefix
pub const DISCRIMINATOR_LEN: usize = 8;

/// Size of a serialized public key
pub const PUBKEY_LEN: usize = 32;

/// PropertyState header: discriminator + authority + mint
pub const PROPERTY_STATE_MIN_LEN: usize = DISCRIMINATOR_LEN + PUBKEY_LEN * 2;

/// RevenueEpoch fixed prefix: discriminator + property_state + epoch_number
/// + total_revenue + eligible_supply
pub const REVENUE_EPOCH_MIN_LEN: usize = 64;

/// RevenueEpoch deposit tail: deposited_at + deposited_by + is_finalized + bump
pub const REVENUE_EPOCH_DEPOSIT_LEN: usize = 8 + PUBKEY_LEN + 1 + 1;

/// ClaimRecord: discriminator + epoch + investor + claimed + amount + claimed_at
pub const CLAIM_RECORD_LEN: usize = 89;

/// Smallest well-formed gateway token: version, absent parent, owner wallet,
/// absent identity, network, issuing gatekeeper, state, absent expiry
pub const GATEWAY_TOKEN_MIN_LEN: usize = 1 + 1 + PUBKEY_LEN + 1 + PUBKEY_LEN + PUBKEY_LEN + 1 + 1;

/// ===== WELL-KNOWN ADDRESSES =====

/// Civic gateway program (mainnet and devnet)
pub const GATEWAY_PROGRAM_ID: Pubkey = pubkey!("gatem74V238djXdzWnJf94Wo1DcnuGkfijbf3AuBhfs");

/// Civic ID verification network (KYC/AML), required for securities
pub const ID_VERIFICATION_NETWORK: Pubkey = pubkey!("bni1ewus6aMxTxBi5SAfzEmmXLf8KcVFRmTfproJuKw");

/// Civic uniqueness network (proof of personhood)
pub const UNIQUENESS_NETWORK: Pubkey = pubkey!("tgnuXXNMDLK8dy7Xm1TdeGyc95MDym4bvAQCwcW21Bf");

/// ===== SCAN CONSTANTS =====

/// Upper bound on epoch numbers probed when enumerating a property's epochs
pub const DEFAULT_MAX_EPOCH_PROBE: u64 = 100;
