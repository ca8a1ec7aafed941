//! HUB Revenue Reader
//!
//! Off-chain read side of the HUB property token program. Properties are
//! tokenized as Token-2022 mints; rental income is deposited per epoch and
//! claimed by holders in proportion to their balance. This crate rebuilds that
//! picture from raw account bytes handed over by a ledger client.
//!
//! Key Features:
//! - Deterministic PDA derivation for every account the program creates
//! - Bounds-checked decoding of property, revenue epoch, claim record and
//!   gateway token accounts, with owner and field checks before trust
//! - Credential gate reporting a precise rejection reason per wallet
//! - Integer-only payout previews, idempotent once a claim is recorded
//! - Epoch enumeration with a bounded probe policy
//!
//! Architecture:
//! - Property State PDA: ["property", mint]
//! - Revenue Epoch PDA: ["revenue_epoch", property_state, epoch_number]
//! - Claim Record PDA: ["claim_record", revenue_epoch, investor]
//! - Revenue Vault PDA: ["revenue_vault", revenue_epoch]
//! - Gateway Token PDA: [wallet, "gateway", [0; 8], network] under the
//!   gateway program
//!
//! Nothing here performs I/O or keeps state between calls. All mutation
//! happens inside the ledger program; results are snapshots that can go stale
//! as soon as they are returned.

anchor_lang::declare_id!("FDfkSAAqk8uweJusJb8MSNRHXGRvFqokNfjw9m8ve6om");

pub mod config;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod operations;
pub mod pda;
pub mod state;
pub mod utils;

#[cfg(test)]
pub mod test;

pub use config::ReaderConfig;
pub use error::{HubReaderError, Result};
pub use ledger::*;
pub use operations::*;
pub use pda::*;
pub use state::*;
