use std::io::{self, Read};

use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize, Pubkey};

use crate::constants::*;
use crate::error::*;
use crate::ledger::LedgerAccount;
use crate::utils::AccountCursor;

use super::{ensure_owner, RecordKind};

/**
 * Property state account
 *
 * Identifies a tokenized property: the authority that manages it and the
 * Token-2022 mint of its fractional tokens. The fixed header is enough to
 * resolve a revenue epoch's mint; the listing block after it is decoded when
 * the account carries one.
 *
 * Derivation: ["property", mint]
 *
 * Layout:
 * - discriminator (8)
 * - authority (32, offset 8)
 * - mint (32, offset 40)
 * - listing (Borsh): name, symbol, total_supply, circulating_supply, details,
 *   is_active, created_at, updated_at, bump
 */
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct PropertyState {
    /// Authority who can mint tokens and update property details
    pub authority: Pubkey,

    /// Token-2022 mint address for this property
    pub mint: Pubkey,

    /// Listing data following the header
    pub listing: Option<PropertyListing>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct PropertyListing {
    pub property_name: String,
    pub property_symbol: String,
    /// Maximum number of tokens that can be minted
    pub total_supply: u64,
    /// Tokens currently in circulation
    pub circulating_supply: u64,
    pub details: PropertyDetails,
    /// Whether minting is enabled
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct PropertyDetails {
    pub property_address: String,
    pub property_type: String,
    /// Property valuation in USD cents
    pub total_value_usd: u64,
    /// Annual rental yield in basis points
    pub rental_yield_bps: u16,
    pub metadata_uri: String,
}

impl PropertyState {
    pub const MIN_LEN: usize = PROPERTY_STATE_MIN_LEN;

    pub fn decode(account: &LedgerAccount, program_id: &Pubkey) -> Result<Self> {
        ensure_owner(RecordKind::Property, account, program_id)?;

        let mut cursor = AccountCursor::new(RecordKind::Property, &account.data);
        cursor.require_len(Self::MIN_LEN)?;
        cursor.skip(DISCRIMINATOR_LEN)?;

        let authority = cursor.read_pubkey()?;
        let mint = cursor.read_pubkey()?;
        let listing = if cursor.remaining() > 0 {
            Some(PropertyListing::from_tail(cursor.rest(), account.data.len())?)
        } else {
            None
        };

        Ok(Self {
            authority,
            mint,
            listing,
        })
    }
}

impl PropertyListing {
    /// Borsh-decodes the listing from the bytes after the header. Trailing
    /// allocation padding is left unread.
    fn from_tail(tail: &[u8], account_len: usize) -> Result<Self> {
        let mut reader = TailReader {
            data: tail,
            exhausted: false,
        };
        Self::deserialize_reader(&mut reader).map_err(|e| {
            if reader.exhausted {
                HubReaderError::TooSmall {
                    kind: RecordKind::Property,
                    actual: account_len,
                    required: account_len + 1,
                }
            } else {
                HubReaderError::Malformed {
                    kind: RecordKind::Property,
                    reason: e.to_string(),
                }
            }
        })
    }

    /// Tokens that can still be minted
    pub fn remaining_supply(&self) -> u64 {
        self.total_supply.saturating_sub(self.circulating_supply)
    }

    /// Value per token in USD cents
    pub fn value_per_token_cents(&self) -> u64 {
        if self.total_supply == 0 {
            0
        } else {
            self.details.total_value_usd / self.total_supply
        }
    }
}

/// Borsh reports a short buffer as invalid data, so running out is tracked here
struct TailReader<'a> {
    data: &'a [u8],
    exhausted: bool,
}

impl Read for TailReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.len() < buf.len() {
            self.exhausted = true;
        }
        self.data.read(buf)
    }
}
